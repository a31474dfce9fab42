//! Announcement domain services.
//!
//! Posting and editing are president privileges; reading is open to any
//! signed-in user once the club has been approved.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::announcement::{
    Announcement, AnnouncementBody, AnnouncementId, AnnouncementTitle,
    AnnouncementValidationError,
};
use crate::domain::club::{Club, ClubId, ClubStatus};
use crate::domain::error::Error;
use crate::domain::membership::Membership;
use crate::domain::membership_service::{
    map_club_repository_error, map_membership_repository_error,
};
use crate::domain::ports::{
    AnnouncementContentRequest, AnnouncementPayload, AnnouncementRepository,
    AnnouncementRepositoryError, AnnouncementsCommand, AnnouncementsQuery, ClubRepository,
    MembershipRepository,
};
use crate::domain::report::{self, LifecycleOutcome};
use crate::domain::transition::{self, LifecycleError};
use crate::domain::user::UserId;

fn map_announcement_repository_error(error: AnnouncementRepositoryError) -> Error {
    match error {
        AnnouncementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("announcement store unavailable: {message}"))
        }
        AnnouncementRepositoryError::Query { message } => {
            Error::internal(format!("announcement store error: {message}"))
        }
    }
}

fn invalid_field(field: &str, error: &AnnouncementValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn validated_content(
    request: AnnouncementContentRequest,
) -> Result<(AnnouncementTitle, AnnouncementBody), Error> {
    let title =
        AnnouncementTitle::new(request.title).map_err(|error| invalid_field("title", &error))?;
    let body =
        AnnouncementBody::new(request.body).map_err(|error| invalid_field("body", &error))?;
    Ok((title, body))
}

/// Announcement service implementing the command driving port.
#[derive(Clone)]
pub struct AnnouncementsCommandService<C, M, A> {
    club_repo: Arc<C>,
    membership_repo: Arc<M>,
    announcement_repo: Arc<A>,
}

impl<C, M, A> AnnouncementsCommandService<C, M, A>
where
    C: ClubRepository,
    M: MembershipRepository,
    A: AnnouncementRepository,
{
    /// Create a new command service over the backing repositories.
    pub fn new(club_repo: Arc<C>, membership_repo: Arc<M>, announcement_repo: Arc<A>) -> Self {
        Self {
            club_repo,
            membership_repo,
            announcement_repo,
        }
    }

    async fn require_club_president(
        &self,
        club_id: &ClubId,
        acting: &UserId,
    ) -> Result<(), Error> {
        self.club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        let acting_role = self
            .membership_repo
            .get(club_id, acting)
            .await
            .map_err(map_membership_repository_error)?
            .as_ref()
            .map(Membership::role);
        transition::require_president(acting_role)?;
        Ok(())
    }
}

#[async_trait]
impl<C, M, A> AnnouncementsCommand for AnnouncementsCommandService<C, M, A>
where
    C: ClubRepository,
    M: MembershipRepository,
    A: AnnouncementRepository,
{
    async fn post(
        &self,
        club_id: &ClubId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error> {
        self.require_club_president(club_id, acting).await?;
        let (title, body) = validated_content(request)?;
        let now = Utc::now();
        let announcement = Announcement::new(
            AnnouncementId::random(),
            club_id.clone(),
            acting.clone(),
            title,
            body,
            now,
            now,
        );
        let stored = self
            .announcement_repo
            .insert(&announcement)
            .await
            .map_err(map_announcement_repository_error)?;
        report::report(LifecycleOutcome::AnnouncementPosted, club_id, acting);
        Ok(stored.into())
    }

    async fn edit(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error> {
        self.require_club_president(club_id, acting).await?;
        let (title, body) = validated_content(request)?;
        let existing = self
            .announcement_repo
            .find_by_id(club_id, announcement_id)
            .await
            .map_err(map_announcement_repository_error)?
            .ok_or(LifecycleError::AnnouncementNotFound)?;
        let updated = self
            .announcement_repo
            .update(&existing.with_content(title, body, Utc::now()))
            .await
            .map_err(map_announcement_repository_error)?
            .ok_or(LifecycleError::AnnouncementNotFound)?;
        report::report(LifecycleOutcome::AnnouncementUpdated, club_id, acting);
        Ok(updated.into())
    }

    async fn delete(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
        acting: &UserId,
    ) -> Result<(), Error> {
        self.require_club_president(club_id, acting).await?;
        let removed = self
            .announcement_repo
            .delete(club_id, announcement_id)
            .await
            .map_err(map_announcement_repository_error)?;
        if !removed {
            return Err(LifecycleError::AnnouncementNotFound.into());
        }
        report::report(LifecycleOutcome::AnnouncementDeleted, club_id, acting);
        Ok(())
    }
}

/// Announcement service implementing the query driving port.
#[derive(Clone)]
pub struct AnnouncementsQueryService<C, A> {
    club_repo: Arc<C>,
    announcement_repo: Arc<A>,
}

impl<C, A> AnnouncementsQueryService<C, A>
where
    C: ClubRepository,
    A: AnnouncementRepository,
{
    /// Create a new query service over the backing repositories.
    pub fn new(club_repo: Arc<C>, announcement_repo: Arc<A>) -> Self {
        Self {
            club_repo,
            announcement_repo,
        }
    }

    async fn require_approved_club(&self, club_id: &ClubId) -> Result<Club, Error> {
        let club = self
            .club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        if club.status() != ClubStatus::Approved {
            return Err(LifecycleError::ClubNotFound.into());
        }
        Ok(club)
    }
}

#[async_trait]
impl<C, A> AnnouncementsQuery for AnnouncementsQueryService<C, A>
where
    C: ClubRepository,
    A: AnnouncementRepository,
{
    async fn list(&self, club_id: &ClubId) -> Result<Vec<AnnouncementPayload>, Error> {
        self.require_approved_club(club_id).await?;
        let announcements = self
            .announcement_repo
            .list_by_club(club_id)
            .await
            .map_err(map_announcement_repository_error)?;
        Ok(announcements.into_iter().map(Into::into).collect())
    }

    async fn get(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<AnnouncementPayload, Error> {
        self.require_approved_club(club_id).await?;
        let announcement = self
            .announcement_repo
            .find_by_id(club_id, announcement_id)
            .await
            .map_err(map_announcement_repository_error)?
            .ok_or(LifecycleError::AnnouncementNotFound)?;
        Ok(announcement.into())
    }
}

#[cfg(test)]
#[path = "announcement_service_tests.rs"]
mod tests;

//! Club lifecycle domain services.
//!
//! Proposal, review, and visibility rules live here. A club is proposed by
//! any signed-in user, reviewed by a platform administrator, and only then
//! gains its first membership: the creator installed as president.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::club::{
    Club, ClubDescription, ClubId, ClubName, ClubStatus, ClubValidationError,
};
use crate::domain::club_locks::ClubLockRegistry;
use crate::domain::error::Error;
use crate::domain::membership::{Membership, Role};
use crate::domain::membership_service::{
    map_club_repository_error, map_membership_repository_error,
};
use crate::domain::ports::{
    ClubCommand, ClubPayload, ClubQuery, ClubRepository, CreateClubRequest, MembershipRepository,
    UserRepository, UserRepositoryError,
};
use crate::domain::report::{self, LifecycleOutcome};
use crate::domain::transition::{self, LifecycleError};
use crate::domain::user::{User, UserId};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username already taken: {username}"))
        }
    }
}

fn invalid_field(field: &str, error: &ClubValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Club service implementing the command driving port.
#[derive(Clone)]
pub struct ClubCommandService<C, M, U> {
    club_repo: Arc<C>,
    membership_repo: Arc<M>,
    user_repo: Arc<U>,
    locks: Arc<ClubLockRegistry>,
}

impl<C, M, U> ClubCommandService<C, M, U>
where
    C: ClubRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    /// Create a new command service sharing the club lock registry.
    pub fn new(
        club_repo: Arc<C>,
        membership_repo: Arc<M>,
        user_repo: Arc<U>,
        locks: Arc<ClubLockRegistry>,
    ) -> Self {
        Self {
            club_repo,
            membership_repo,
            user_repo,
            locks,
        }
    }

    async fn require_admin(&self, acting: &UserId) -> Result<User, Error> {
        let user = self
            .user_repo
            .find_by_id(acting)
            .await
            .map_err(map_user_repository_error)?
            .ok_or(LifecycleError::UserNotFound)?;
        if !user.is_admin() {
            return Err(LifecycleError::NotAuthorized.into());
        }
        Ok(user)
    }

    async fn load_pending_club(&self, club_id: &ClubId) -> Result<Club, Error> {
        let club = self
            .club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        if club.status() != ClubStatus::Pending {
            return Err(LifecycleError::ClubNotPending.into());
        }
        Ok(club)
    }
}

#[async_trait]
impl<C, M, U> ClubCommand for ClubCommandService<C, M, U>
where
    C: ClubRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn create_club(
        &self,
        request: CreateClubRequest,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        let name =
            ClubName::new(request.name).map_err(|error| invalid_field("name", &error))?;
        let description = ClubDescription::new(request.description)
            .map_err(|error| invalid_field("description", &error))?;
        // Blank logo references are treated as absent.
        let logo = request
            .logo
            .filter(|reference| !reference.trim().is_empty());
        let club = Club::new(
            ClubId::random(),
            name,
            description,
            ClubStatus::Pending,
            true,
            acting.clone(),
            Utc::now(),
        )
        .with_branding(logo, request.category_id);
        let stored = self
            .club_repo
            .insert(&club)
            .await
            .map_err(map_club_repository_error)?;
        report::report(LifecycleOutcome::ClubSubmitted, stored.id(), acting);
        Ok(stored.into())
    }

    async fn approve_club(
        &self,
        club_id: &ClubId,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        self.require_admin(acting).await?;
        let _guard = self.locks.acquire(club_id).await;
        let club = self.load_pending_club(club_id).await?;
        let approved = self
            .club_repo
            .update_status(club_id, ClubStatus::Approved)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        let now = Utc::now();
        let president = Membership::new(
            club_id.clone(),
            club.created_by().clone(),
            Role::President,
            now,
            now,
        );
        self.membership_repo
            .upsert(&president)
            .await
            .map_err(map_membership_repository_error)?;
        report::report(LifecycleOutcome::ClubApproved, club_id, acting);
        Ok(approved.into())
    }

    async fn reject_club(&self, club_id: &ClubId, acting: &UserId) -> Result<ClubPayload, Error> {
        self.require_admin(acting).await?;
        let _guard = self.locks.acquire(club_id).await;
        self.load_pending_club(club_id).await?;
        let suspended = self
            .club_repo
            .update_status(club_id, ClubStatus::Suspended)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        report::report(LifecycleOutcome::ClubRejected, club_id, acting);
        Ok(suspended.into())
    }

    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        let _guard = self.locks.acquire(club_id).await;
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
            .map(|row| row.role());
        transition::require_president(acting_role)?;
        let updated = self
            .club_repo
            .set_membership_open(club_id, open)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        let outcome = if open {
            LifecycleOutcome::MembershipOpened
        } else {
            LifecycleOutcome::MembershipClosed
        };
        report::report(outcome, club_id, acting);
        Ok(updated.into())
    }
}

/// Club service implementing the query driving port.
#[derive(Clone)]
pub struct ClubQueryService<C, U> {
    club_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<C, U> ClubQueryService<C, U>
where
    C: ClubRepository,
    U: UserRepository,
{
    /// Create a new query service over the club and user repositories.
    pub fn new(club_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self {
            club_repo,
            user_repo,
        }
    }

    async fn is_admin(&self, acting: &UserId) -> Result<bool, Error> {
        let user = self
            .user_repo
            .find_by_id(acting)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user.is_some_and(|user| user.is_admin()))
    }
}

#[async_trait]
impl<C, U> ClubQuery for ClubQueryService<C, U>
where
    C: ClubRepository,
    U: UserRepository,
{
    async fn get_club(&self, club_id: &ClubId, acting: &UserId) -> Result<ClubPayload, Error> {
        let club = self
            .club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        if club.status() == ClubStatus::Approved {
            return Ok(club.into());
        }
        // Unreviewed and suspended clubs stay invisible to everyone except
        // their creator and platform administrators.
        if club.created_by() == acting || self.is_admin(acting).await? {
            return Ok(club.into());
        }
        Err(LifecycleError::ClubNotFound.into())
    }

    async fn list_clubs(
        &self,
        status: Option<ClubStatus>,
        acting: &UserId,
    ) -> Result<Vec<ClubPayload>, Error> {
        let filter = if self.is_admin(acting).await? {
            status
        } else {
            Some(ClubStatus::Approved)
        };
        let clubs = self
            .club_repo
            .list(filter)
            .await
            .map_err(map_club_repository_error)?;
        Ok(clubs.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "club_service_tests.rs"]
mod tests;

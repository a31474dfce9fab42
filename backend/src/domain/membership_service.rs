//! Membership lifecycle domain services.
//!
//! These services implement the membership driving ports on top of the club
//! and membership repositories. Writes take the club's lock before the first
//! read so racing operations against one club are applied one at a time.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::club::{Club, ClubId};
use crate::domain::club_locks::ClubLockRegistry;
use crate::domain::error::Error;
use crate::domain::membership::{Membership, MembershipStatus, Role};
use crate::domain::ports::{
    ClubRepository, ClubRepositoryError, HandoffResponse, MemberPayload,
    MembershipActionResponse, MembershipCommand, MembershipQuery, MembershipRepository,
    MembershipRepositoryError, RoleAssignment, UserMembershipPayload,
};
use crate::domain::report::{self, LifecycleOutcome};
use crate::domain::transition::{self, HandoffPlan, LifecycleError, Transition};
use crate::domain::user::UserId;

pub(crate) fn map_club_repository_error(error: ClubRepositoryError) -> Error {
    match error {
        ClubRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("club repository unavailable: {message}"))
        }
        ClubRepositoryError::Query { message } => {
            Error::internal(format!("club repository error: {message}"))
        }
    }
}

pub(crate) fn map_membership_repository_error(error: MembershipRepositoryError) -> Error {
    match error {
        MembershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("membership store unavailable: {message}"))
        }
        MembershipRepositoryError::Query { message } => {
            Error::internal(format!("membership store error: {message}"))
        }
    }
}

/// Membership service implementing the command driving port.
#[derive(Clone)]
pub struct MembershipCommandService<C, M> {
    club_repo: Arc<C>,
    membership_repo: Arc<M>,
    locks: Arc<ClubLockRegistry>,
}

impl<C, M> MembershipCommandService<C, M>
where
    C: ClubRepository,
    M: MembershipRepository,
{
    /// Create a new command service sharing the club lock registry.
    pub fn new(club_repo: Arc<C>, membership_repo: Arc<M>, locks: Arc<ClubLockRegistry>) -> Self {
        Self {
            club_repo,
            membership_repo,
            locks,
        }
    }

    async fn load_club(&self, club_id: &ClubId) -> Result<Club, Error> {
        self.club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or_else(|| LifecycleError::ClubNotFound.into())
    }

    async fn load_role(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Option<Role>, Error> {
        let row = self
            .membership_repo
            .get(club_id, user_id)
            .await
            .map_err(map_membership_repository_error)?;
        Ok(row.as_ref().map(Membership::role))
    }

    /// Apply a decided transition to the subject's row and return their new
    /// role.
    async fn apply(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
        decision: Transition,
    ) -> Result<Option<Role>, Error> {
        let now = Utc::now();
        match decision {
            Transition::Insert(role) => {
                let membership =
                    Membership::new(club_id.clone(), user_id.clone(), role, now, now);
                let stored = self
                    .membership_repo
                    .upsert(&membership)
                    .await
                    .map_err(map_membership_repository_error)?;
                Ok(Some(stored.role()))
            }
            Transition::Update(role) => {
                let existing = self
                    .membership_repo
                    .get(club_id, user_id)
                    .await
                    .map_err(map_membership_repository_error)?
                    .ok_or_else(|| Error::internal("membership row vanished under club lock"))?;
                let stored = self
                    .membership_repo
                    .upsert(&existing.with_role(role, now))
                    .await
                    .map_err(map_membership_repository_error)?;
                Ok(Some(stored.role()))
            }
            Transition::Delete => {
                self.membership_repo
                    .delete(club_id, user_id)
                    .await
                    .map_err(map_membership_repository_error)?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<C, M> MembershipCommand for MembershipCommandService<C, M>
where
    C: ClubRepository,
    M: MembershipRepository,
{
    async fn request_join(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        let club = self.load_club(club_id).await?;
        let existing = self.load_role(club_id, user_id).await?;
        let decision = transition::request_join(&club, existing)?;
        let role = self.apply(club_id, user_id, decision).await?;
        report::report(LifecycleOutcome::JoinRequested, club_id, user_id);
        Ok(MembershipActionResponse::new(
            role,
            LifecycleOutcome::JoinRequested,
        ))
    }

    async fn cancel_or_leave(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        self.load_club(club_id).await?;
        let existing = self.load_role(club_id, user_id).await?;
        let decision = transition::cancel_or_leave(existing)?;
        let outcome = if existing == Some(Role::Pending) {
            LifecycleOutcome::JoinCancelled
        } else {
            LifecycleOutcome::MemberLeft
        };
        let role = self.apply(club_id, user_id, decision).await?;
        report::report(outcome, club_id, user_id);
        Ok(MembershipActionResponse::new(role, outcome))
    }

    async fn approve(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        self.load_club(club_id).await?;
        let acting_role = self.load_role(club_id, acting).await?;
        let target_role = self.load_role(club_id, target).await?;
        let decision = transition::approve(acting_role, target_role)?;
        let role = self.apply(club_id, target, decision).await?;
        report::report(LifecycleOutcome::MemberApproved, club_id, target);
        Ok(MembershipActionResponse::new(
            role,
            LifecycleOutcome::MemberApproved,
        ))
    }

    async fn reject(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        self.load_club(club_id).await?;
        let acting_role = self.load_role(club_id, acting).await?;
        let target_role = self.load_role(club_id, target).await?;
        let decision = transition::reject(acting_role, target_role)?;
        let role = self.apply(club_id, target, decision).await?;
        report::report(LifecycleOutcome::MemberRejected, club_id, target);
        Ok(MembershipActionResponse::new(
            role,
            LifecycleOutcome::MemberRejected,
        ))
    }

    async fn remove(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        self.load_club(club_id).await?;
        let acting_role = self.load_role(club_id, acting).await?;
        let target_role = self.load_role(club_id, target).await?;
        let decision = transition::remove(acting_role, target_role)?;
        let role = self.apply(club_id, target, decision).await?;
        report::report(LifecycleOutcome::MemberRemoved, club_id, target);
        Ok(MembershipActionResponse::new(
            role,
            LifecycleOutcome::MemberRemoved,
        ))
    }

    async fn change_president(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<HandoffResponse, Error> {
        let _guard = self.locks.acquire(club_id).await;
        self.load_club(club_id).await?;
        let acting_role = self.load_role(club_id, acting).await?;
        let target_role = self.load_role(club_id, target).await?;
        match transition::change_president(acting_role, target_role)? {
            HandoffPlan::AlreadyPresident => {
                report::report(LifecycleOutcome::PresidencyRetained, club_id, target);
                Ok(HandoffResponse {
                    outgoing: RoleAssignment {
                        user_id: acting.clone(),
                        role: Role::President,
                    },
                    incoming: RoleAssignment {
                        user_id: target.clone(),
                        role: Role::President,
                    },
                    message_key: LifecycleOutcome::PresidencyRetained
                        .message_key()
                        .to_owned(),
                })
            }
            HandoffPlan::Transfer { demoted_role } => {
                self.membership_repo
                    .transfer_presidency(club_id, acting, target, demoted_role)
                    .await
                    .map_err(map_membership_repository_error)?;
                report::report(LifecycleOutcome::PresidencyTransferred, club_id, target);
                Ok(HandoffResponse {
                    outgoing: RoleAssignment {
                        user_id: acting.clone(),
                        role: demoted_role,
                    },
                    incoming: RoleAssignment {
                        user_id: target.clone(),
                        role: Role::President,
                    },
                    message_key: LifecycleOutcome::PresidencyTransferred
                        .message_key()
                        .to_owned(),
                })
            }
        }
    }
}

/// Membership service implementing the query driving port.
#[derive(Clone)]
pub struct MembershipQueryService<C, M> {
    club_repo: Arc<C>,
    membership_repo: Arc<M>,
}

impl<C, M> MembershipQueryService<C, M>
where
    C: ClubRepository,
    M: MembershipRepository,
{
    /// Create a new query service over the club and membership repositories.
    pub fn new(club_repo: Arc<C>, membership_repo: Arc<M>) -> Self {
        Self {
            club_repo,
            membership_repo,
        }
    }
}

#[async_trait]
impl<C, M> MembershipQuery for MembershipQueryService<C, M>
where
    C: ClubRepository,
    M: MembershipRepository,
{
    async fn status(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipStatus, Error> {
        self.club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        let row = self
            .membership_repo
            .get(club_id, user_id)
            .await
            .map_err(map_membership_repository_error)?;
        Ok(MembershipStatus::from_role(
            row.as_ref().map(Membership::role),
        ))
    }

    async fn list_members(
        &self,
        club_id: &ClubId,
        acting: &UserId,
    ) -> Result<Vec<MemberPayload>, Error> {
        self.club_repo
            .find_by_id(club_id)
            .await
            .map_err(map_club_repository_error)?
            .ok_or(LifecycleError::ClubNotFound)?;
        let acting_row = self
            .membership_repo
            .get(club_id, acting)
            .await
            .map_err(map_membership_repository_error)?;
        let authorised = acting_row
            .as_ref()
            .map(|row| row.role().can_manage_members())
            == Some(true);
        if !authorised {
            return Err(LifecycleError::NotAuthorized.into());
        }
        let profiles = self
            .membership_repo
            .list_profiles_by_club(club_id)
            .await
            .map_err(map_membership_repository_error)?;
        Ok(profiles.into_iter().map(Into::into).collect())
    }

    async fn memberships_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserMembershipPayload>, Error> {
        let memberships = self
            .membership_repo
            .list_by_user(user_id)
            .await
            .map_err(map_membership_repository_error)?;
        let club_ids: Vec<ClubId> = memberships
            .iter()
            .map(|row| row.club_id().clone())
            .collect();
        let clubs = self
            .club_repo
            .find_by_ids(&club_ids)
            .await
            .map_err(map_club_repository_error)?;

        // Memberships whose club row has vanished are dropped rather than
        // surfaced as phantom entries.
        let mut payloads = Vec::with_capacity(memberships.len());
        for row in memberships {
            let Some(club) = clubs.iter().find(|club| club.id() == row.club_id()) else {
                continue;
            };
            payloads.push(UserMembershipPayload {
                club_id: club.id().clone(),
                club_name: club.name().as_ref().to_owned(),
                club_status: club.status(),
                role: row.role(),
                since: row.created_at(),
            });
        }
        Ok(payloads)
    }
}

#[cfg(test)]
#[path = "membership_service_tests.rs"]
mod tests;

//! Driving port for membership read models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::club::{ClubId, ClubStatus};
use crate::domain::error::Error;
use crate::domain::membership::{MemberProfile, MembershipStatus, Role};
use crate::domain::user::UserId;

/// Directory entry returned to the club's president.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub since: DateTime<Utc>,
}

impl From<MemberProfile> for MemberPayload {
    fn from(value: MemberProfile) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username.into(),
            display_name: value.display_name.into(),
            avatar: value.avatar,
            role: value.role,
            since: value.since,
        }
    }
}

/// One of the requesting user's memberships, joined with club context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMembershipPayload {
    pub club_id: ClubId,
    pub club_name: String,
    pub club_status: ClubStatus,
    pub role: Role,
    pub since: DateTime<Utc>,
}

/// Driving port for membership reads.
///
/// Status reads always reflect the store's current value; there is no cache
/// or staleness window.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipQuery: Send + Sync {
    /// The requesting user's standing in a club.
    async fn status(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipStatus, Error>;

    /// Full member directory for a club. Restricted to the club president.
    async fn list_members(
        &self,
        club_id: &ClubId,
        acting: &UserId,
    ) -> Result<Vec<MemberPayload>, Error>;

    /// All memberships held by a user, joined with club names.
    async fn memberships_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserMembershipPayload>, Error>;
}

/// Fixture query implementation for tests that do not need membership reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMembershipQuery;

#[async_trait]
impl MembershipQuery for FixtureMembershipQuery {
    async fn status(
        &self,
        _club_id: &ClubId,
        _user_id: &UserId,
    ) -> Result<MembershipStatus, Error> {
        Ok(MembershipStatus::absent())
    }

    async fn list_members(
        &self,
        _club_id: &ClubId,
        _acting: &UserId,
    ) -> Result<Vec<MemberPayload>, Error> {
        Ok(Vec::new())
    }

    async fn memberships_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<UserMembershipPayload>, Error> {
        Ok(Vec::new())
    }
}

//! Driving port for club lifecycle mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::club::{Club, ClubId, ClubStatus};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Serializable club view shared by the club ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPayload {
    pub id: ClubId,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: ClubStatus,
    pub membership_open: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Club> for ClubPayload {
    fn from(value: Club) -> Self {
        Self {
            id: value.id().clone(),
            name: value.name().as_ref().to_owned(),
            description: value.description().as_ref().to_owned(),
            logo: value.logo().map(ToOwned::to_owned),
            category_id: value.category_id(),
            status: value.status(),
            membership_open: value.membership_open(),
            created_by: value.created_by().clone(),
            created_at: value.created_at(),
        }
    }
}

/// Request to propose a new club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Driving port for club write operations.
///
/// New clubs start pending with no memberships; the proposer only becomes
/// president when an administrator approves the club.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClubCommand: Send + Sync {
    /// Propose a club. The acting user becomes the recorded creator.
    async fn create_club(
        &self,
        request: CreateClubRequest,
        acting: &UserId,
    ) -> Result<ClubPayload, Error>;

    /// Approve a pending club and install its creator as president.
    /// Administrator only.
    async fn approve_club(&self, club_id: &ClubId, acting: &UserId)
    -> Result<ClubPayload, Error>;

    /// Reject a pending club, parking it as suspended. Administrator only.
    async fn reject_club(&self, club_id: &ClubId, acting: &UserId) -> Result<ClubPayload, Error>;

    /// Open or close the club to join requests. President only.
    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
        acting: &UserId,
    ) -> Result<ClubPayload, Error>;
}

/// Fixture command implementation for tests that do not need club writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClubCommand;

fn fixture_club(status: ClubStatus, created_by: &UserId) -> ClubPayload {
    ClubPayload {
        id: ClubId::random(),
        name: "Chess Club".to_owned(),
        description: "Weekly chess meetups for all levels".to_owned(),
        logo: None,
        category_id: None,
        status,
        membership_open: true,
        created_by: created_by.clone(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ClubCommand for FixtureClubCommand {
    async fn create_club(
        &self,
        request: CreateClubRequest,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        let mut club = fixture_club(ClubStatus::Pending, acting);
        club.name = request.name;
        club.description = request.description;
        club.logo = request.logo;
        club.category_id = request.category_id;
        Ok(club)
    }

    async fn approve_club(
        &self,
        club_id: &ClubId,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        let mut club = fixture_club(ClubStatus::Approved, acting);
        club.id = club_id.clone();
        Ok(club)
    }

    async fn reject_club(&self, club_id: &ClubId, acting: &UserId) -> Result<ClubPayload, Error> {
        let mut club = fixture_club(ClubStatus::Suspended, acting);
        club.id = club_id.clone();
        Ok(club)
    }

    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
        acting: &UserId,
    ) -> Result<ClubPayload, Error> {
        let mut club = fixture_club(ClubStatus::Approved, acting);
        club.id = club_id.clone();
        club.membership_open = open;
        Ok(club)
    }
}

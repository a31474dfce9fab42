//! Driving port for club reads.

use async_trait::async_trait;

use crate::domain::club::{ClubId, ClubStatus};
use crate::domain::error::Error;
use crate::domain::user::UserId;

use super::club_command::ClubPayload;

/// Driving port for club read operations.
///
/// Approved clubs are visible to any authenticated user. Pending and
/// suspended clubs are visible only to their creator and administrators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClubQuery: Send + Sync {
    /// Fetch a single club, subject to visibility rules.
    async fn get_club(&self, club_id: &ClubId, acting: &UserId) -> Result<ClubPayload, Error>;

    /// List clubs. Non-administrators always receive approved clubs only;
    /// administrators may filter by lifecycle state.
    async fn list_clubs(
        &self,
        status: Option<ClubStatus>,
        acting: &UserId,
    ) -> Result<Vec<ClubPayload>, Error>;
}

/// Fixture query implementation for tests that do not need club reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClubQuery;

#[async_trait]
impl ClubQuery for FixtureClubQuery {
    async fn get_club(&self, _club_id: &ClubId, _acting: &UserId) -> Result<ClubPayload, Error> {
        Err(Error::not_found("club not found"))
    }

    async fn list_clubs(
        &self,
        _status: Option<ClubStatus>,
        _acting: &UserId,
    ) -> Result<Vec<ClubPayload>, Error> {
        Ok(Vec::new())
    }
}

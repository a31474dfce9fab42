//! Driving port for announcement reads.

use async_trait::async_trait;

use crate::domain::announcement::AnnouncementId;
use crate::domain::club::ClubId;
use crate::domain::error::Error;

use super::announcements_command::AnnouncementPayload;

/// Driving port for announcement read operations.
///
/// Any authenticated user may read an approved club's announcements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementsQuery: Send + Sync {
    /// All announcements for a club, newest first.
    async fn list(&self, club_id: &ClubId) -> Result<Vec<AnnouncementPayload>, Error>;

    /// A single announcement within a club.
    async fn get(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<AnnouncementPayload, Error>;
}

/// Fixture query implementation for tests that do not read announcements.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnouncementsQuery;

#[async_trait]
impl AnnouncementsQuery for FixtureAnnouncementsQuery {
    async fn list(&self, _club_id: &ClubId) -> Result<Vec<AnnouncementPayload>, Error> {
        Ok(Vec::new())
    }

    async fn get(
        &self,
        _club_id: &ClubId,
        _announcement_id: &AnnouncementId,
    ) -> Result<AnnouncementPayload, Error> {
        Err(Error::not_found("announcement not found"))
    }
}

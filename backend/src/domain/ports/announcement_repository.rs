//! Port for announcement persistence.

use async_trait::async_trait;

use crate::domain::announcement::{Announcement, AnnouncementId};
use crate::domain::club::ClubId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by announcement repository adapters.
    pub enum AnnouncementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "announcement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "announcement repository query failed: {message}",
    }
}

/// Port for reading and writing club announcements.
///
/// Lookups are club scoped; an announcement id from another club behaves as
/// absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Persist a new announcement.
    async fn insert(
        &self,
        announcement: &Announcement,
    ) -> Result<Announcement, AnnouncementRepositoryError>;

    /// Fetch an announcement by id within a club.
    async fn find_by_id(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError>;

    /// Replace an announcement's content. Returns `None` when no matching
    /// row exists in the club.
    async fn update(
        &self,
        announcement: &Announcement,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError>;

    /// Delete an announcement within a club. Returns whether a row was
    /// removed.
    async fn delete(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<bool, AnnouncementRepositoryError>;

    /// All announcements for a club, newest first.
    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Announcement>, AnnouncementRepositoryError>;
}

/// Fixture implementation for tests that do not exercise announcements.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnouncementRepository;

#[async_trait]
impl AnnouncementRepository for FixtureAnnouncementRepository {
    async fn insert(
        &self,
        announcement: &Announcement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        Ok(announcement.clone())
    }

    async fn find_by_id(
        &self,
        _club_id: &ClubId,
        _announcement_id: &AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        Ok(None)
    }

    async fn update(
        &self,
        _announcement: &Announcement,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        Ok(None)
    }

    async fn delete(
        &self,
        _club_id: &ClubId,
        _announcement_id: &AnnouncementId,
    ) -> Result<bool, AnnouncementRepositoryError> {
        Ok(false)
    }

    async fn list_by_club(
        &self,
        _club_id: &ClubId,
    ) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        Ok(Vec::new())
    }
}

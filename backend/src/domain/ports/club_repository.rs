//! Port for club persistence.

use async_trait::async_trait;

use crate::domain::club::{Club, ClubId, ClubStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by club repository adapters.
    pub enum ClubRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "club repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "club repository query failed: {message}",
    }
}

/// Port for reading and writing clubs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClubRepository: Send + Sync {
    /// Persist a newly proposed club.
    async fn insert(&self, club: &Club) -> Result<Club, ClubRepositoryError>;

    /// Fetch a club by id.
    async fn find_by_id(&self, club_id: &ClubId) -> Result<Option<Club>, ClubRepositoryError>;

    /// Fetch several clubs at once, skipping ids with no match.
    async fn find_by_ids(&self, club_ids: &[ClubId]) -> Result<Vec<Club>, ClubRepositoryError>;

    /// List clubs, optionally restricted to one lifecycle state, newest
    /// first.
    async fn list(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, ClubRepositoryError>;

    /// Move a club to a new lifecycle state. Returns the updated club, or
    /// `None` when the club does not exist.
    async fn update_status(
        &self,
        club_id: &ClubId,
        status: ClubStatus,
    ) -> Result<Option<Club>, ClubRepositoryError>;

    /// Flip the club's open-for-members flag. Returns the updated club, or
    /// `None` when the club does not exist.
    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
    ) -> Result<Option<Club>, ClubRepositoryError>;
}

/// Fixture implementation for tests that do not exercise club persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClubRepository;

#[async_trait]
impl ClubRepository for FixtureClubRepository {
    async fn insert(&self, club: &Club) -> Result<Club, ClubRepositoryError> {
        Ok(club.clone())
    }

    async fn find_by_id(&self, _club_id: &ClubId) -> Result<Option<Club>, ClubRepositoryError> {
        Ok(None)
    }

    async fn find_by_ids(&self, _club_ids: &[ClubId]) -> Result<Vec<Club>, ClubRepositoryError> {
        Ok(Vec::new())
    }

    async fn list(&self, _status: Option<ClubStatus>) -> Result<Vec<Club>, ClubRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        _club_id: &ClubId,
        _status: ClubStatus,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        Ok(None)
    }

    async fn set_membership_open(
        &self,
        _club_id: &ClubId,
        _open: bool,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureClubRepository;
        let found = repo
            .find_by_id(&ClubId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixtureClubRepository;
        let listed = repo
            .list(Some(ClubStatus::Approved))
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = ClubRepositoryError::query("bad statement");
        assert!(err.to_string().contains("bad statement"));
    }
}

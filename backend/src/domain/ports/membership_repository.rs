//! Port for the membership store.
//!
//! Single source of truth for role state. All mutation flows through the
//! lifecycle services; adapters only persist what they are handed.

use async_trait::async_trait;

use crate::domain::club::ClubId;
use crate::domain::membership::{MemberProfile, Membership, Role};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership store adapters.
    pub enum MembershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "membership store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "membership store query failed: {message}",
    }
}

/// Port for reading and writing membership rows.
///
/// `get` returning `None` is not a failure; callers treat it as "not a
/// member". At most one row exists per (club, user) pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Fetch the membership row for a (club, user) pair.
    async fn get(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipRepositoryError>;

    /// Insert or replace the row for the membership's (club, user) pair.
    async fn upsert(&self, membership: &Membership)
    -> Result<Membership, MembershipRepositoryError>;

    /// Delete the row for a (club, user) pair. Deleting an absent row is a
    /// no-op.
    async fn delete(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError>;

    /// All membership rows for a club, pending applicants included.
    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError>;

    /// All membership rows for a user across clubs.
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError>;

    /// Membership rows for a club joined with member profiles, ordered by
    /// request time.
    async fn list_profiles_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError>;

    /// Atomically demote the outgoing president and promote the incoming
    /// member.
    ///
    /// Both role updates must land in one transaction so no reader ever
    /// observes zero or two presidents. Adapters must fail without applying
    /// either update when one of the rows is missing.
    async fn transfer_presidency(
        &self,
        club_id: &ClubId,
        outgoing: &UserId,
        incoming: &UserId,
        demoted_role: Role,
    ) -> Result<(), MembershipRepositoryError>;
}

/// Fixture implementation for tests that do not exercise membership state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMembershipRepository;

#[async_trait]
impl MembershipRepository for FixtureMembershipRepository {
    async fn get(
        &self,
        _club_id: &ClubId,
        _user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        membership: &Membership,
    ) -> Result<Membership, MembershipRepositoryError> {
        Ok(membership.clone())
    }

    async fn delete(
        &self,
        _club_id: &ClubId,
        _user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        Ok(())
    }

    async fn list_by_club(
        &self,
        _club_id: &ClubId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_profiles_by_club(
        &self,
        _club_id: &ClubId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError> {
        Ok(Vec::new())
    }

    async fn transfer_presidency(
        &self,
        _club_id: &ClubId,
        _outgoing: &UserId,
        _incoming: &UserId,
        _demoted_role: Role,
    ) -> Result<(), MembershipRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_get_returns_none() {
        let repo = FixtureMembershipRepository;
        let found = repo
            .get(&ClubId::random(), &UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_upsert_echoes_the_row() {
        let repo = FixtureMembershipRepository;
        let now = Utc::now();
        let membership =
            Membership::new(ClubId::random(), UserId::random(), Role::Pending, now, now);
        let stored = repo
            .upsert(&membership)
            .await
            .expect("fixture upsert succeeds");
        assert_eq!(stored, membership);
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = MembershipRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}

//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::auth::PasswordDigest;
use crate::domain::user::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The username is already taken by another user.
        DuplicateUsername { username: String } =>
            "username already taken: {username}",
    }
}

/// Port for reading and provisioning users.
///
/// Password digests are write-only through this port; authentication goes
/// through the login service instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Provision a user with their password digest.
    async fn insert(
        &self,
        user: &User,
        password_digest: &PasswordDigest,
    ) -> Result<User, UserRepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by their unique login handle.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(
        &self,
        user: &User,
        _password_digest: &PasswordDigest,
    ) -> Result<User, UserRepositoryError> {
        Ok(user.clone())
    }

    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_username(
        &self,
        _username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::user::DisplayName;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_return_none() {
        let repo = FixtureUserRepository;
        assert!(
            repo.find_by_id(&UserId::random())
                .await
                .expect("fixture lookup succeeds")
                .is_none()
        );
        let username = Username::new("ada").expect("valid username");
        assert!(
            repo.find_by_username(&username)
                .await
                .expect("fixture lookup succeeds")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_echoes_the_user() {
        let repo = FixtureUserRepository;
        let user = User::new(
            UserId::random(),
            Username::new("ada").expect("valid username"),
            DisplayName::new("Ada Lovelace").expect("valid display name"),
            false,
        );
        let digest = PasswordDigest::from_password("secret");
        let stored = repo
            .insert(&user, &digest)
            .await
            .expect("fixture insert succeeds");
        assert_eq!(stored, user);
    }

    #[rstest]
    fn duplicate_username_formats_message() {
        let err = UserRepositoryError::duplicate_username("ada");
        assert!(err.to_string().contains("ada"));
    }
}

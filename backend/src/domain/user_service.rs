//! User profile domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::club_service::map_user_repository_error;
use crate::domain::error::Error;
use crate::domain::ports::{UserPayload, UserRepository, UsersQuery};
use crate::domain::transition::LifecycleError;
use crate::domain::user::UserId;

/// User service implementing the profile query port.
#[derive(Clone)]
pub struct UsersQueryService<R> {
    user_repo: Arc<R>,
}

impl<R> UsersQueryService<R>
where
    R: UserRepository,
{
    /// Create a new query service over the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersQueryService<R>
where
    R: UserRepository,
{
    async fn get_profile(&self, user_id: &UserId) -> Result<UserPayload, Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or(LifecycleError::UserNotFound)?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{MockUserRepository, UserRepositoryError};
    use crate::domain::user::{DisplayName, User, Username};

    #[tokio::test]
    async fn get_profile_returns_the_stored_user() {
        let user_id = UserId::random();
        let user = User::new(
            user_id.clone(),
            Username::new("ada").expect("valid username"),
            DisplayName::new("Ada Lovelace").expect("valid display name"),
            false,
        );
        let mut repo = MockUserRepository::new();
        let stored = user.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UsersQueryService::new(Arc::new(repo));
        let payload = service
            .get_profile(&user_id)
            .await
            .expect("profile lookup succeeds");

        assert_eq!(payload.id, user_id);
        assert_eq!(payload.username, "ada");
        assert!(!payload.is_admin);
    }

    #[tokio::test]
    async fn get_profile_misses_unknown_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UsersQueryService::new(Arc::new(repo));
        let error = service
            .get_profile(&UserId::random())
            .await
            .expect_err("unknown user");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn repository_outage_maps_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(UserRepositoryError::connection("pool exhausted")));

        let service = UsersQueryService::new(Arc::new(repo));
        let error = service
            .get_profile(&UserId::random())
            .await
            .expect_err("outage surfaces");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}

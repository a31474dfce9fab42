//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::auth::PasswordDigest;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{User, UserId, Username};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_user_pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn map_user_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let user = User::try_from_strings(
        row.id.to_string(),
        row.username,
        row.display_name,
        row.is_admin,
    )
    .map_err(|err| UserRepositoryError::query(err.to_string()))?;
    Ok(user.with_avatar(row.avatar))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_digest: &PasswordDigest,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            display_name: user.display_name().as_ref(),
            avatar: user.avatar(),
            is_admin: user.is_admin(),
            password_digest: password_digest.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_username(user.username().as_ref())
                } else {
                    map_user_diesel_error(err)
                }
            })?;

        Ok(user.clone())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row = users::table
            .find(user_id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            username: "ada".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            avatar: Some("/avatars/ada.png".to_owned()),
            is_admin: false,
            password_digest: PasswordDigest::from_password("secret").as_str().to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_user_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, UserRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn row_conversion_keeps_profile_fields(valid_row: UserRow) {
        let id = valid_row.id;
        let user = row_to_user(valid_row).expect("row should convert");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_ref(), "ada");
        assert_eq!(user.avatar(), Some("/avatars/ada.png"));
        assert!(!user.is_admin());
    }

    #[rstest]
    fn row_conversion_rejects_a_blank_display_name(mut valid_row: UserRow) {
        valid_row.display_name = "   ".to_owned();

        let error = row_to_user(valid_row).expect_err("blank display name should fail");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
    }
}

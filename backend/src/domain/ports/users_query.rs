//! Driving port for user profile reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Serializable user profile view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl From<User> for UserPayload {
    fn from(value: User) -> Self {
        Self {
            id: value.id().clone(),
            username: value.username().as_ref().to_owned(),
            display_name: value.display_name().as_ref().to_owned(),
            avatar: value.avatar().map(ToOwned::to_owned),
            is_admin: value.is_admin(),
        }
    }
}

/// Driving port for reading user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch the profile for a user id.
    async fn get_profile(&self, user_id: &UserId) -> Result<UserPayload, Error>;
}

/// Fixture query returning a canned profile for whichever id is asked about.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn get_profile(&self, user_id: &UserId) -> Result<UserPayload, Error> {
        Ok(UserPayload {
            id: user_id.clone(),
            username: "ada".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            avatar: None,
            is_admin: false,
        })
    }
}

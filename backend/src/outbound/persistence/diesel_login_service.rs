//! Diesel-backed `LoginService` verifying credentials against stored digests.
//!
//! Digests never leave this adapter. The repository port deliberately has no
//! digest read path, so authentication queries the users table directly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::auth::PasswordDigest;
use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the login port.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| Error::service_unavailable(err.to_string()))?;

        let row: Option<(Uuid, String)> = users::table
            .filter(users::username.eq(credentials.username()))
            .select((users::id, users::password_digest))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| Error::internal(format!("credential lookup failed: {err}")))?;

        // Unknown usernames and wrong passwords are indistinguishable to the
        // caller.
        let Some((id, stored_digest)) = row else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let digest = PasswordDigest::from_hex(stored_digest)
            .map_err(|err| Error::internal(format!("stored digest invalid: {err}")))?;
        if !digest.matches(credentials.password()) {
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(UserId::from_uuid(id))
    }
}

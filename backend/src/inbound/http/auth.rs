//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{AuthValidationError, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserBody;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequestBody> for LoginCredentials {
    type Error = AuthValidationError;

    fn try_from(value: LoginRequestBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credential_error(err: AuthValidationError) -> Error {
    match err {
        AuthValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        AuthValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
        // try_from_parts never yields digest errors.
        AuthValidationError::InvalidDigest => Error::internal(err.to_string()),
    }
}

/// Authenticate and establish a cookie session.
///
/// The response carries the authenticated user's profile so clients need no
/// follow-up request to render the signed-in state.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (
            status = 200,
            description = "Login success",
            body = UserBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_credential_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    let profile = state.users.get_profile(&user_id).await?;
    Ok(web::Json(UserBody::from(profile)))
}

/// Drop the session cookie. Safe to call without one.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security(("SessionCookie" = []))
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

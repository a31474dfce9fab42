//! Current-user API handlers.
//!
//! ```text
//! GET /api/v1/me
//! GET /api/v1/me/memberships
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{UserMembershipPayload, UserPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile of the authenticated user.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl From<UserPayload> for UserBody {
    fn from(value: UserPayload) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
            display_name: value.display_name,
            avatar: value.avatar,
            is_admin: value.is_admin,
        }
    }
}

/// One row of the authenticated user's membership list.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMembershipBody {
    #[schema(format = "uuid")]
    pub club_id: String,
    pub club_name: String,
    pub club_status: String,
    pub role: String,
    #[schema(format = "date-time")]
    pub since: String,
}

impl From<UserMembershipPayload> for UserMembershipBody {
    fn from(value: UserMembershipPayload) -> Self {
        Self {
            club_id: value.club_id.to_string(),
            club_name: value.club_name,
            club_status: value.club_status.to_string(),
            role: value.role.to_string(),
            since: value.since.to_rfc3339(),
        }
    }
}

/// Profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserBody),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser",
    security(("SessionCookie" = []))
)]
#[get("/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<web::Json<UserBody>> {
    let user_id = session.require_user_id()?;
    let profile = state.users.get_profile(&user_id).await?;
    Ok(web::Json(UserBody::from(profile)))
}

/// The authenticated user's memberships across all clubs.
#[utoipa::path(
    get,
    path = "/api/v1/me/memberships",
    responses(
        (status = 200, description = "Memberships held by the user", body = [UserMembershipBody]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listOwnMemberships",
    security(("SessionCookie" = []))
)]
#[get("/me/memberships")]
pub async fn my_memberships(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserMembershipBody>>> {
    let user_id = session.require_user_id()?;
    let memberships = state.membership_query.memberships_for_user(&user_id).await?;
    Ok(web::Json(
        memberships.into_iter().map(UserMembershipBody::from).collect(),
    ))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;

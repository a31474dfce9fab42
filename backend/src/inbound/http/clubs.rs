//! Club lifecycle HTTP handlers.
//!
//! ```text
//! POST /api/v1/clubs
//! GET /api/v1/clubs?status=pending
//! GET /api/v1/clubs/{club_id}
//! POST /api/v1/clubs/{club_id}/approve
//! POST /api/v1/clubs/{club_id}/reject
//! PUT /api/v1/clubs/{club_id}/membership-open
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{ClubPayload, CreateClubRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_club_id, parse_status_filter, parse_uuid,
};

#[derive(Debug, Deserialize)]
struct ClubPath {
    club_id: String,
}

/// Club view returned by every club endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub category_id: Option<String>,
    pub status: String,
    pub membership_open: bool,
    #[schema(format = "uuid")]
    pub created_by: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<ClubPayload> for ClubBody {
    fn from(value: ClubPayload) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            logo: value.logo,
            category_id: value.category_id.map(|id| id.to_string()),
            status: value.status.to_string(),
            membership_open: value.membership_open,
            created_by: value.created_by.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Request payload for proposing a club.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequestBody {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    #[schema(format = "uuid")]
    pub category_id: Option<String>,
}

/// Request payload for opening or closing a club to join requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipOpenBody {
    pub open: bool,
}

/// Query parameters for the club directory.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListClubsQuery {
    pub status: Option<String>,
}

fn parse_create_request(body: CreateClubRequestBody) -> Result<CreateClubRequest, Error> {
    let category_id = body
        .category_id
        .map(|raw| parse_uuid(&raw, FieldName::new("categoryId")))
        .transpose()?;
    Ok(CreateClubRequest {
        name: body.name,
        description: body.description,
        logo: body.logo,
        category_id,
    })
}

/// Propose a new club. It stays pending until an administrator reviews it.
#[utoipa::path(
    post,
    path = "/api/v1/clubs",
    request_body = CreateClubRequestBody,
    responses(
        (status = 200, description = "Club proposed", body = ClubBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "createClub",
    security(("SessionCookie" = []))
)]
#[post("/clubs")]
pub async fn create_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateClubRequestBody>,
) -> ApiResult<web::Json<ClubBody>> {
    let user_id = session.require_user_id()?;
    let request = parse_create_request(payload.into_inner())?;
    let club = state.clubs.create_club(request, &user_id).await?;
    Ok(web::Json(ClubBody::from(club)))
}

/// Club directory. Administrators may filter by lifecycle status.
#[utoipa::path(
    get,
    path = "/api/v1/clubs",
    params(
        ("status" = Option<String>, Query, description = "Lifecycle filter (administrators only)")
    ),
    responses(
        (status = 200, description = "Clubs", body = [ClubBody]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "listClubs",
    security(("SessionCookie" = []))
)]
#[get("/clubs")]
pub async fn list_clubs(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListClubsQuery>,
) -> ApiResult<web::Json<Vec<ClubBody>>> {
    let user_id = session.require_user_id()?;
    let status = parse_status_filter(query.status.as_deref())?;
    let clubs = state.clubs_query.list_clubs(status, &user_id).await?;
    Ok(web::Json(clubs.into_iter().map(ClubBody::from).collect()))
}

/// Fetch a single club, subject to visibility rules.
#[utoipa::path(
    get,
    path = "/api/v1/clubs/{club_id}",
    params(
        ("club_id" = String, Path, description = "Club identifier")
    ),
    responses(
        (status = 200, description = "Club", body = ClubBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "getClub",
    security(("SessionCookie" = []))
)]
#[get("/clubs/{club_id}")]
pub async fn get_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<ClubBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.into_inner().club_id)?;
    let club = state.clubs_query.get_club(&club_id, &user_id).await?;
    Ok(web::Json(ClubBody::from(club)))
}

/// Approve a pending club, installing its creator as president.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/approve",
    params(
        ("club_id" = String, Path, description = "Club identifier")
    ),
    responses(
        (status = 200, description = "Club approved", body = ClubBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Not a platform administrator", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Club is not pending", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "approveClub",
    security(("SessionCookie" = []))
)]
#[post("/clubs/{club_id}/approve")]
pub async fn approve_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<ClubBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.into_inner().club_id)?;
    let club = state.clubs.approve_club(&club_id, &user_id).await?;
    Ok(web::Json(ClubBody::from(club)))
}

/// Reject a pending club, parking it as suspended.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/reject",
    params(
        ("club_id" = String, Path, description = "Club identifier")
    ),
    responses(
        (status = 200, description = "Club rejected", body = ClubBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Not a platform administrator", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Club is not pending", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "rejectClub",
    security(("SessionCookie" = []))
)]
#[post("/clubs/{club_id}/reject")]
pub async fn reject_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<ClubBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.into_inner().club_id)?;
    let club = state.clubs.reject_club(&club_id, &user_id).await?;
    Ok(web::Json(ClubBody::from(club)))
}

/// Open or close the club to new join requests. President only.
#[utoipa::path(
    put,
    path = "/api/v1/clubs/{club_id}/membership-open",
    request_body = MembershipOpenBody,
    params(
        ("club_id" = String, Path, description = "Club identifier")
    ),
    responses(
        (status = 200, description = "Flag updated", body = ClubBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["clubs"],
    operation_id = "setMembershipOpen",
    security(("SessionCookie" = []))
)]
#[put("/clubs/{club_id}/membership-open")]
pub async fn set_membership_open(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
    payload: web::Json<MembershipOpenBody>,
) -> ApiResult<web::Json<ClubBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.into_inner().club_id)?;
    let club = state
        .clubs
        .set_membership_open(&club_id, payload.open, &user_id)
        .await?;
    Ok(web::Json(ClubBody::from(club)))
}

#[cfg(test)]
#[path = "clubs_tests.rs"]
mod tests;

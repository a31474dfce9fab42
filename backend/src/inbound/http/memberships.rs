//! Membership lifecycle handlers.
//!
//! ```text
//! GET    /api/v1/clubs/{club_id}/membership                 own standing
//! POST   /api/v1/clubs/{club_id}/join                       request to join
//! DELETE /api/v1/clubs/{club_id}/membership                 cancel or leave
//! GET    /api/v1/clubs/{club_id}/members                    member directory
//! POST   /api/v1/clubs/{club_id}/members/{user_id}/approve  approve request
//! POST   /api/v1/clubs/{club_id}/members/{user_id}/reject   reject request
//! DELETE /api/v1/clubs/{club_id}/members/{user_id}          remove member
//! POST   /api/v1/clubs/{club_id}/president/{user_id}        hand off presidency
//! ```
//!
//! Role checks live in the domain services; handlers translate identifiers,
//! delegate, and shape the response.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::Error;
use crate::domain::membership::MembershipStatus;
use crate::domain::ports::{HandoffResponse, MemberPayload, MembershipActionResponse, RoleAssignment};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_club_id, parse_user_id};

#[derive(Debug, Deserialize)]
struct ClubPath {
    club_id: String,
}

#[derive(Debug, Deserialize)]
struct ClubMemberPath {
    club_id: String,
    user_id: String,
}

/// Outcome of a membership mutation.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipActionBody {
    /// The subject's standing after the mutation.
    pub status: MembershipStatus,
    /// Translation key describing what happened.
    pub message_key: String,
}

impl From<MembershipActionResponse> for MembershipActionBody {
    fn from(value: MembershipActionResponse) -> Self {
        Self {
            status: value.status,
            message_key: value.message_key,
        }
    }
}

/// One side of a completed presidency handoff.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub role: String,
}

impl From<RoleAssignment> for RoleAssignmentBody {
    fn from(value: RoleAssignment) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            role: value.role.to_string(),
        }
    }
}

/// Outcome of a presidency handoff, naming both parties' new roles.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandoffBody {
    pub outgoing: RoleAssignmentBody,
    pub incoming: RoleAssignmentBody,
    /// Translation key describing what happened.
    pub message_key: String,
}

impl From<HandoffResponse> for HandoffBody {
    fn from(value: HandoffResponse) -> Self {
        Self {
            outgoing: value.outgoing.into(),
            incoming: value.incoming.into(),
            message_key: value.message_key,
        }
    }
}

/// Directory entry in a club's member list.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: String,
    #[schema(format = "date-time")]
    pub since: String,
}

impl From<MemberPayload> for MemberBody {
    fn from(value: MemberPayload) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            username: value.username,
            display_name: value.display_name,
            avatar: value.avatar,
            role: value.role.to_string(),
            since: value.since.to_rfc3339(),
        }
    }
}

/// Report the acting user's standing in a club.
#[utoipa::path(
    get,
    path = "/api/v1/clubs/{club_id}/membership",
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Current standing", body = MembershipStatus),
        (status = 400, description = "Malformed club identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "getMembershipStatus",
    security(("SessionCookie" = [])),
)]
#[get("/clubs/{club_id}/membership")]
pub async fn membership_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<MembershipStatus>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let status = state.membership_query.status(&club_id, &user_id).await?;
    Ok(web::Json(status))
}

/// Request to join a club.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/join",
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Join request recorded", body = MembershipActionBody),
        (status = 400, description = "Malformed club identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Club not found", body = Error),
        (status = 409, description = "Already joined, already pending, or club closed", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "joinClub",
    security(("SessionCookie" = [])),
)]
#[post("/clubs/{club_id}/join")]
pub async fn join_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<MembershipActionBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let response = state.membership.request_join(&club_id, &user_id).await?;
    Ok(web::Json(response.into()))
}

/// Withdraw a pending request or leave a club.
///
/// Presidents cannot leave; the presidency must be handed off first.
#[utoipa::path(
    delete,
    path = "/api/v1/clubs/{club_id}/membership",
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Membership ended", body = MembershipActionBody),
        (status = 400, description = "Malformed club identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No membership to end", body = Error),
        (status = 409, description = "Presidents must hand off first", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "leaveClub",
    security(("SessionCookie" = [])),
)]
#[delete("/clubs/{club_id}/membership")]
pub async fn leave_club(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<MembershipActionBody>> {
    let user_id = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let response = state.membership.cancel_or_leave(&club_id, &user_id).await?;
    Ok(web::Json(response.into()))
}

/// List a club's members and pending applicants.
#[utoipa::path(
    get,
    path = "/api/v1/clubs/{club_id}/members",
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Member directory", body = Vec<MemberBody>),
        (status = 400, description = "Malformed club identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Club not found", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "listMembers",
    security(("SessionCookie" = [])),
)]
#[get("/clubs/{club_id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<Vec<MemberBody>>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let members = state.membership_query.list_members(&club_id, &acting).await?;
    Ok(web::Json(members.into_iter().map(Into::into).collect()))
}

/// Approve a pending join request.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/members/{user_id}/approve",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("user_id" = String, Path, description = "Applicant's user identifier"),
    ),
    responses(
        (status = 200, description = "Applicant approved", body = MembershipActionBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Club not found", body = Error),
        (status = 409, description = "No pending request for this user", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "approveMember",
    security(("SessionCookie" = [])),
)]
#[post("/clubs/{club_id}/members/{user_id}/approve")]
pub async fn approve_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubMemberPath>,
) -> ApiResult<web::Json<MembershipActionBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let target = parse_user_id(&path.user_id)?;
    let response = state.membership.approve(&club_id, &target, &acting).await?;
    Ok(web::Json(response.into()))
}

/// Reject a pending join request.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/members/{user_id}/reject",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("user_id" = String, Path, description = "Applicant's user identifier"),
    ),
    responses(
        (status = 200, description = "Request rejected", body = MembershipActionBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Club not found", body = Error),
        (status = 409, description = "No pending request for this user", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "rejectMember",
    security(("SessionCookie" = [])),
)]
#[post("/clubs/{club_id}/members/{user_id}/reject")]
pub async fn reject_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubMemberPath>,
) -> ApiResult<web::Json<MembershipActionBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let target = parse_user_id(&path.user_id)?;
    let response = state.membership.reject(&club_id, &target, &acting).await?;
    Ok(web::Json(response.into()))
}

/// Remove a member or applicant from a club.
///
/// The president is not removable; hand off the presidency first.
#[utoipa::path(
    delete,
    path = "/api/v1/clubs/{club_id}/members/{user_id}",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("user_id" = String, Path, description = "Member's user identifier"),
    ),
    responses(
        (status = 200, description = "Member removed", body = MembershipActionBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not a club officer", body = Error),
        (status = 404, description = "Club not found", body = Error),
        (status = 409, description = "Target is not removable", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "removeMember",
    security(("SessionCookie" = [])),
)]
#[delete("/clubs/{club_id}/members/{user_id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubMemberPath>,
) -> ApiResult<web::Json<MembershipActionBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let target = parse_user_id(&path.user_id)?;
    let response = state.membership.remove(&club_id, &target, &acting).await?;
    Ok(web::Json(response.into()))
}

/// Hand the presidency to another active member.
///
/// The session is renewed on success so the demoted browser session picks up
/// a fresh cookie alongside its reduced role.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/president/{user_id}",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("user_id" = String, Path, description = "Incoming president's user identifier"),
    ),
    responses(
        (status = 200, description = "Presidency handed off", body = HandoffBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Club not found", body = Error),
        (status = 409, description = "Target is not an active member", body = Error),
    ),
    tags = ["memberships"],
    operation_id = "changePresident",
    security(("SessionCookie" = [])),
)]
#[post("/clubs/{club_id}/president/{user_id}")]
pub async fn change_president(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubMemberPath>,
) -> ApiResult<web::Json<HandoffBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let target = parse_user_id(&path.user_id)?;
    let response = state
        .membership
        .change_president(&club_id, &target, &acting)
        .await?;
    session.renew();
    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "memberships_tests.rs"]
mod tests;

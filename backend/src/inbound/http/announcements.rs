//! Announcement handlers.
//!
//! ```text
//! POST   /api/v1/clubs/{club_id}/announcements                     post
//! GET    /api/v1/clubs/{club_id}/announcements                     list
//! GET    /api/v1/clubs/{club_id}/announcements/{announcement_id}   fetch one
//! PUT    /api/v1/clubs/{club_id}/announcements/{announcement_id}   edit
//! DELETE /api/v1/clubs/{club_id}/announcements/{announcement_id}   delete
//! ```
//!
//! Writes are restricted to the club president; reads are open to any
//! authenticated user once the club is approved.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::Error;
use crate::domain::ports::{AnnouncementContentRequest, AnnouncementPayload};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_announcement_id, parse_club_id};

#[derive(Debug, Deserialize)]
struct ClubPath {
    club_id: String,
}

#[derive(Debug, Deserialize)]
struct ClubAnnouncementPath {
    club_id: String,
    announcement_id: String,
}

/// Announcement as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub club_id: String,
    #[schema(format = "uuid")]
    pub author_id: String,
    pub title: String,
    pub body: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<AnnouncementPayload> for AnnouncementBody {
    fn from(value: AnnouncementPayload) -> Self {
        Self {
            id: value.id.to_string(),
            club_id: value.club_id.to_string(),
            author_id: value.author_id.to_string(),
            title: value.title,
            body: value.body,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Title and body for a new or edited announcement.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementContentBody {
    pub title: String,
    pub body: String,
}

impl From<AnnouncementContentBody> for AnnouncementContentRequest {
    fn from(value: AnnouncementContentBody) -> Self {
        Self {
            title: value.title,
            body: value.body,
        }
    }
}

/// Post an announcement to a club.
#[utoipa::path(
    post,
    path = "/api/v1/clubs/{club_id}/announcements",
    request_body = AnnouncementContentBody,
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Announcement posted", body = AnnouncementBody),
        (status = 400, description = "Malformed identifier or blank content", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Club not found", body = Error),
    ),
    tags = ["announcements"],
    operation_id = "postAnnouncement",
    security(("SessionCookie" = [])),
)]
#[post("/clubs/{club_id}/announcements")]
pub async fn post_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
    payload: web::Json<AnnouncementContentBody>,
) -> ApiResult<web::Json<AnnouncementBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let posted = state
        .announcements
        .post(&club_id, &acting, payload.into_inner().into())
        .await?;
    Ok(web::Json(posted.into()))
}

/// List a club's announcements, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/clubs/{club_id}/announcements",
    params(("club_id" = String, Path, description = "Club identifier")),
    responses(
        (status = 200, description = "Announcements, newest first", body = Vec<AnnouncementBody>),
        (status = 400, description = "Malformed club identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
    ),
    tags = ["announcements"],
    operation_id = "listAnnouncements",
    security(("SessionCookie" = [])),
)]
#[get("/clubs/{club_id}/announcements")]
pub async fn list_announcements(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubPath>,
) -> ApiResult<web::Json<Vec<AnnouncementBody>>> {
    session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let announcements = state.announcements_query.list(&club_id).await?;
    Ok(web::Json(
        announcements.into_iter().map(Into::into).collect(),
    ))
}

/// Fetch a single announcement.
#[utoipa::path(
    get,
    path = "/api/v1/clubs/{club_id}/announcements/{announcement_id}",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("announcement_id" = String, Path, description = "Announcement identifier"),
    ),
    responses(
        (status = 200, description = "The announcement", body = AnnouncementBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Announcement not found", body = Error),
    ),
    tags = ["announcements"],
    operation_id = "getAnnouncement",
    security(("SessionCookie" = [])),
)]
#[get("/clubs/{club_id}/announcements/{announcement_id}")]
pub async fn get_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubAnnouncementPath>,
) -> ApiResult<web::Json<AnnouncementBody>> {
    session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let announcement_id = parse_announcement_id(&path.announcement_id)?;
    let announcement = state
        .announcements_query
        .get(&club_id, &announcement_id)
        .await?;
    Ok(web::Json(announcement.into()))
}

/// Replace an announcement's title and body.
#[utoipa::path(
    put,
    path = "/api/v1/clubs/{club_id}/announcements/{announcement_id}",
    request_body = AnnouncementContentBody,
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("announcement_id" = String, Path, description = "Announcement identifier"),
    ),
    responses(
        (status = 200, description = "Announcement updated", body = AnnouncementBody),
        (status = 400, description = "Malformed identifier or blank content", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Announcement not found", body = Error),
    ),
    tags = ["announcements"],
    operation_id = "editAnnouncement",
    security(("SessionCookie" = [])),
)]
#[put("/clubs/{club_id}/announcements/{announcement_id}")]
pub async fn edit_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubAnnouncementPath>,
    payload: web::Json<AnnouncementContentBody>,
) -> ApiResult<web::Json<AnnouncementBody>> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let announcement_id = parse_announcement_id(&path.announcement_id)?;
    let updated = state
        .announcements
        .edit(&club_id, &announcement_id, &acting, payload.into_inner().into())
        .await?;
    Ok(web::Json(updated.into()))
}

/// Delete an announcement.
#[utoipa::path(
    delete,
    path = "/api/v1/clubs/{club_id}/announcements/{announcement_id}",
    params(
        ("club_id" = String, Path, description = "Club identifier"),
        ("announcement_id" = String, Path, description = "Announcement identifier"),
    ),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the club president", body = Error),
        (status = 404, description = "Announcement not found", body = Error),
    ),
    tags = ["announcements"],
    operation_id = "deleteAnnouncement",
    security(("SessionCookie" = [])),
)]
#[delete("/clubs/{club_id}/announcements/{announcement_id}")]
pub async fn delete_announcement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ClubAnnouncementPath>,
) -> ApiResult<HttpResponse> {
    let acting = session.require_user_id()?;
    let club_id = parse_club_id(&path.club_id)?;
    let announcement_id = parse_announcement_id(&path.announcement_id)?;
    state
        .announcements
        .delete(&club_id, &announcement_id, &acting)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "announcements_tests.rs"]
mod tests;

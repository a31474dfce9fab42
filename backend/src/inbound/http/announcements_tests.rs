//! Tests for announcement handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{FIXTURE_LOGIN_USER_ID, MockAnnouncementsQuery};
use crate::domain::{AnnouncementId, ClubId, UserId};
use crate::inbound::http::auth::{LoginRequestBody, login};
use crate::inbound::http::test_utils::test_session_middleware;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(post_announcement)
                .service(list_announcements)
                .service(get_announcement)
                .service(edit_announcement)
                .service(delete_announcement),
        )
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequestBody {
            username: "admin".into(),
            password: "password".into(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn post_echoes_the_content_with_author_and_club() {
    let club_id = ClubId::random();
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/clubs/{club_id}/announcements"))
        .cookie(cookie)
        .set_json(json!({
            "title": "Spring tournament",
            "body": "Sign-ups open Friday.",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("title").and_then(Value::as_str),
        Some("Spring tournament")
    );
    assert_eq!(
        body.get("clubId").and_then(Value::as_str),
        Some(club_id.as_ref())
    );
    assert_eq!(
        body.get("authorId").and_then(Value::as_str),
        Some(FIXTURE_LOGIN_USER_ID)
    );
    assert!(body.get("createdAt").and_then(Value::as_str).is_some());
}

#[actix_web::test]
async fn edit_keeps_the_announcement_id() {
    let club_id = ClubId::random();
    let announcement_id = AnnouncementId::random();
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!(
            "/api/v1/clubs/{club_id}/announcements/{announcement_id}"
        ))
        .cookie(cookie)
        .set_json(json!({
            "title": "Spring tournament (rescheduled)",
            "body": "Now starting a week later.",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some(announcement_id.as_ref())
    );
    assert_eq!(
        body.get("title").and_then(Value::as_str),
        Some("Spring tournament (rescheduled)")
    );
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/clubs/{}/announcements/{}",
            ClubId::random(),
            AnnouncementId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn list_returns_announcements_newest_first() {
    let club_id = ClubId::random();
    let author = UserId::random();
    let now = Utc::now();
    let newer = AnnouncementPayload {
        id: AnnouncementId::random(),
        club_id: club_id.clone(),
        author_id: author.clone(),
        title: "Second".to_owned(),
        body: "Later post.".to_owned(),
        created_at: now,
        updated_at: now,
    };
    let older = AnnouncementPayload {
        id: AnnouncementId::random(),
        club_id: club_id.clone(),
        author_id: author,
        title: "First".to_owned(),
        body: "Earlier post.".to_owned(),
        created_at: now - chrono::Duration::hours(1),
        updated_at: now - chrono::Duration::hours(1),
    };
    let mut announcements_query = MockAnnouncementsQuery::new();
    let listed = vec![newer, older];
    announcements_query
        .expect_list()
        .times(1)
        .returning(move |_| Ok(listed.clone()));
    let mut state = HttpState::fixture();
    state.announcements_query = Arc::new(announcements_query);

    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/clubs/{club_id}/announcements"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("announcement array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("title").and_then(Value::as_str), Some("Second"));
    assert_eq!(rows[1].get("title").and_then(Value::as_str), Some("First"));
}

#[actix_web::test]
async fn get_reports_missing_announcements() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!(
            "/api/v1/clubs/{}/announcements/{}",
            ClubId::random(),
            AnnouncementId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_rejects_a_malformed_club_id() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/clubs/not-a-uuid/announcements")
        .cookie(cookie)
        .set_json(json!({
            "title": "Spring tournament",
            "body": "Sign-ups open Friday.",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("clubId"));
}

#[actix_web::test]
async fn announcements_require_a_session() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/clubs/{}/announcements", ClubId::random()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

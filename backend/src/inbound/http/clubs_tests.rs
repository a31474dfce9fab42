//! Tests for club lifecycle handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockClubQuery;
use crate::domain::{ClubId, ClubStatus};
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
                .service(create_club)
                .service(list_clubs)
                .service(get_club)
                .service(approve_club)
                .service(reject_club)
                .service(set_membership_open),
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
async fn create_club_returns_the_pending_proposal() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/clubs")
        .cookie(cookie)
        .set_json(json!({
            "name": "Chess Club",
            "description": "Weekly chess meetups for all levels",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Chess Club"));
    assert_eq!(body.get("status").and_then(Value::as_str), Some("pending"));
    assert_eq!(
        body.get("membershipOpen").and_then(Value::as_bool),
        Some(true)
    );
}

#[actix_web::test]
async fn create_club_rejects_a_malformed_category_id() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/clubs")
        .cookie(cookie)
        .set_json(json!({
            "name": "Chess Club",
            "description": "Weekly chess meetups for all levels",
            "categoryId": "not-a-uuid",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(
        details.get("field").and_then(Value::as_str),
        Some("categoryId")
    );
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("invalid_uuid")
    );
}

#[actix_web::test]
async fn create_club_requires_a_session() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/clubs")
        .set_json(json!({
            "name": "Chess Club",
            "description": "Weekly chess meetups for all levels",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn list_clubs_passes_the_status_filter_through() {
    let mut clubs_query = MockClubQuery::new();
    clubs_query
        .expect_list_clubs()
        .times(1)
        .withf(|status, _| *status == Some(ClubStatus::Pending))
        .returning(|_, acting| {
            Ok(vec![ClubPayload {
                id: ClubId::random(),
                name: "Chess Club".to_owned(),
                description: "Weekly chess meetups for all levels".to_owned(),
                logo: None,
                category_id: None,
                status: ClubStatus::Pending,
                membership_open: true,
                created_by: acting.clone(),
                created_at: Utc::now(),
            }])
        });
    let mut state = HttpState::fixture();
    state.clubs_query = Arc::new(clubs_query);

    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/clubs?status=pending")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("club array");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("status").and_then(Value::as_str),
        Some("pending")
    );
}

#[actix_web::test]
async fn list_clubs_rejects_an_unknown_status() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/clubs?status=archived")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("invalid_status")
    );
}

#[actix_web::test]
async fn get_club_reports_missing_clubs() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/clubs/{}", ClubId::random()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn get_club_rejects_a_malformed_id() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/clubs/not-a-uuid")
        .cookie(cookie)
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
async fn approve_club_echoes_the_approved_state() {
    let club_id = ClubId::random();
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/clubs/{club_id}/approve"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some(club_id.as_ref())
    );
    assert_eq!(body.get("status").and_then(Value::as_str), Some("approved"));
}

#[actix_web::test]
async fn set_membership_open_echoes_the_flag() {
    let club_id = ClubId::random();
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/clubs/{club_id}/membership-open"))
        .cookie(cookie)
        .set_json(json!({ "open": false }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("membershipOpen").and_then(Value::as_bool),
        Some(false)
    );
}

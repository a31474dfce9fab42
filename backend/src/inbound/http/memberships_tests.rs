//! Tests for membership lifecycle handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::membership::Role;
use crate::domain::ports::{FIXTURE_LOGIN_USER_ID, MockMembershipQuery};
use crate::domain::{ClubId, UserId};
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
                .service(membership_status)
                .service(join_club)
                .service(leave_club)
                .service(list_members)
                .service(approve_member)
                .service(reject_member)
                .service(remove_member)
                .service(change_president),
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
async fn membership_status_reports_absent_standing() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/clubs/{}/membership", ClubId::random()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("isMember").and_then(Value::as_bool), Some(false));
    assert_eq!(body.get("isPending").and_then(Value::as_bool), Some(false));
    assert_eq!(
        body.get("isPresident").and_then(Value::as_bool),
        Some(false)
    );
}

#[actix_web::test]
async fn join_reports_a_pending_request() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/clubs/{}/join", ClubId::random()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/status/isPending").and_then(Value::as_bool),
        Some(true)
    );
    assert_eq!(
        body.get("messageKey").and_then(Value::as_str),
        Some("club.join.requested")
    );
}

#[actix_web::test]
async fn leave_reports_the_departure() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/clubs/{}/membership", ClubId::random()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/status/isMember").and_then(Value::as_bool),
        Some(false)
    );
    assert_eq!(
        body.get("messageKey").and_then(Value::as_str),
        Some("club.member.left")
    );
}

#[actix_web::test]
async fn approve_promotes_the_applicant() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!(
            "/api/v1/clubs/{}/members/{}/approve",
            ClubId::random(),
            UserId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/status/isMember").and_then(Value::as_bool),
        Some(true)
    );
    assert_eq!(
        body.get("messageKey").and_then(Value::as_str),
        Some("club.member.approved")
    );
}

#[actix_web::test]
async fn change_president_swaps_roles_and_reissues_the_cookie() {
    let target = UserId::random();
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri(&format!(
            "/api/v1/clubs/{}/president/{target}",
            ClubId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let renewed = response
        .response()
        .cookies()
        .any(|cookie| cookie.name() == "session");
    assert!(renewed, "handoff should renew the session cookie");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/outgoing/userId").and_then(Value::as_str),
        Some(FIXTURE_LOGIN_USER_ID)
    );
    assert_eq!(
        body.pointer("/outgoing/role").and_then(Value::as_str),
        Some("member")
    );
    assert_eq!(
        body.pointer("/incoming/userId").and_then(Value::as_str),
        Some(target.as_ref())
    );
    assert_eq!(
        body.pointer("/incoming/role").and_then(Value::as_str),
        Some("president")
    );
    assert_eq!(
        body.get("messageKey").and_then(Value::as_str),
        Some("club.president.transferred")
    );
}

#[actix_web::test]
async fn list_members_returns_the_directory_in_camel_case() {
    let member_id = UserId::random();
    let since = Utc::now();
    let mut membership_query = MockMembershipQuery::new();
    let payload = MemberPayload {
        user_id: member_id.clone(),
        username: "grace".to_owned(),
        display_name: "Grace Hopper".to_owned(),
        avatar: Some("/avatars/grace.png".to_owned()),
        role: Role::President,
        since,
    };
    membership_query
        .expect_list_members()
        .times(1)
        .returning(move |_, _| Ok(vec![payload.clone()]));
    let mut state = HttpState::fixture();
    state.membership_query = Arc::new(membership_query);

    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/clubs/{}/members", ClubId::random()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("member array");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("userId").and_then(Value::as_str),
        Some(member_id.as_ref())
    );
    assert_eq!(
        rows[0].get("displayName").and_then(Value::as_str),
        Some("Grace Hopper")
    );
    assert_eq!(
        rows[0].get("avatar").and_then(Value::as_str),
        Some("/avatars/grace.png")
    );
    assert_eq!(
        rows[0].get("role").and_then(Value::as_str),
        Some("president")
    );
    assert_eq!(
        rows[0].get("since").and_then(Value::as_str),
        Some(since.to_rfc3339().as_str())
    );
}

#[actix_web::test]
async fn remove_rejects_a_malformed_user_id() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/clubs/{}/members/not-a-uuid",
            ClubId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("userId"));
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("invalid_uuid")
    );
}

#[rstest]
#[case::join("POST", "join")]
#[case::status("GET", "membership")]
#[actix_web::test]
async fn membership_routes_require_a_session(#[case] method: &str, #[case] tail: &str) {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;

    let uri = format!("/api/v1/clubs/{}/{tail}", ClubId::random());
    let builder = match method {
        "POST" => actix_test::TestRequest::post(),
        _ => actix_test::TestRequest::get(),
    };
    let response = actix_test::call_service(&app, builder.uri(&uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

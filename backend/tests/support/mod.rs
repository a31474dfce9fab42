//! Shared helpers for the lifecycle integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the wiring they all need lives here: handler state assembled from the
//! real domain services over the in-memory adapters, user seeding, and
//! session cookie management. Suites that only use a subset include this
//! module with `dead_code` allowed.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::domain::ports::UserRepository;
use backend::domain::{
    AnnouncementsCommandService, AnnouncementsQueryService, ClubCommandService, ClubLockRegistry,
    ClubQueryService, DisplayName, MembershipCommandService, MembershipQueryService,
    PasswordDigest, User, UserId, Username, UsersQueryService,
};
use backend::inbound::http::announcements::{
    delete_announcement, edit_announcement, get_announcement, list_announcements,
    post_announcement,
};
use backend::inbound::http::auth::{login, logout};
use backend::inbound::http::clubs::{
    approve_club, create_club, get_club, list_clubs, reject_club, set_membership_open,
};
use backend::inbound::http::memberships::{
    approve_member, change_president, join_club, leave_club, list_members, membership_status,
    reject_member, remove_member,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::test_utils::test_session_middleware;
use backend::inbound::http::users::{me, my_memberships};
use backend::outbound::persistence::{
    MemoryAnnouncementRepository, MemoryClubRepository, MemoryLoginService,
    MemoryMembershipRepository, MemoryUserRepository,
};

/// Password shared by every seeded test user.
pub const PASSWORD: &str = "password";

/// Handler state wired through the real domain services over the in-memory
/// adapters, mirroring the production wiring. Returns the user store so
/// tests can seed accounts before signing in.
pub fn memory_state() -> (HttpState, MemoryUserRepository) {
    let users = MemoryUserRepository::new();
    let club_repo = Arc::new(MemoryClubRepository::new());
    let membership_repo = Arc::new(MemoryMembershipRepository::new(users.clone()));
    let user_repo = Arc::new(users.clone());
    let announcement_repo = Arc::new(MemoryAnnouncementRepository::new());
    let locks = Arc::new(ClubLockRegistry::new());

    let state = HttpState {
        login: Arc::new(MemoryLoginService::new(users.clone())),
        users: Arc::new(UsersQueryService::new(user_repo.clone())),
        membership: Arc::new(MembershipCommandService::new(
            club_repo.clone(),
            membership_repo.clone(),
            locks.clone(),
        )),
        membership_query: Arc::new(MembershipQueryService::new(
            club_repo.clone(),
            membership_repo.clone(),
        )),
        clubs: Arc::new(ClubCommandService::new(
            club_repo.clone(),
            membership_repo.clone(),
            user_repo.clone(),
            locks,
        )),
        clubs_query: Arc::new(ClubQueryService::new(club_repo.clone(), user_repo)),
        announcements: Arc::new(AnnouncementsCommandService::new(
            club_repo.clone(),
            membership_repo,
            announcement_repo.clone(),
        )),
        announcements_query: Arc::new(AnnouncementsQueryService::new(
            club_repo,
            announcement_repo,
        )),
    };
    (state, users)
}

/// Insert a user with the shared test password and return their identifier.
pub async fn seed_user(
    users: &MemoryUserRepository,
    username: &str,
    display_name: &str,
    admin: bool,
) -> UserId {
    let user = User::new(
        UserId::random(),
        Username::new(username).expect("valid username"),
        DisplayName::new(display_name).expect("valid display name"),
        admin,
    );
    users
        .insert(&user, &PasswordDigest::from_password(PASSWORD))
        .await
        .expect("seed user");
    user.id().clone()
}

/// Application with the full `/api/v1` surface behind the test session
/// middleware.
pub fn lifecycle_app(
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
                .service(logout)
                .service(me)
                .service(my_memberships)
                .service(create_club)
                .service(list_clubs)
                .service(get_club)
                .service(approve_club)
                .service(reject_club)
                .service(set_membership_open)
                .service(membership_status)
                .service(join_club)
                .service(leave_club)
                .service(list_members)
                .service(approve_member)
                .service(reject_member)
                .service(remove_member)
                .service(change_president)
                .service(post_announcement)
                .service(list_announcements)
                .service(get_announcement)
                .service(edit_announcement)
                .service(delete_announcement),
        )
}

/// Sign in as a seeded user and return the session cookie.
pub async fn login_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "login as {username} failed with {}",
        response.status(),
    );
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Issue a request under the given session and return the status with the
/// decoded JSON body. Empty bodies decode as [`Value::Null`].
pub async fn send_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    method: Method,
    path: &str,
    cookie: &Cookie<'static>,
    payload: Option<&Value>,
) -> (StatusCode, Value) {
    let mut request = actix_test::TestRequest::default()
        .method(method)
        .uri(path)
        .cookie(cookie.clone());
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json response body")
    };
    (status, body)
}

/// Propose a club as the founder and approve it as the administrator,
/// returning the new club's identifier.
pub async fn publish_club(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    founder_cookie: &Cookie<'static>,
    admin_cookie: &Cookie<'static>,
    name: &str,
    description: &str,
) -> String {
    let (status, club) = send_json(
        app,
        Method::POST,
        "/api/v1/clubs",
        founder_cookie,
        Some(&json!({ "name": name, "description": description })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "club proposal failed: {club}");
    let club_id = club["id"].as_str().expect("club id").to_owned();

    let (status, approved) = send_json(
        app,
        Method::POST,
        &format!("/api/v1/clubs/{club_id}/approve"),
        admin_cookie,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "club approval failed: {approved}");
    club_id
}

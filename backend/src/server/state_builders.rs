//! Builders for the HTTP state, selecting Diesel or fixture ports.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    FixtureAnnouncementsCommand, FixtureAnnouncementsQuery, FixtureClubCommand, FixtureClubQuery,
    FixtureLoginService, FixtureMembershipCommand, FixtureMembershipQuery, FixtureUsersQuery,
};
use backend::domain::{
    AnnouncementsCommandService, AnnouncementsQueryService, ClubCommandService, ClubLockRegistry,
    ClubQueryService, MembershipCommandService, MembershipQueryService, UsersQueryService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselAnnouncementRepository, DieselClubRepository, DieselLoginService,
    DieselMembershipRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Pick the database-backed state when a pool is available, otherwise fall
/// back to fixture ports so the API stays responsive without a database.
fn select_http_state<Pool>(
    pool: &Option<Pool>,
    database_backed: impl FnOnce(&Pool) -> HttpState,
    fixtures: impl FnOnce() -> HttpState,
) -> HttpState {
    match pool {
        Some(pool) => database_backed(pool),
        None => fixtures(),
    }
}

/// Wire every port to its Diesel adapter over the shared pool.
///
/// The club and membership command services share one lock registry so
/// per-club write serialisation covers both entry points.
fn diesel_state(pool: &DbPool) -> HttpState {
    let club_repo = Arc::new(DieselClubRepository::new(pool.clone()));
    let membership_repo = Arc::new(DieselMembershipRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let announcement_repo = Arc::new(DieselAnnouncementRepository::new(pool.clone()));
    let locks = Arc::new(ClubLockRegistry::new());

    HttpState {
        login: Arc::new(DieselLoginService::new(pool.clone())),
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
        announcements_query: Arc::new(AnnouncementsQueryService::new(club_repo, announcement_repo)),
    }
}

fn fixture_state() -> HttpState {
    HttpState {
        login: Arc::new(FixtureLoginService),
        users: Arc::new(FixtureUsersQuery),
        membership: Arc::new(FixtureMembershipCommand),
        membership_query: Arc::new(FixtureMembershipQuery),
        clubs: Arc::new(FixtureClubCommand),
        clubs_query: Arc::new(FixtureClubQuery),
        announcements: Arc::new(FixtureAnnouncementsCommand),
        announcements_query: Arc::new(FixtureAnnouncementsQuery),
    }
}

/// Build the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(select_http_state(
        &config.db_pool,
        diesel_state,
        fixture_state,
    ))
}

//! Shared application state for HTTP handlers.
//!
//! Handlers receive [`HttpState`] via `actix_web::web::Data`, so they depend
//! only on domain ports (use-cases) and stay testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnnouncementsCommand, AnnouncementsQuery, ClubCommand, ClubQuery, LoginService,
    MembershipCommand, MembershipQuery, UsersQuery,
};

/// Port bundle shared across HTTP handlers.
///
/// Every field is an `Arc<dyn Port>` so tests can swap in fixtures or mocks
/// without touching the handler code.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Profile lookups for the authenticated user.
    pub users: Arc<dyn UsersQuery>,
    /// Membership lifecycle commands (join, leave, approve, handoff).
    pub membership: Arc<dyn MembershipCommand>,
    /// Membership reads (status, rosters, per-user listings).
    pub membership_query: Arc<dyn MembershipQuery>,
    /// Club lifecycle commands (submit, approve, reject, open flag).
    pub clubs: Arc<dyn ClubCommand>,
    /// Club reads (detail and directory listings).
    pub clubs_query: Arc<dyn ClubQuery>,
    /// Announcement commands (post, edit, delete).
    pub announcements: Arc<dyn AnnouncementsCommand>,
    /// Announcement reads (club feeds).
    pub announcements_query: Arc<dyn AnnouncementsQuery>,
}

#[cfg(any(test, feature = "test-support"))]
impl HttpState {
    /// Build a state bundle backed entirely by fixture ports.
    ///
    /// Tests override individual fields after construction when they need a
    /// mock for one port and fixtures for the rest.
    #[must_use]
    pub fn fixture() -> Self {
        use crate::domain::ports::{
            FixtureAnnouncementsCommand, FixtureAnnouncementsQuery, FixtureClubCommand,
            FixtureClubQuery, FixtureLoginService, FixtureMembershipCommand,
            FixtureMembershipQuery, FixtureUsersQuery,
        };

        Self {
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
}

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod announcement_repository;
mod announcements_command;
mod announcements_query;
mod club_command;
mod club_query;
mod club_repository;
mod login_service;
mod membership_command;
mod membership_query;
mod membership_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use announcement_repository::MockAnnouncementRepository;
pub use announcement_repository::{
    AnnouncementRepository, AnnouncementRepositoryError, FixtureAnnouncementRepository,
};
#[cfg(test)]
pub use announcements_command::MockAnnouncementsCommand;
pub use announcements_command::{
    AnnouncementContentRequest, AnnouncementPayload, AnnouncementsCommand,
    FixtureAnnouncementsCommand,
};
#[cfg(test)]
pub use announcements_query::MockAnnouncementsQuery;
pub use announcements_query::{AnnouncementsQuery, FixtureAnnouncementsQuery};
#[cfg(test)]
pub use club_command::MockClubCommand;
pub use club_command::{ClubCommand, ClubPayload, CreateClubRequest, FixtureClubCommand};
#[cfg(test)]
pub use club_query::MockClubQuery;
pub use club_query::{ClubQuery, FixtureClubQuery};
#[cfg(test)]
pub use club_repository::MockClubRepository;
pub use club_repository::{ClubRepository, ClubRepositoryError, FixtureClubRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_LOGIN_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use membership_command::MockMembershipCommand;
pub use membership_command::{
    FixtureMembershipCommand, HandoffResponse, MembershipActionResponse, MembershipCommand,
    RoleAssignment,
};
#[cfg(test)]
pub use membership_query::MockMembershipQuery;
pub use membership_query::{
    FixtureMembershipQuery, MemberPayload, MembershipQuery, UserMembershipPayload,
};
#[cfg(test)]
pub use membership_repository::MockMembershipRepository;
pub use membership_repository::{
    FixtureMembershipRepository, MembershipRepository, MembershipRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UserPayload, UsersQuery};

//! Domain model for the club membership lifecycle.
//!
//! Purpose: Define strongly typed entities, the role transition rules, and
//! the ports the transport and persistence layers plug into. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Layout:
//! - Entities: `user`, `auth`, `club`, `membership`, `announcement`.
//! - Rules: `transition` (pure role transition decisions), `report`
//!   (outcome logging), `club_locks` (per-club write serialisation).
//! - Ports: `ports` (driven repositories and driving service traits).
//! - Services: `*_service` modules wiring rules onto the ports.

pub mod announcement;
pub mod announcement_service;
pub mod auth;
pub mod club;
pub mod club_locks;
pub mod club_service;
pub mod error;
pub mod membership;
pub mod membership_service;
pub mod ports;
pub mod report;
pub mod trace_id;
pub mod transition;
pub mod user;
pub mod user_service;

pub use self::announcement::{
    Announcement, AnnouncementBody, AnnouncementId, AnnouncementTitle,
    AnnouncementValidationError,
};
pub use self::announcement_service::{AnnouncementsCommandService, AnnouncementsQueryService};
pub use self::auth::{AuthValidationError, LoginCredentials, PasswordDigest};
pub use self::club::{
    Club, ClubDescription, ClubId, ClubName, ClubStatus, ClubValidationError,
};
pub use self::club_locks::ClubLockRegistry;
pub use self::club_service::{ClubCommandService, ClubQueryService};
pub use self::error::{Error, ErrorCode};
pub use self::membership::{MemberProfile, Membership, MembershipStatus, Role};
pub use self::membership_service::{MembershipCommandService, MembershipQueryService};
pub use self::report::LifecycleOutcome;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transition::{LifecycleError, LifecycleErrorKind};
pub use self::user::{DisplayName, User, UserId, UserValidationError, Username};
pub use self::user_service::UsersQueryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

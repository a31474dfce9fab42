//! Role transition engine for club memberships.
//!
//! Every membership mutation is decided here as a pure function from the
//! observed state to a [`Transition`], so the rules stay in one place and the
//! services only orchestrate persistence. The state machine:
//!
//! ```text
//! (absent) --RequestJoin--> pending --Approve--> member
//! pending --CancelOrLeave/Reject/Remove--> (absent)
//! member/vice_president --CancelOrLeave/Remove--> (absent)
//! member/vice_president --ChangePresident--> president
//! president --ChangePresident (displaced)--> member
//! ```
//!
//! `president` is terminal except through a handoff. Authorization is part of
//! the engine: approve, reject, remove, and handoff all demand the acting
//! user currently holds the `president` role in the same club.

use serde_json::json;
use thiserror::Error as ThisError;

use crate::domain::club::Club;
use crate::domain::error::Error;
use crate::domain::membership::Role;

/// Key under which outcome message keys travel in error details.
pub const DETAILS_MESSAGE_KEY: &str = "messageKey";

/// Broad category of a lifecycle failure, used to pick the wire error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleErrorKind {
    /// The request is legal but contradicts the current membership state.
    StateConflict,
    /// The acting user lacks the required role.
    Authorization,
    /// Applying the request would break a structural invariant.
    InvariantViolation,
    /// A referenced club, user, or record does not exist.
    NotFound,
}

/// Typed failure raised by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LifecycleError {
    #[error("user is already a member of this club")]
    AlreadyMember,
    #[error("a join request for this club is already pending")]
    AlreadyPending,
    #[error("membership is not pending approval")]
    NotPending,
    #[error("club is not accepting new members")]
    ClubClosed,
    #[error("club is not awaiting review")]
    ClubNotPending,
    #[error("acting user is not authorised to perform this action")]
    NotAuthorized,
    #[error("president must hand off the role before leaving")]
    PresidentMustHandoff,
    #[error("the president cannot be removed from the club")]
    CannotRemovePresident,
    #[error("target user is not an active member of this club")]
    TargetNotMember,
    #[error("no membership exists for this club and user")]
    MembershipNotFound,
    #[error("club not found")]
    ClubNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("announcement not found")]
    AnnouncementNotFound,
}

impl LifecycleError {
    /// Category used to choose the transport status.
    pub fn kind(&self) -> LifecycleErrorKind {
        match self {
            Self::AlreadyMember
            | Self::AlreadyPending
            | Self::NotPending
            | Self::ClubClosed
            | Self::ClubNotPending => LifecycleErrorKind::StateConflict,
            Self::NotAuthorized => LifecycleErrorKind::Authorization,
            Self::PresidentMustHandoff | Self::CannotRemovePresident | Self::TargetNotMember => {
                LifecycleErrorKind::InvariantViolation
            }
            Self::MembershipNotFound
            | Self::ClubNotFound
            | Self::UserNotFound
            | Self::AnnouncementNotFound => LifecycleErrorKind::NotFound,
        }
    }

    /// Stable message key clients translate into user-facing text.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::AlreadyMember => "club.join.already_member",
            Self::AlreadyPending => "club.join.already_pending",
            Self::ClubClosed => "club.join.closed",
            Self::NotPending => "club.member.not_pending",
            Self::ClubNotPending => "club.lifecycle.not_pending",
            Self::NotAuthorized => "club.action.not_authorized",
            Self::PresidentMustHandoff => "club.leave.president_must_handoff",
            Self::CannotRemovePresident => "club.member.cannot_remove_president",
            Self::TargetNotMember => "club.handoff.target_not_member",
            Self::MembershipNotFound => "club.membership.not_found",
            Self::ClubNotFound => "club.not_found",
            Self::UserNotFound => "user.not_found",
            Self::AnnouncementNotFound => "club.announcement.not_found",
        }
    }
}

impl From<LifecycleError> for Error {
    fn from(err: LifecycleError) -> Self {
        let base = match err.kind() {
            LifecycleErrorKind::StateConflict | LifecycleErrorKind::InvariantViolation => {
                Error::conflict(err.to_string())
            }
            LifecycleErrorKind::Authorization => Error::forbidden(err.to_string()),
            LifecycleErrorKind::NotFound => Error::not_found(err.to_string()),
        };
        base.with_details(json!({ DETAILS_MESSAGE_KEY: err.message_key() }))
    }
}

/// Mutation the engine decided to apply to the membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Create the row with the given role.
    Insert(Role),
    /// Replace the row's role with the given role.
    Update(Role),
    /// Delete the row.
    Delete,
}

/// Result of planning a presidency handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffPlan {
    /// The target already holds the presidency; nothing to apply.
    AlreadyPresident,
    /// Swap the roles: target becomes president, the acting president is
    /// demoted to `demoted_role`.
    Transfer {
        /// Role the displaced president ends up with.
        demoted_role: Role,
    },
}

/// Role the displaced president receives after a handoff.
pub const HANDOFF_DEMOTED_ROLE: Role = Role::Member;

/// Decide a join request against the club's state and any existing row.
///
/// Checks run in order: an active membership wins over a pending one, and
/// both win over the club being closed.
pub fn request_join(club: &Club, existing: Option<Role>) -> Result<Transition, LifecycleError> {
    match existing {
        Some(role) if role.is_full_member() => return Err(LifecycleError::AlreadyMember),
        Some(Role::Pending) => return Err(LifecycleError::AlreadyPending),
        _ => {}
    }
    if !club.accepts_members() {
        return Err(LifecycleError::ClubClosed);
    }
    Ok(Transition::Insert(Role::Pending))
}

/// Decide a self-service cancel (pending) or leave (active member).
pub fn cancel_or_leave(existing: Option<Role>) -> Result<Transition, LifecycleError> {
    match existing {
        None => Err(LifecycleError::MembershipNotFound),
        Some(Role::President) => Err(LifecycleError::PresidentMustHandoff),
        Some(_) => Ok(Transition::Delete),
    }
}

/// Decide approval of a pending join request.
///
/// Absent targets report `NotPending` rather than a missing-record error so
/// repeated approvals of an already-settled request fail the same way.
pub fn approve(acting: Option<Role>, target: Option<Role>) -> Result<Transition, LifecycleError> {
    require_president(acting)?;
    match target {
        Some(Role::Pending) => Ok(Transition::Update(Role::Member)),
        _ => Err(LifecycleError::NotPending),
    }
}

/// Decide rejection of a pending join request.
pub fn reject(acting: Option<Role>, target: Option<Role>) -> Result<Transition, LifecycleError> {
    require_president(acting)?;
    match target {
        Some(Role::Pending) => Ok(Transition::Delete),
        _ => Err(LifecycleError::NotPending),
    }
}

/// Decide removal of a member, officer, or pending applicant.
pub fn remove(acting: Option<Role>, target: Option<Role>) -> Result<Transition, LifecycleError> {
    require_president(acting)?;
    match target {
        None => Err(LifecycleError::MembershipNotFound),
        Some(Role::President) => Err(LifecycleError::CannotRemovePresident),
        Some(_) => Ok(Transition::Delete),
    }
}

/// Decide a presidency handoff.
///
/// The target must hold an active membership; a pending applicant cannot be
/// made president. Handing off to the current president is reported as
/// [`HandoffPlan::AlreadyPresident`] so callers can finish without writing.
pub fn change_president(
    acting: Option<Role>,
    target: Option<Role>,
) -> Result<HandoffPlan, LifecycleError> {
    require_president(acting)?;
    match target {
        None | Some(Role::Pending) => Err(LifecycleError::TargetNotMember),
        Some(Role::President) => Ok(HandoffPlan::AlreadyPresident),
        Some(_) => Ok(HandoffPlan::Transfer {
            demoted_role: HANDOFF_DEMOTED_ROLE,
        }),
    }
}

pub(crate) fn require_president(acting: Option<Role>) -> Result<(), LifecycleError> {
    if acting.map(Role::can_manage_members) == Some(true) {
        Ok(())
    } else {
        Err(LifecycleError::NotAuthorized)
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;

//! Outcome reporting for lifecycle operations.
//!
//! Every completed operation maps to a stable message key that clients
//! translate into user-facing text. Failures carry theirs inside error
//! details (see [`crate::domain::transition`]); successes are returned in
//! response payloads and logged here for audit trails. The mapping itself is
//! pure; only [`report`] touches the log.

use tracing::info;

use crate::domain::club::ClubId;
use crate::domain::user::UserId;

/// Successful lifecycle outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// A join request was recorded.
    JoinRequested,
    /// A pending join request was withdrawn by the applicant.
    JoinCancelled,
    /// An active member left the club.
    MemberLeft,
    /// A pending join request was approved.
    MemberApproved,
    /// A pending join request was rejected.
    MemberRejected,
    /// An active member or applicant was removed by the president.
    MemberRemoved,
    /// The presidency moved to another member.
    PresidencyTransferred,
    /// A handoff targeted the sitting president; nothing changed.
    PresidencyRetained,
    /// A new club was submitted for review.
    ClubSubmitted,
    /// An administrator approved the club.
    ClubApproved,
    /// An administrator rejected the club.
    ClubRejected,
    /// The president opened the club to join requests.
    MembershipOpened,
    /// The president closed the club to join requests.
    MembershipClosed,
    /// The president posted an announcement.
    AnnouncementPosted,
    /// The president edited an announcement.
    AnnouncementUpdated,
    /// The president deleted an announcement.
    AnnouncementDeleted,
}

impl LifecycleOutcome {
    /// Stable message key for translation.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::JoinRequested => "club.join.requested",
            Self::JoinCancelled => "club.join.cancelled",
            Self::MemberLeft => "club.member.left",
            Self::MemberApproved => "club.member.approved",
            Self::MemberRejected => "club.member.rejected",
            Self::MemberRemoved => "club.member.removed",
            Self::PresidencyTransferred => "club.president.transferred",
            Self::PresidencyRetained => "club.president.retained",
            Self::ClubSubmitted => "club.lifecycle.submitted",
            Self::ClubApproved => "club.lifecycle.approved",
            Self::ClubRejected => "club.lifecycle.rejected",
            Self::MembershipOpened => "club.membership.opened",
            Self::MembershipClosed => "club.membership.closed",
            Self::AnnouncementPosted => "club.announcement.posted",
            Self::AnnouncementUpdated => "club.announcement.updated",
            Self::AnnouncementDeleted => "club.announcement.deleted",
        }
    }
}

/// Record a completed lifecycle outcome in the audit log.
pub fn report(outcome: LifecycleOutcome, club_id: &ClubId, user_id: &UserId) {
    info!(
        club_id = %club_id,
        user_id = %user_id,
        message_key = outcome.message_key(),
        "lifecycle outcome",
    );
}

//! Driving port for membership lifecycle mutations.
//!
//! Every operation is atomic per club: the implementing service serialises
//! writers so the exactly-one-president invariant holds under racing
//! requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::club::ClubId;
use crate::domain::error::Error;
use crate::domain::membership::{MembershipStatus, Role};
use crate::domain::report::LifecycleOutcome;
use crate::domain::user::UserId;

/// Result of a membership mutation: the subject's fresh status plus the
/// outcome message key for client-side translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipActionResponse {
    pub status: MembershipStatus,
    pub message_key: String,
}

impl MembershipActionResponse {
    /// Build a response from the subject's new role and the outcome.
    pub fn new(role: Option<Role>, outcome: LifecycleOutcome) -> Self {
        Self {
            status: MembershipStatus::from_role(role),
            message_key: outcome.message_key().to_owned(),
        }
    }
}

/// One side of a completed presidency handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub user_id: UserId,
    pub role: Role,
}

/// Result of a presidency handoff, naming both parties' roles so clients can
/// refresh cached session state without another round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffResponse {
    pub outgoing: RoleAssignment,
    pub incoming: RoleAssignment,
    pub message_key: String,
}

/// Driving port for membership write operations.
///
/// Authorization lives behind this port, not in the transport layer: approve,
/// reject, remove, and handoff verify the acting user's role themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipCommand: Send + Sync {
    /// Record a join request for the acting user.
    async fn request_join(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error>;

    /// Withdraw a pending request or leave the club.
    async fn cancel_or_leave(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error>;

    /// Approve a pending join request.
    async fn approve(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error>;

    /// Reject a pending join request.
    async fn reject(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error>;

    /// Remove a member, officer, or applicant from the club.
    async fn remove(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<MembershipActionResponse, Error>;

    /// Hand the presidency to another active member.
    async fn change_president(
        &self,
        club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<HandoffResponse, Error>;
}

/// Fixture command implementation for tests that do not need a real engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMembershipCommand;

#[async_trait]
impl MembershipCommand for FixtureMembershipCommand {
    async fn request_join(
        &self,
        _club_id: &ClubId,
        _user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        Ok(MembershipActionResponse::new(
            Some(Role::Pending),
            LifecycleOutcome::JoinRequested,
        ))
    }

    async fn cancel_or_leave(
        &self,
        _club_id: &ClubId,
        _user_id: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        Ok(MembershipActionResponse::new(
            None,
            LifecycleOutcome::MemberLeft,
        ))
    }

    async fn approve(
        &self,
        _club_id: &ClubId,
        _target: &UserId,
        _acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        Ok(MembershipActionResponse::new(
            Some(Role::Member),
            LifecycleOutcome::MemberApproved,
        ))
    }

    async fn reject(
        &self,
        _club_id: &ClubId,
        _target: &UserId,
        _acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        Ok(MembershipActionResponse::new(
            None,
            LifecycleOutcome::MemberRejected,
        ))
    }

    async fn remove(
        &self,
        _club_id: &ClubId,
        _target: &UserId,
        _acting: &UserId,
    ) -> Result<MembershipActionResponse, Error> {
        Ok(MembershipActionResponse::new(
            None,
            LifecycleOutcome::MemberRemoved,
        ))
    }

    async fn change_president(
        &self,
        _club_id: &ClubId,
        target: &UserId,
        acting: &UserId,
    ) -> Result<HandoffResponse, Error> {
        Ok(HandoffResponse {
            outgoing: RoleAssignment {
                user_id: acting.clone(),
                role: Role::Member,
            },
            incoming: RoleAssignment {
                user_id: target.clone(),
                role: Role::President,
            },
            message_key: LifecycleOutcome::PresidencyTransferred
                .message_key()
                .to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_join_reports_pending_status() {
        let command = FixtureMembershipCommand;
        let response = command
            .request_join(&ClubId::random(), &UserId::random())
            .await
            .expect("fixture join succeeds");
        assert!(response.status.is_pending);
        assert!(!response.status.is_member);
        assert_eq!(response.message_key, "club.join.requested");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_handoff_swaps_roles() {
        let command = FixtureMembershipCommand;
        let acting = UserId::random();
        let target = UserId::random();
        let response = command
            .change_president(&ClubId::random(), &target, &acting)
            .await
            .expect("fixture handoff succeeds");
        assert_eq!(response.outgoing.user_id, acting);
        assert_eq!(response.outgoing.role, Role::Member);
        assert_eq!(response.incoming.user_id, target);
        assert_eq!(response.incoming.role, Role::President);
    }

    #[test]
    fn action_response_serialises_camel_case() {
        let response =
            MembershipActionResponse::new(Some(Role::Member), LifecycleOutcome::MemberApproved);
        let json = serde_json::to_value(&response).expect("serialise");
        assert_eq!(json["status"]["isMember"], true);
        assert_eq!(json["messageKey"], "club.member.approved");
    }
}

//! Tests for the role transition engine.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::club::{ClubDescription, ClubId, ClubName, ClubStatus};
use crate::domain::user::UserId;

fn club(status: ClubStatus, membership_open: bool) -> Club {
    Club::new(
        ClubId::random(),
        ClubName::new("Chess Club").expect("valid name"),
        ClubDescription::new("Weekly chess meetups for all levels").expect("valid description"),
        status,
        membership_open,
        UserId::random(),
        Utc::now(),
    )
}

fn open_club() -> Club {
    club(ClubStatus::Approved, true)
}

#[rstest]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
#[case(Some(Role::President))]
fn join_rejects_active_members(#[case] existing: Option<Role>) {
    let err = request_join(&open_club(), existing).expect_err("active member cannot rejoin");
    assert_eq!(err, LifecycleError::AlreadyMember);
}

#[test]
fn join_rejects_duplicate_requests() {
    let err =
        request_join(&open_club(), Some(Role::Pending)).expect_err("pending request is a dup");
    assert_eq!(err, LifecycleError::AlreadyPending);
}

#[rstest]
#[case(ClubStatus::Approved, false)]
#[case(ClubStatus::Pending, true)]
#[case(ClubStatus::Suspended, true)]
fn join_rejects_closed_clubs(#[case] status: ClubStatus, #[case] membership_open: bool) {
    let err = request_join(&club(status, membership_open), None)
        .expect_err("closed club must not admit");
    assert_eq!(err, LifecycleError::ClubClosed);
}

#[test]
fn join_existing_membership_wins_over_closed_club() {
    let err = request_join(&club(ClubStatus::Approved, false), Some(Role::Member))
        .expect_err("member of closed club");
    assert_eq!(err, LifecycleError::AlreadyMember);
}

#[test]
fn join_creates_pending_request() {
    let transition = request_join(&open_club(), None).expect("join allowed");
    assert_eq!(transition, Transition::Insert(Role::Pending));
}

#[rstest]
#[case(Some(Role::Pending))]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
fn cancel_or_leave_deletes_non_presidents(#[case] existing: Option<Role>) {
    let transition = cancel_or_leave(existing).expect("deletion allowed");
    assert_eq!(transition, Transition::Delete);
}

#[test]
fn president_cannot_leave_without_handoff() {
    let err = cancel_or_leave(Some(Role::President)).expect_err("president must hand off");
    assert_eq!(err, LifecycleError::PresidentMustHandoff);
}

#[test]
fn leaving_without_membership_is_not_found() {
    let err = cancel_or_leave(None).expect_err("no row to delete");
    assert_eq!(err, LifecycleError::MembershipNotFound);
}

#[rstest]
#[case(None)]
#[case(Some(Role::Pending))]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
fn only_presidents_approve(#[case] acting: Option<Role>) {
    let err = approve(acting, Some(Role::Pending)).expect_err("non-president cannot approve");
    assert_eq!(err, LifecycleError::NotAuthorized);
}

#[test]
fn approve_promotes_pending_to_member() {
    let transition =
        approve(Some(Role::President), Some(Role::Pending)).expect("approval allowed");
    assert_eq!(transition, Transition::Update(Role::Member));
}

#[rstest]
#[case(None)]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
#[case(Some(Role::President))]
fn approve_requires_pending_target(#[case] target: Option<Role>) {
    let err = approve(Some(Role::President), target).expect_err("target must be pending");
    assert_eq!(err, LifecycleError::NotPending);
}

#[test]
fn reject_deletes_pending_request() {
    let transition = reject(Some(Role::President), Some(Role::Pending)).expect("reject allowed");
    assert_eq!(transition, Transition::Delete);
}

#[test]
fn reject_twice_reports_not_pending() {
    // After the first rejection deletes the row, the second sees no record.
    let err = reject(Some(Role::President), None).expect_err("already settled");
    assert_eq!(err, LifecycleError::NotPending);
}

#[rstest]
#[case(Some(Role::Pending))]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
fn remove_deletes_any_non_president(#[case] target: Option<Role>) {
    let transition = remove(Some(Role::President), target).expect("removal allowed");
    assert_eq!(transition, Transition::Delete);
}

#[test]
fn remove_spares_the_president() {
    let err = remove(Some(Role::President), Some(Role::President))
        .expect_err("president is not removable");
    assert_eq!(err, LifecycleError::CannotRemovePresident);
}

#[test]
fn remove_missing_target_is_not_found() {
    let err = remove(Some(Role::President), None).expect_err("no row to delete");
    assert_eq!(err, LifecycleError::MembershipNotFound);
}

#[rstest]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
fn handoff_transfers_to_active_members(#[case] target: Option<Role>) {
    let plan = change_president(Some(Role::President), target).expect("handoff allowed");
    assert_eq!(
        plan,
        HandoffPlan::Transfer {
            demoted_role: Role::Member
        }
    );
}

#[rstest]
#[case(None)]
#[case(Some(Role::Pending))]
fn handoff_requires_active_target(#[case] target: Option<Role>) {
    let err = change_president(Some(Role::President), target)
        .expect_err("pending or absent target cannot preside");
    assert_eq!(err, LifecycleError::TargetNotMember);
}

#[test]
fn handoff_to_self_is_a_no_op() {
    let plan = change_president(Some(Role::President), Some(Role::President))
        .expect("self handoff settles");
    assert_eq!(plan, HandoffPlan::AlreadyPresident);
}

#[rstest]
#[case(None)]
#[case(Some(Role::Member))]
#[case(Some(Role::VicePresident))]
fn only_presidents_hand_off(#[case] acting: Option<Role>) {
    let err = change_president(acting, Some(Role::Member))
        .expect_err("non-president cannot hand off");
    assert_eq!(err, LifecycleError::NotAuthorized);
}

#[rstest]
#[case(LifecycleError::AlreadyMember, LifecycleErrorKind::StateConflict)]
#[case(LifecycleError::AlreadyPending, LifecycleErrorKind::StateConflict)]
#[case(LifecycleError::NotPending, LifecycleErrorKind::StateConflict)]
#[case(LifecycleError::ClubClosed, LifecycleErrorKind::StateConflict)]
#[case(LifecycleError::ClubNotPending, LifecycleErrorKind::StateConflict)]
#[case(LifecycleError::NotAuthorized, LifecycleErrorKind::Authorization)]
#[case(LifecycleError::PresidentMustHandoff, LifecycleErrorKind::InvariantViolation)]
#[case(LifecycleError::CannotRemovePresident, LifecycleErrorKind::InvariantViolation)]
#[case(LifecycleError::TargetNotMember, LifecycleErrorKind::InvariantViolation)]
#[case(LifecycleError::MembershipNotFound, LifecycleErrorKind::NotFound)]
#[case(LifecycleError::ClubNotFound, LifecycleErrorKind::NotFound)]
#[case(LifecycleError::UserNotFound, LifecycleErrorKind::NotFound)]
#[case(LifecycleError::AnnouncementNotFound, LifecycleErrorKind::NotFound)]
fn error_kinds(#[case] err: LifecycleError, #[case] kind: LifecycleErrorKind) {
    assert_eq!(err.kind(), kind);
}

#[test]
fn wire_errors_carry_message_keys() {
    let err: Error = LifecycleError::AlreadyPending.into();
    assert_eq!(err.code(), crate::domain::error::ErrorCode::Conflict);
    let details = err.details().expect("details present");
    assert_eq!(details[DETAILS_MESSAGE_KEY], "club.join.already_pending");
}

#[rstest]
#[case(LifecycleError::NotAuthorized, crate::domain::error::ErrorCode::Forbidden)]
#[case(LifecycleError::ClubNotFound, crate::domain::error::ErrorCode::NotFound)]
#[case(LifecycleError::PresidentMustHandoff, crate::domain::error::ErrorCode::Conflict)]
fn wire_error_codes(
    #[case] err: LifecycleError,
    #[case] expected: crate::domain::error::ErrorCode,
) {
    let wire: Error = err.into();
    assert_eq!(wire.code(), expected);
}

//! Membership data model.
//!
//! A membership row ties a user to a club with a [`Role`]. The lifecycle is
//! `pending` (awaiting approval) then `member`, with `vice_president` and
//! `president` as officer roles. A club keeps exactly one president once
//! approved.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::club::ClubId;
use crate::domain::user::{DisplayName, UserId, Username};

/// Role a user holds inside a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Join request awaiting officer approval.
    Pending,
    /// Ordinary club member.
    Member,
    /// Officer without lifecycle powers.
    VicePresident,
    /// The club's single accountable officer.
    President,
}

impl Role {
    /// Whether the role counts as full membership.
    ///
    /// Pending applicants are not members yet.
    pub fn is_full_member(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the role may approve, reject, or remove other members.
    pub fn can_manage_members(self) -> bool {
        matches!(self, Self::President)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Member => "member",
            Self::VicePresident => "vice_president",
            Self::President => "president",
        };
        f.write_str(label)
    }
}

/// Error returned when a stored role label is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown membership role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "member" => Ok(Self::Member),
            "vice_president" => Ok(Self::VicePresident),
            "president" => Ok(Self::President),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A user's membership of a single club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    club_id: ClubId,
    user_id: UserId,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Membership {
    /// Build a membership from validated components.
    pub fn new(
        club_id: ClubId,
        user_id: UserId,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            club_id,
            user_id,
            role,
            created_at,
            updated_at,
        }
    }

    /// Club this membership belongs to.
    pub fn club_id(&self) -> &ClubId {
        &self.club_id
    }

    /// Member's user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Current role inside the club.
    pub fn role(&self) -> Role {
        self.role
    }

    /// When the join request was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the role last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of this membership with a different role.
    pub fn with_role(&self, role: Role, updated_at: DateTime<Utc>) -> Self {
        Self {
            club_id: self.club_id.clone(),
            user_id: self.user_id.clone(),
            role,
            created_at: self.created_at,
            updated_at,
        }
    }
}

/// Flattened membership summary for status queries.
///
/// Collapses the role into the three booleans clients branch on so they never
/// re-implement role comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStatus {
    /// The user holds a full membership role.
    pub is_member: bool,
    /// The user has a join request awaiting approval.
    pub is_pending: bool,
    /// The user is the club's president.
    pub is_president: bool,
}

impl MembershipStatus {
    /// Status for a user with no membership row at all.
    pub fn absent() -> Self {
        Self {
            is_member: false,
            is_pending: false,
            is_president: false,
        }
    }

    /// Derive the summary from an optional role.
    pub fn from_role(role: Option<Role>) -> Self {
        match role {
            None => Self::absent(),
            Some(Role::Pending) => Self {
                is_member: false,
                is_pending: true,
                is_president: false,
            },
            Some(Role::President) => Self {
                is_member: true,
                is_pending: false,
                is_president: true,
            },
            Some(Role::Member | Role::VicePresident) => Self {
                is_member: true,
                is_pending: false,
                is_president: false,
            },
        }
    }
}

/// Directory entry combining a membership with the member's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    /// Member's user identifier.
    pub user_id: UserId,
    /// Member's login handle.
    pub username: Username,
    /// Member's display name.
    pub display_name: DisplayName,
    /// Member's avatar reference, when one was supplied.
    pub avatar: Option<String>,
    /// Role inside the club.
    pub role: Role,
    /// When the join request was recorded.
    pub since: DateTime<Utc>,
}

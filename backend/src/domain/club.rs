//! Club data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors returned by the club constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClubValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    EmptyDescription,
    DescriptionTooShort { min: usize },
    DescriptionTooLong { max: usize },
    UnknownStatus,
}

impl fmt::Display for ClubValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "club id must not be empty"),
            Self::InvalidId => write!(f, "club id must be a valid UUID"),
            Self::EmptyName => write!(f, "club name must not be empty"),
            Self::NameTooShort { min } => {
                write!(f, "club name must be at least {min} characters")
            }
            Self::NameTooLong { max } => {
                write!(f, "club name must be at most {max} characters")
            }
            Self::EmptyDescription => write!(f, "club description must not be empty"),
            Self::DescriptionTooShort { min } => {
                write!(f, "club description must be at least {min} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "club description must be at most {max} characters")
            }
            Self::UnknownStatus => {
                write!(f, "club status must be pending, approved, or suspended")
            }
        }
    }
}

impl std::error::Error for ClubValidationError {}

/// Stable club identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClubId(Uuid, String);

impl ClubId {
    /// Validate and construct a [`ClubId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ClubValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ClubId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Construct a [`ClubId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ClubValidationError> {
        if id.is_empty() {
            return Err(ClubValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ClubValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| ClubValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ClubId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ClubId> for String {
    fn from(value: ClubId) -> Self {
        let ClubId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ClubId {
    type Error = ClubValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a club name.
pub const CLUB_NAME_MIN: usize = 3;
/// Maximum allowed length for a club name.
pub const CLUB_NAME_MAX: usize = 64;

/// Club name shown in directories and membership lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClubName(String);

impl ClubName {
    /// Validate and construct a [`ClubName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, ClubValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, ClubValidationError> {
        if name.trim().is_empty() {
            return Err(ClubValidationError::EmptyName);
        }

        let length = name.chars().count();
        if length < CLUB_NAME_MIN {
            return Err(ClubValidationError::NameTooShort { min: CLUB_NAME_MIN });
        }
        if length > CLUB_NAME_MAX {
            return Err(ClubValidationError::NameTooLong { max: CLUB_NAME_MAX });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for ClubName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClubName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ClubName> for String {
    fn from(value: ClubName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ClubName {
    type Error = ClubValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for a club description.
pub const CLUB_DESCRIPTION_MIN: usize = 10;
/// Maximum allowed length for a club description.
pub const CLUB_DESCRIPTION_MAX: usize = 500;

/// Free-text description shown on the club page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClubDescription(String);

impl ClubDescription {
    /// Validate and construct a [`ClubDescription`] from owned input.
    pub fn new(description: impl Into<String>) -> Result<Self, ClubValidationError> {
        Self::from_owned(description.into())
    }

    fn from_owned(description: String) -> Result<Self, ClubValidationError> {
        if description.trim().is_empty() {
            return Err(ClubValidationError::EmptyDescription);
        }

        let length = description.chars().count();
        if length < CLUB_DESCRIPTION_MIN {
            return Err(ClubValidationError::DescriptionTooShort {
                min: CLUB_DESCRIPTION_MIN,
            });
        }
        if length > CLUB_DESCRIPTION_MAX {
            return Err(ClubValidationError::DescriptionTooLong {
                max: CLUB_DESCRIPTION_MAX,
            });
        }

        Ok(Self(description))
    }
}

impl AsRef<str> for ClubDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClubDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ClubDescription> for String {
    fn from(value: ClubDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for ClubDescription {
    type Error = ClubValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Lifecycle state of a club.
///
/// New clubs start as `Pending` and only become joinable once an
/// administrator approves them. Rejected clubs are parked as `Suspended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClubStatus {
    /// Awaiting administrator review.
    Pending,
    /// Approved and visible in the public directory.
    Approved,
    /// Rejected or taken down by an administrator.
    Suspended,
}

impl fmt::Display for ClubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Suspended => "suspended",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for ClubStatus {
    type Err = ClubValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ClubValidationError::UnknownStatus),
        }
    }
}

/// A club tracked by the membership lifecycle service.
///
/// ## Invariants
/// - An `Approved` club has exactly one president among its memberships.
/// - A `Pending` or `Suspended` club has no memberships at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    id: ClubId,
    name: ClubName,
    description: ClubDescription,
    logo: Option<String>,
    category_id: Option<Uuid>,
    status: ClubStatus,
    membership_open: bool,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Club {
    /// Build a club from validated components.
    ///
    /// Branding references (logo, category) default to absent; attach them
    /// with [`Club::with_branding`].
    pub fn new(
        id: ClubId,
        name: ClubName,
        description: ClubDescription,
        status: ClubStatus,
        membership_open: bool,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            logo: None,
            category_id: None,
            status,
            membership_open,
            created_by,
            created_at,
        }
    }

    /// Attach optional logo and category references.
    #[must_use]
    pub fn with_branding(mut self, logo: Option<String>, category_id: Option<Uuid>) -> Self {
        self.logo = logo;
        self.category_id = category_id;
        self
    }

    /// Stable club identifier.
    pub fn id(&self) -> &ClubId {
        &self.id
    }

    /// Club name.
    pub fn name(&self) -> &ClubName {
        &self.name
    }

    /// Club description.
    pub fn description(&self) -> &ClubDescription {
        &self.description
    }

    /// Reference to the club's logo asset, when one was supplied.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Category the club filed itself under, when one was supplied.
    pub fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ClubStatus {
        self.status
    }

    /// Whether the club currently accepts join requests.
    pub fn membership_open(&self) -> bool {
        self.membership_open
    }

    /// User who proposed the club.
    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether members can currently be admitted.
    ///
    /// Joining requires the club to be approved and its membership flag open.
    pub fn accepts_members(&self) -> bool {
        self.status == ClubStatus::Approved && self.membership_open
    }
}

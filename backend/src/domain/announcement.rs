//! Club announcement data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::club::ClubId;
use crate::domain::user::UserId;

/// Validation errors returned by the announcement constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementValidationError {
    EmptyId,
    InvalidId,
    EmptyTitle,
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    EmptyBody,
    BodyTooLong { max: usize },
}

impl fmt::Display for AnnouncementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "announcement id must not be empty"),
            Self::InvalidId => write!(f, "announcement id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "announcement title must not be empty"),
            Self::TitleTooShort { min } => {
                write!(f, "announcement title must be at least {min} characters")
            }
            Self::TitleTooLong { max } => {
                write!(f, "announcement title must be at most {max} characters")
            }
            Self::EmptyBody => write!(f, "announcement body must not be empty"),
            Self::BodyTooLong { max } => {
                write!(f, "announcement body must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AnnouncementValidationError {}

/// Stable announcement identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnnouncementId(Uuid, String);

impl AnnouncementId {
    /// Validate and construct an [`AnnouncementId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AnnouncementValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`AnnouncementId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Construct an [`AnnouncementId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, AnnouncementValidationError> {
        if id.is_empty() {
            return Err(AnnouncementValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(AnnouncementValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| AnnouncementValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for AnnouncementId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AnnouncementId> for String {
    fn from(value: AnnouncementId) -> Self {
        let AnnouncementId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for AnnouncementId {
    type Error = AnnouncementValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum allowed length for an announcement title.
pub const ANNOUNCEMENT_TITLE_MIN: usize = 3;
/// Maximum allowed length for an announcement title.
pub const ANNOUNCEMENT_TITLE_MAX: usize = 120;

/// Announcement headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnnouncementTitle(String);

impl AnnouncementTitle {
    /// Validate and construct an [`AnnouncementTitle`] from owned input.
    pub fn new(title: impl Into<String>) -> Result<Self, AnnouncementValidationError> {
        Self::from_owned(title.into())
    }

    fn from_owned(title: String) -> Result<Self, AnnouncementValidationError> {
        if title.trim().is_empty() {
            return Err(AnnouncementValidationError::EmptyTitle);
        }

        let length = title.chars().count();
        if length < ANNOUNCEMENT_TITLE_MIN {
            return Err(AnnouncementValidationError::TitleTooShort {
                min: ANNOUNCEMENT_TITLE_MIN,
            });
        }
        if length > ANNOUNCEMENT_TITLE_MAX {
            return Err(AnnouncementValidationError::TitleTooLong {
                max: ANNOUNCEMENT_TITLE_MAX,
            });
        }

        Ok(Self(title))
    }
}

impl AsRef<str> for AnnouncementTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AnnouncementTitle> for String {
    fn from(value: AnnouncementTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnnouncementTitle {
    type Error = AnnouncementValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for an announcement body.
pub const ANNOUNCEMENT_BODY_MAX: usize = 4000;

/// Announcement body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnnouncementBody(String);

impl AnnouncementBody {
    /// Validate and construct an [`AnnouncementBody`] from owned input.
    pub fn new(body: impl Into<String>) -> Result<Self, AnnouncementValidationError> {
        Self::from_owned(body.into())
    }

    fn from_owned(body: String) -> Result<Self, AnnouncementValidationError> {
        if body.trim().is_empty() {
            return Err(AnnouncementValidationError::EmptyBody);
        }

        if body.chars().count() > ANNOUNCEMENT_BODY_MAX {
            return Err(AnnouncementValidationError::BodyTooLong {
                max: ANNOUNCEMENT_BODY_MAX,
            });
        }

        Ok(Self(body))
    }
}

impl AsRef<str> for AnnouncementBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AnnouncementBody> for String {
    fn from(value: AnnouncementBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnnouncementBody {
    type Error = AnnouncementValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A single club announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    id: AnnouncementId,
    club_id: ClubId,
    author_id: UserId,
    title: AnnouncementTitle,
    body: AnnouncementBody,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Announcement {
    /// Build an announcement from validated components.
    pub fn new(
        id: AnnouncementId,
        club_id: ClubId,
        author_id: UserId,
        title: AnnouncementTitle,
        body: AnnouncementBody,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            club_id,
            author_id,
            title,
            body,
            created_at,
            updated_at,
        }
    }

    /// Stable announcement identifier.
    pub fn id(&self) -> &AnnouncementId {
        &self.id
    }

    /// Club this announcement belongs to.
    pub fn club_id(&self) -> &ClubId {
        &self.club_id
    }

    /// President who posted the announcement.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Headline.
    pub fn title(&self) -> &AnnouncementTitle {
        &self.title
    }

    /// Body text.
    pub fn body(&self) -> &AnnouncementBody {
        &self.body
    }

    /// Publication timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last edit timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of this announcement with replacement content.
    pub fn with_content(
        &self,
        title: AnnouncementTitle,
        body: AnnouncementBody,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: self.id.clone(),
            club_id: self.club_id.clone(),
            author_id: self.author_id.clone(),
            title,
            body,
            created_at: self.created_at,
            updated_at,
        }
    }
}

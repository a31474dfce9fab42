//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query values are parsed into domain identifiers here so handlers
//! never pass raw strings into the domain.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{AnnouncementId, ClubId, ClubStatus, Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidStatus => "invalid_status",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Parse a body field into a raw UUID, naming the field in the error details.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_club_id(value: &str) -> Result<ClubId, Error> {
    ClubId::new(value).map_err(|_| invalid_uuid_error(FieldName::new("clubId"), value))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error(FieldName::new("userId"), value))
}

pub(crate) fn parse_announcement_id(value: &str) -> Result<AnnouncementId, Error> {
    AnnouncementId::new(value)
        .map_err(|_| invalid_uuid_error(FieldName::new("announcementId"), value))
}

pub(crate) fn parse_status_filter(value: Option<&str>) -> Result<Option<ClubStatus>, Error> {
    value
        .map(|raw| {
            raw.parse::<ClubStatus>().map_err(|_| {
                ValidationError::new("status", "status must be pending, approved, or suspended")
                    .with_value(ErrorCode::InvalidStatus, raw)
            })
        })
        .transpose()
}

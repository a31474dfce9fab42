//! Authentication primitives such as login credentials and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Stored digest was not a SHA-256 hex string.
    InvalidDigest,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::InvalidDigest => write!(f, "password digest must be 64 hex characters"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada", "password").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Lowercase hex SHA-256 digest of a user's password.
///
/// Stored instead of the plain password so a leaked row never exposes the
/// credential itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn from_password(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        Self(hex::encode(digest))
    }

    /// Accept an already-computed digest, validating its shape.
    pub fn from_hex(digest: impl Into<String>) -> Result<Self, AuthValidationError> {
        let digest = digest.into();
        let valid = digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(AuthValidationError::InvalidDigest);
        }
        Ok(Self(digest.to_lowercase()))
    }

    /// Whether the supplied plaintext password matches this digest.
    pub fn matches(&self, password: &str) -> bool {
        Self::from_password(password).0 == self.0
    }

    /// Hex representation for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! HTTP inbound adapter exposing REST endpoints.

pub mod announcements;
pub mod auth;
pub mod clubs;
pub mod error;
pub mod health;
pub mod memberships;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

//! Persistence adapters.
//!
//! Diesel-backed repositories implement the domain ports against PostgreSQL
//! through a bb8 connection pool. The in-memory variants back tests that do
//! not need a database. Row structs live in [`models`] and the generated
//! table DSL in [`schema`]; conversion into domain types happens inside each
//! repository so invalid rows surface as repository errors rather than
//! panics.

pub mod diesel_announcement_repository;
pub mod diesel_club_repository;
pub(crate) mod diesel_error_mapping;
pub mod diesel_login_service;
pub mod diesel_membership_repository;
pub mod diesel_user_repository;
pub mod memory;
pub(crate) mod models;
pub mod pool;
pub(crate) mod schema;

pub use diesel_announcement_repository::DieselAnnouncementRepository;
pub use diesel_club_repository::DieselClubRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_membership_repository::DieselMembershipRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{
    MemoryAnnouncementRepository, MemoryClubRepository, MemoryLoginService,
    MemoryMembershipRepository, MemoryUserRepository,
};
pub use pool::{DbPool, PoolConfig, PoolError};

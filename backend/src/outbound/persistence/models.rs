//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain. Repositories convert them to and from
//! validated domain entities at the adapter boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{announcements, clubs, memberships, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
    #[expect(dead_code, reason = "digests are read only by the login service")]
    pub password_digest: String,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for provisioning a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub avatar: Option<&'a str>,
    pub is_admin: bool,
    pub password_digest: &'a str,
}

/// Row struct for reading from the clubs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clubs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClubRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: String,
    pub membership_open: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for persisting a proposed club.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clubs)]
pub(crate) struct NewClubRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub logo: Option<&'a str>,
    pub category_id: Option<Uuid>,
    pub status: &'a str,
    pub membership_open: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the memberships table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MembershipRow {
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct doubling as the upsert payload for membership rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = memberships)]
pub(crate) struct NewMembershipRow<'a> {
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the announcements table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnouncementRow {
    pub id: Uuid,
    pub club_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for persisting a new announcement.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = announcements)]
pub(crate) struct NewAnnouncementRow<'a> {
    pub id: Uuid,
    pub club_id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for replacing announcement content.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = announcements)]
pub(crate) struct AnnouncementContentUpdate<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub updated_at: DateTime<Utc>,
}

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation. When
//! a migration changes the schema, regenerate with `diesel print-schema` or
//! update this file by hand.

diesel::table! {
    /// Registered user accounts.
    ///
    /// `username` carries a unique index; `password_digest` stores the
    /// lowercase hex SHA-256 of the password, never the password itself.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle.
        username -> Varchar,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Optional avatar asset reference.
        avatar -> Nullable<Varchar>,
        /// Whether the user holds platform administrator rights.
        is_admin -> Bool,
        /// Lowercase hex SHA-256 digest of the password.
        password_digest -> Bpchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clubs across their whole lifecycle (pending, approved, suspended).
    clubs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Club name.
        name -> Varchar,
        /// Free-form description shown on the club page.
        description -> Text,
        /// Optional logo asset reference.
        logo -> Nullable<Varchar>,
        /// Optional category the club filed itself under.
        category_id -> Nullable<Uuid>,
        /// Lifecycle state: `pending`, `approved`, or `suspended`.
        status -> Varchar,
        /// Whether the club currently accepts join requests.
        membership_open -> Bool,
        /// User who proposed the club.
        created_by -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership rows, one per (club, user) pair.
    ///
    /// `role` is one of `pending`, `member`, `vice_president`, `president`.
    /// A partial unique index on (club_id) where role = 'president' enforces
    /// at most one president per club at the storage layer.
    memberships (club_id, user_id) {
        /// Club half of the composite key.
        club_id -> Uuid,
        /// User half of the composite key.
        user_id -> Uuid,
        /// Current role within the club.
        role -> Varchar,
        /// When the join request was made.
        created_at -> Timestamptz,
        /// When the role last changed.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Club announcements posted by the president.
    announcements (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Club the announcement belongs to.
        club_id -> Uuid,
        /// President who posted it.
        author_id -> Uuid,
        /// Headline.
        title -> Varchar,
        /// Body text.
        body -> Text,
        /// Publication timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(memberships -> users (user_id));
diesel::joinable!(memberships -> clubs (club_id));
diesel::joinable!(announcements -> clubs (club_id));
diesel::joinable!(announcements -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, clubs, memberships, announcements);

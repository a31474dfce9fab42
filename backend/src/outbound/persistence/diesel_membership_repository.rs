//! PostgreSQL-backed `MembershipRepository` implementation using Diesel ORM.
//!
//! Presidency handoff runs both role updates in one transaction. The outgoing
//! president is demoted before the incoming member is promoted so the partial
//! unique index on `(club_id) where role = 'president'` never sees two
//! presidents.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::club::ClubId;
use crate::domain::membership::{MemberProfile, Membership, Role, UnknownRole};
use crate::domain::ports::{MembershipRepository, MembershipRepositoryError};
use crate::domain::user::{DisplayName, UserId, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MembershipRow, NewMembershipRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{memberships, users};

/// Diesel-backed implementation of the membership repository port.
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_membership_pool_error(error: PoolError) -> MembershipRepositoryError {
    map_pool_error(error, MembershipRepositoryError::connection)
}

fn map_membership_diesel_error(error: diesel::result::Error) -> MembershipRepositoryError {
    map_diesel_error(
        error,
        MembershipRepositoryError::query,
        MembershipRepositoryError::connection,
    )
}

/// Convert a database row into a domain membership.
fn row_to_membership(row: MembershipRow) -> Result<Membership, MembershipRepositoryError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|err: UnknownRole| MembershipRepositoryError::query(err.to_string()))?;

    Ok(Membership::new(
        ClubId::from_uuid(row.club_id),
        UserId::from_uuid(row.user_id),
        role,
        row.created_at,
        row.updated_at,
    ))
}

/// Combine a membership row with its joined user row into a directory entry.
fn rows_to_profile(
    membership: MembershipRow,
    user: UserRow,
) -> Result<MemberProfile, MembershipRepositoryError> {
    let role: Role = membership
        .role
        .parse()
        .map_err(|err: UnknownRole| MembershipRepositoryError::query(err.to_string()))?;
    let username = Username::new(user.username)
        .map_err(|err| MembershipRepositoryError::query(err.to_string()))?;
    let display_name = DisplayName::new(user.display_name)
        .map_err(|err| MembershipRepositoryError::query(err.to_string()))?;

    Ok(MemberProfile {
        user_id: UserId::from_uuid(membership.user_id),
        username,
        display_name,
        avatar: user.avatar,
        role,
        since: membership.created_at,
    })
}

/// Transaction-local error distinguishing missing rows from driver failures.
enum TransferError {
    Diesel(diesel::result::Error),
    MissingRow(&'static str),
}

impl From<diesel::result::Error> for TransferError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn get(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let row = memberships::table
            .find((club_id.as_uuid(), user_id.as_uuid()))
            .select(MembershipRow::as_select())
            .first::<MembershipRow>(&mut conn)
            .await
            .optional()
            .map_err(map_membership_diesel_error)?;

        row.map(row_to_membership).transpose()
    }

    async fn upsert(
        &self,
        membership: &Membership,
    ) -> Result<Membership, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let role = membership.role().to_string();
        let new_row = NewMembershipRow {
            club_id: *membership.club_id().as_uuid(),
            user_id: *membership.user_id().as_uuid(),
            role: &role,
            created_at: membership.created_at(),
            updated_at: membership.updated_at(),
        };

        diesel::insert_into(memberships::table)
            .values(&new_row)
            .on_conflict((memberships::club_id, memberships::user_id))
            .do_update()
            .set((
                memberships::role.eq(excluded(memberships::role)),
                memberships::updated_at.eq(excluded(memberships::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_membership_diesel_error)?;

        Ok(membership.clone())
    }

    async fn delete(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        diesel::delete(memberships::table.find((club_id.as_uuid(), user_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_membership_diesel_error)?;

        Ok(())
    }

    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let rows: Vec<MembershipRow> = memberships::table
            .filter(memberships::club_id.eq(club_id.as_uuid()))
            .order((memberships::created_at.asc(), memberships::user_id.asc()))
            .select(MembershipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_membership_diesel_error)?;

        rows.into_iter().map(row_to_membership).collect()
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let rows: Vec<MembershipRow> = memberships::table
            .filter(memberships::user_id.eq(user_id.as_uuid()))
            .order((memberships::created_at.asc(), memberships::club_id.asc()))
            .select(MembershipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_membership_diesel_error)?;

        rows.into_iter().map(row_to_membership).collect()
    }

    async fn list_profiles_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let rows: Vec<(MembershipRow, UserRow)> = memberships::table
            .inner_join(users::table)
            .filter(memberships::club_id.eq(club_id.as_uuid()))
            .order(memberships::created_at.asc())
            .select((MembershipRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_membership_diesel_error)?;

        rows.into_iter()
            .map(|(membership, user)| rows_to_profile(membership, user))
            .collect()
    }

    async fn transfer_presidency(
        &self,
        club_id: &ClubId,
        outgoing: &UserId,
        incoming: &UserId,
        demoted_role: Role,
    ) -> Result<(), MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_membership_pool_error)?;

        let club = *club_id.as_uuid();
        let outgoing_id = *outgoing.as_uuid();
        let incoming_id = *incoming.as_uuid();
        let demoted = demoted_role.to_string();
        let promoted = Role::President.to_string();

        conn.transaction::<_, TransferError, _>(|conn| {
            async move {
                let now = Utc::now();

                let demotions = diesel::update(memberships::table.find((club, outgoing_id)))
                    .set((
                        memberships::role.eq(demoted),
                        memberships::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .await?;
                if demotions == 0 {
                    return Err(TransferError::MissingRow("outgoing president row missing"));
                }

                let promotions = diesel::update(memberships::table.find((club, incoming_id)))
                    .set((
                        memberships::role.eq(promoted),
                        memberships::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .await?;
                if promotions == 0 {
                    return Err(TransferError::MissingRow("incoming member row missing"));
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match err {
            TransferError::Diesel(err) => map_membership_diesel_error(err),
            TransferError::MissingRow(message) => MembershipRepositoryError::query(message),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn membership_row() -> MembershipRow {
        let now = Utc::now();
        MembershipRow {
            club_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: "vice_president".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    fn user_row(user_id: Uuid) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: user_id,
            username: "grace".to_owned(),
            display_name: "Grace Hopper".to_owned(),
            avatar: Some("/avatars/grace.png".to_owned()),
            is_admin: false,
            password_digest: "0".repeat(64),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_conversion_keeps_the_role(membership_row: MembershipRow) {
        let membership = row_to_membership(membership_row).expect("row should convert");
        assert_eq!(membership.role(), Role::VicePresident);
    }

    #[rstest]
    fn row_conversion_rejects_an_unknown_role(mut membership_row: MembershipRow) {
        membership_row.role = "chancellor".to_owned();

        let error = row_to_membership(membership_row).expect_err("unknown role should fail");
        assert!(matches!(error, MembershipRepositoryError::Query { .. }));
        assert!(error.to_string().contains("chancellor"));
    }

    #[rstest]
    fn profile_conversion_joins_the_user_fields(membership_row: MembershipRow) {
        let user = user_row(membership_row.user_id);
        let since = membership_row.created_at;

        let profile = rows_to_profile(membership_row, user).expect("rows should convert");
        assert_eq!(profile.username.as_ref(), "grace");
        assert_eq!(profile.display_name.as_ref(), "Grace Hopper");
        assert_eq!(profile.avatar.as_deref(), Some("/avatars/grace.png"));
        assert_eq!(profile.role, Role::VicePresident);
        assert_eq!(profile.since, since);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_membership_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, MembershipRepositoryError::Connection { .. }));
    }
}

//! PostgreSQL-backed `ClubRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::club::{Club, ClubDescription, ClubId, ClubName, ClubStatus};
use crate::domain::ports::{ClubRepository, ClubRepositoryError};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ClubRow, NewClubRow};
use super::pool::{DbPool, PoolError};
use super::schema::clubs;

/// Diesel-backed implementation of the club repository port.
#[derive(Clone)]
pub struct DieselClubRepository {
    pool: DbPool,
}

impl DieselClubRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_club_pool_error(error: PoolError) -> ClubRepositoryError {
    map_pool_error(error, ClubRepositoryError::connection)
}

fn map_club_diesel_error(error: diesel::result::Error) -> ClubRepositoryError {
    map_diesel_error(
        error,
        ClubRepositoryError::query,
        ClubRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain club.
fn row_to_club(row: ClubRow) -> Result<Club, ClubRepositoryError> {
    let name = ClubName::new(row.name).map_err(|err| ClubRepositoryError::query(err.to_string()))?;
    let description = ClubDescription::new(row.description)
        .map_err(|err| ClubRepositoryError::query(err.to_string()))?;
    let status = ClubStatus::from_str(&row.status)
        .map_err(|err| ClubRepositoryError::query(err.to_string()))?;

    Ok(Club::new(
        ClubId::from_uuid(row.id),
        name,
        description,
        status,
        row.membership_open,
        UserId::from_uuid(row.created_by),
        row.created_at,
    )
    .with_branding(row.logo, row.category_id))
}

#[async_trait]
impl ClubRepository for DieselClubRepository {
    async fn insert(&self, club: &Club) -> Result<Club, ClubRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let status = club.status().to_string();
        let new_row = NewClubRow {
            id: *club.id().as_uuid(),
            name: club.name().as_ref(),
            description: club.description().as_ref(),
            logo: club.logo(),
            category_id: club.category_id(),
            status: &status,
            membership_open: club.membership_open(),
            created_by: *club.created_by().as_uuid(),
            created_at: club.created_at(),
        };

        diesel::insert_into(clubs::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_club_diesel_error)?;

        Ok(club.clone())
    }

    async fn find_by_id(&self, club_id: &ClubId) -> Result<Option<Club>, ClubRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let row = clubs::table
            .find(club_id.as_uuid())
            .select(ClubRow::as_select())
            .first::<ClubRow>(&mut conn)
            .await
            .optional()
            .map_err(map_club_diesel_error)?;

        row.map(row_to_club).transpose()
    }

    async fn find_by_ids(&self, club_ids: &[ClubId]) -> Result<Vec<Club>, ClubRepositoryError> {
        if club_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let ids: Vec<Uuid> = club_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ClubRow> = clubs::table
            .filter(clubs::id.eq_any(&ids))
            .select(ClubRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_club_diesel_error)?;

        rows.into_iter().map(row_to_club).collect()
    }

    async fn list(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, ClubRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let mut query = clubs::table.select(ClubRow::as_select()).into_boxed();
        if let Some(status) = status {
            query = query.filter(clubs::status.eq(status.to_string()));
        }

        let rows: Vec<ClubRow> = query
            .order((clubs::created_at.desc(), clubs::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_club_diesel_error)?;

        rows.into_iter().map(row_to_club).collect()
    }

    async fn update_status(
        &self,
        club_id: &ClubId,
        status: ClubStatus,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let row = diesel::update(clubs::table.find(club_id.as_uuid()))
            .set((
                clubs::status.eq(status.to_string()),
                clubs::updated_at.eq(Utc::now()),
            ))
            .returning(ClubRow::as_returning())
            .get_result::<ClubRow>(&mut conn)
            .await
            .optional()
            .map_err(map_club_diesel_error)?;

        row.map(row_to_club).transpose()
    }

    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_club_pool_error)?;

        let row = diesel::update(clubs::table.find(club_id.as_uuid()))
            .set((
                clubs::membership_open.eq(open),
                clubs::updated_at.eq(Utc::now()),
            ))
            .returning(ClubRow::as_returning())
            .get_result::<ClubRow>(&mut conn)
            .await
            .optional()
            .map_err(map_club_diesel_error)?;

        row.map(row_to_club).transpose()
    }
}

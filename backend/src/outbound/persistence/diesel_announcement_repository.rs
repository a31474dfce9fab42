//! PostgreSQL-backed `AnnouncementRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `club_id` as well as the announcement id, so an
//! id that belongs to another club behaves exactly like a missing row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::announcement::{
    Announcement, AnnouncementBody, AnnouncementId, AnnouncementTitle,
};
use crate::domain::club::ClubId;
use crate::domain::ports::{AnnouncementRepository, AnnouncementRepositoryError};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AnnouncementContentUpdate, AnnouncementRow, NewAnnouncementRow};
use super::pool::{DbPool, PoolError};
use super::schema::announcements;

/// Diesel-backed implementation of the announcement repository port.
#[derive(Clone)]
pub struct DieselAnnouncementRepository {
    pool: DbPool,
}

impl DieselAnnouncementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_announcement_pool_error(error: PoolError) -> AnnouncementRepositoryError {
    map_pool_error(error, AnnouncementRepositoryError::connection)
}

fn map_announcement_diesel_error(error: diesel::result::Error) -> AnnouncementRepositoryError {
    map_diesel_error(
        error,
        AnnouncementRepositoryError::query,
        AnnouncementRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain announcement.
fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement, AnnouncementRepositoryError> {
    let title = AnnouncementTitle::new(row.title)
        .map_err(|err| AnnouncementRepositoryError::query(err.to_string()))?;
    let body = AnnouncementBody::new(row.body)
        .map_err(|err| AnnouncementRepositoryError::query(err.to_string()))?;

    Ok(Announcement::new(
        AnnouncementId::from_uuid(row.id),
        ClubId::from_uuid(row.club_id),
        UserId::from_uuid(row.author_id),
        title,
        body,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl AnnouncementRepository for DieselAnnouncementRepository {
    async fn insert(
        &self,
        announcement: &Announcement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_announcement_pool_error)?;

        let new_row = NewAnnouncementRow {
            id: *announcement.id().as_uuid(),
            club_id: *announcement.club_id().as_uuid(),
            author_id: *announcement.author_id().as_uuid(),
            title: announcement.title().as_ref(),
            body: announcement.body().as_ref(),
            created_at: announcement.created_at(),
            updated_at: announcement.updated_at(),
        };

        diesel::insert_into(announcements::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_announcement_diesel_error)?;

        Ok(announcement.clone())
    }

    async fn find_by_id(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_announcement_pool_error)?;

        let row = announcements::table
            .find(announcement_id.as_uuid())
            .filter(announcements::club_id.eq(club_id.as_uuid()))
            .select(AnnouncementRow::as_select())
            .first::<AnnouncementRow>(&mut conn)
            .await
            .optional()
            .map_err(map_announcement_diesel_error)?;

        row.map(row_to_announcement).transpose()
    }

    async fn update(
        &self,
        announcement: &Announcement,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_announcement_pool_error)?;

        let changes = AnnouncementContentUpdate {
            title: announcement.title().as_ref(),
            body: announcement.body().as_ref(),
            updated_at: announcement.updated_at(),
        };

        let row = diesel::update(
            announcements::table
                .find(announcement.id().as_uuid())
                .filter(announcements::club_id.eq(announcement.club_id().as_uuid())),
        )
        .set(&changes)
        .returning(AnnouncementRow::as_returning())
        .get_result::<AnnouncementRow>(&mut conn)
        .await
        .optional()
        .map_err(map_announcement_diesel_error)?;

        row.map(row_to_announcement).transpose()
    }

    async fn delete(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<bool, AnnouncementRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_announcement_pool_error)?;

        let deleted = diesel::delete(
            announcements::table
                .find(announcement_id.as_uuid())
                .filter(announcements::club_id.eq(club_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_announcement_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_announcement_pool_error)?;

        let rows: Vec<AnnouncementRow> = announcements::table
            .filter(announcements::club_id.eq(club_id.as_uuid()))
            .order((announcements::created_at.desc(), announcements::id.desc()))
            .select(AnnouncementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_announcement_diesel_error)?;

        rows.into_iter().map(row_to_announcement).collect()
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
    fn valid_row() -> AnnouncementRow {
        let now = Utc::now();
        AnnouncementRow {
            id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "Match night".to_owned(),
            body: "Bring your own clock; boards are provided.".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_conversion_keeps_content(valid_row: AnnouncementRow) {
        let club_id = valid_row.club_id;
        let announcement = row_to_announcement(valid_row).expect("row should convert");
        assert_eq!(announcement.title().as_ref(), "Match night");
        assert_eq!(announcement.club_id().as_uuid(), &club_id);
    }

    #[rstest]
    fn row_conversion_rejects_a_blank_title(mut valid_row: AnnouncementRow) {
        valid_row.title = "   ".to_owned();

        let error = row_to_announcement(valid_row).expect_err("blank title should fail");
        assert!(matches!(error, AnnouncementRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_announcement_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            AnnouncementRepositoryError::Connection { .. }
        ));
    }
}

//! Driving port for announcement mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::announcement::{Announcement, AnnouncementId};
use crate::domain::club::ClubId;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Serializable announcement view shared by the announcement ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPayload {
    pub id: AnnouncementId,
    pub club_id: ClubId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementPayload {
    fn from(value: Announcement) -> Self {
        Self {
            id: value.id().clone(),
            club_id: value.club_id().clone(),
            author_id: value.author_id().clone(),
            title: value.title().as_ref().to_owned(),
            body: value.body().as_ref().to_owned(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Title and body for a new or edited announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementContentRequest {
    pub title: String,
    pub body: String,
}

/// Driving port for announcement write operations. President only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementsCommand: Send + Sync {
    /// Post a new announcement to a club.
    async fn post(
        &self,
        club_id: &ClubId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error>;

    /// Replace an announcement's title and body.
    async fn edit(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error>;

    /// Delete an announcement.
    async fn delete(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
        acting: &UserId,
    ) -> Result<(), Error>;
}

/// Fixture command implementation for tests that do not post announcements.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnouncementsCommand;

#[async_trait]
impl AnnouncementsCommand for FixtureAnnouncementsCommand {
    async fn post(
        &self,
        club_id: &ClubId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error> {
        let now = Utc::now();
        Ok(AnnouncementPayload {
            id: AnnouncementId::random(),
            club_id: club_id.clone(),
            author_id: acting.clone(),
            title: request.title,
            body: request.body,
            created_at: now,
            updated_at: now,
        })
    }

    async fn edit(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
        acting: &UserId,
        request: AnnouncementContentRequest,
    ) -> Result<AnnouncementPayload, Error> {
        let now = Utc::now();
        Ok(AnnouncementPayload {
            id: announcement_id.clone(),
            club_id: club_id.clone(),
            author_id: acting.clone(),
            title: request.title,
            body: request.body,
            created_at: now,
            updated_at: now,
        })
    }

    async fn delete(
        &self,
        _club_id: &ClubId,
        _announcement_id: &AnnouncementId,
        _acting: &UserId,
    ) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_post_echoes_content() {
        let command = FixtureAnnouncementsCommand;
        let club_id = ClubId::random();
        let acting = UserId::random();
        let payload = command
            .post(
                &club_id,
                &acting,
                AnnouncementContentRequest {
                    title: "Spring tournament".to_owned(),
                    body: "Sign-ups open Friday.".to_owned(),
                },
            )
            .await
            .expect("fixture post succeeds");
        assert_eq!(payload.club_id, club_id);
        assert_eq!(payload.author_id, acting);
        assert_eq!(payload.title, "Spring tournament");
    }

    #[test]
    fn payload_serialises_camel_case() {
        let now = Utc::now();
        let payload = AnnouncementPayload {
            id: AnnouncementId::random(),
            club_id: ClubId::random(),
            author_id: UserId::random(),
            title: "Spring tournament".to_owned(),
            body: "Sign-ups open Friday.".to_owned(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&payload).expect("serialise");
        assert!(json.get("clubId").is_some());
        assert!(json.get("authorId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}

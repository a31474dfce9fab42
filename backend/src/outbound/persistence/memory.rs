//! In-memory repository adapters.
//!
//! Back unit and integration tests without a database. Each store is a
//! mutex-guarded map shared across clones, so handler state and test
//! assertions observe the same rows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::announcement::{Announcement, AnnouncementId};
use crate::domain::auth::{LoginCredentials, PasswordDigest};
use crate::domain::club::{Club, ClubId, ClubStatus};
use crate::domain::membership::{MemberProfile, Membership, Role};
use crate::domain::ports::{
    AnnouncementRepository, AnnouncementRepositoryError, ClubRepository, ClubRepositoryError,
    LoginService, MembershipRepository, MembershipRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::user::{User, UserId, Username};
use crate::domain::Error;

/// Locks never stay held across an await, so a poisoned mutex only means a
/// panicking test; recover the data rather than cascade the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// User store keyed by id, with the password digest alongside the profile.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, (User, PasswordDigest)>>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn credentials_for(&self, username: &str) -> Option<(UserId, PasswordDigest)> {
        let users = lock(&self.users);
        users
            .values()
            .find(|(user, _)| user.username().as_ref() == username)
            .map(|(user, digest)| (user.id().clone(), digest.clone()))
    }

    fn profile(&self, user_id: &Uuid) -> Option<User> {
        let users = lock(&self.users);
        users.get(user_id).map(|(user, _)| user.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_digest: &PasswordDigest,
    ) -> Result<User, UserRepositoryError> {
        let mut users = lock(&self.users);
        let duplicate = users
            .values()
            .any(|(existing, _)| existing.username() == user.username());
        if duplicate {
            return Err(UserRepositoryError::duplicate_username(
                user.username().as_ref(),
            ));
        }

        users.insert(
            *user.id().as_uuid(),
            (user.clone(), password_digest.clone()),
        );
        Ok(user.clone())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.profile(user_id.as_uuid()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let users = lock(&self.users);
        Ok(users
            .values()
            .find(|(user, _)| user.username() == username)
            .map(|(user, _)| user.clone()))
    }
}

/// Authenticates against the shared in-memory user store.
#[derive(Debug, Clone)]
pub struct MemoryLoginService {
    users: MemoryUserRepository,
}

impl MemoryLoginService {
    /// Create a login service over the given user store.
    pub fn new(users: MemoryUserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for MemoryLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some((user_id, digest)) = self.users.credentials_for(credentials.username()) else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !digest.matches(credentials.password()) {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(user_id)
    }
}

/// Club store keyed by id.
#[derive(Debug, Default, Clone)]
pub struct MemoryClubRepository {
    clubs: Arc<Mutex<HashMap<Uuid, Club>>>,
}

impl MemoryClubRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn club_with_status(club: &Club, status: ClubStatus) -> Club {
    Club::new(
        club.id().clone(),
        club.name().clone(),
        club.description().clone(),
        status,
        club.membership_open(),
        club.created_by().clone(),
        club.created_at(),
    )
    .with_branding(club.logo().map(str::to_owned), club.category_id())
}

fn club_with_membership_open(club: &Club, open: bool) -> Club {
    Club::new(
        club.id().clone(),
        club.name().clone(),
        club.description().clone(),
        club.status(),
        open,
        club.created_by().clone(),
        club.created_at(),
    )
    .with_branding(club.logo().map(str::to_owned), club.category_id())
}

#[async_trait]
impl ClubRepository for MemoryClubRepository {
    async fn insert(&self, club: &Club) -> Result<Club, ClubRepositoryError> {
        let mut clubs = lock(&self.clubs);
        clubs.insert(*club.id().as_uuid(), club.clone());
        Ok(club.clone())
    }

    async fn find_by_id(&self, club_id: &ClubId) -> Result<Option<Club>, ClubRepositoryError> {
        let clubs = lock(&self.clubs);
        Ok(clubs.get(club_id.as_uuid()).cloned())
    }

    async fn find_by_ids(&self, club_ids: &[ClubId]) -> Result<Vec<Club>, ClubRepositoryError> {
        let clubs = lock(&self.clubs);
        Ok(club_ids
            .iter()
            .filter_map(|id| clubs.get(id.as_uuid()).cloned())
            .collect())
    }

    async fn list(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, ClubRepositoryError> {
        let clubs = lock(&self.clubs);
        let mut listed: Vec<Club> = clubs
            .values()
            .filter(|club| status.is_none_or(|wanted| club.status() == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(listed)
    }

    async fn update_status(
        &self,
        club_id: &ClubId,
        status: ClubStatus,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        let mut clubs = lock(&self.clubs);
        let Some(club) = clubs.get(club_id.as_uuid()) else {
            return Ok(None);
        };
        let updated = club_with_status(club, status);
        clubs.insert(*club_id.as_uuid(), updated.clone());
        Ok(Some(updated))
    }

    async fn set_membership_open(
        &self,
        club_id: &ClubId,
        open: bool,
    ) -> Result<Option<Club>, ClubRepositoryError> {
        let mut clubs = lock(&self.clubs);
        let Some(club) = clubs.get(club_id.as_uuid()) else {
            return Ok(None);
        };
        let updated = club_with_membership_open(club, open);
        clubs.insert(*club_id.as_uuid(), updated.clone());
        Ok(Some(updated))
    }
}

/// Membership store keyed by (club, user), joined with the user store for
/// directory listings.
#[derive(Debug, Clone)]
pub struct MemoryMembershipRepository {
    rows: Arc<Mutex<HashMap<(Uuid, Uuid), Membership>>>,
    users: MemoryUserRepository,
}

impl MemoryMembershipRepository {
    /// Create an empty store joined against the given user store.
    pub fn new(users: MemoryUserRepository) -> Self {
        Self {
            rows: Arc::new(Mutex::new(HashMap::new())),
            users,
        }
    }
}

fn request_order(a: &Membership, b: &Membership) -> std::cmp::Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.user_id().as_uuid().cmp(b.user_id().as_uuid()))
}

#[async_trait]
impl MembershipRepository for MemoryMembershipRepository {
    async fn get(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipRepositoryError> {
        let rows = lock(&self.rows);
        Ok(rows.get(&(*club_id.as_uuid(), *user_id.as_uuid())).cloned())
    }

    async fn upsert(
        &self,
        membership: &Membership,
    ) -> Result<Membership, MembershipRepositoryError> {
        let mut rows = lock(&self.rows);
        rows.insert(
            (
                *membership.club_id().as_uuid(),
                *membership.user_id().as_uuid(),
            ),
            membership.clone(),
        );
        Ok(membership.clone())
    }

    async fn delete(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<(), MembershipRepositoryError> {
        let mut rows = lock(&self.rows);
        rows.remove(&(*club_id.as_uuid(), *user_id.as_uuid()));
        Ok(())
    }

    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        let rows = lock(&self.rows);
        let mut listed: Vec<Membership> = rows
            .values()
            .filter(|row| row.club_id() == club_id)
            .cloned()
            .collect();
        listed.sort_by(request_order);
        Ok(listed)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, MembershipRepositoryError> {
        let rows = lock(&self.rows);
        let mut listed: Vec<Membership> = rows
            .values()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.club_id().as_uuid().cmp(b.club_id().as_uuid()))
        });
        Ok(listed)
    }

    async fn list_profiles_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError> {
        let memberships = self.list_by_club(club_id).await?;
        memberships
            .into_iter()
            .map(|membership| {
                let user = self
                    .users
                    .profile(membership.user_id().as_uuid())
                    .ok_or_else(|| {
                        MembershipRepositoryError::query(format!(
                            "member profile missing for user {}",
                            membership.user_id()
                        ))
                    })?;
                Ok(MemberProfile {
                    user_id: membership.user_id().clone(),
                    username: user.username().clone(),
                    display_name: user.display_name().clone(),
                    avatar: user.avatar().map(str::to_owned),
                    role: membership.role(),
                    since: membership.created_at(),
                })
            })
            .collect()
    }

    async fn transfer_presidency(
        &self,
        club_id: &ClubId,
        outgoing: &UserId,
        incoming: &UserId,
        demoted_role: Role,
    ) -> Result<(), MembershipRepositoryError> {
        let mut rows = lock(&self.rows);
        let outgoing_key = (*club_id.as_uuid(), *outgoing.as_uuid());
        let incoming_key = (*club_id.as_uuid(), *incoming.as_uuid());
        let now = Utc::now();

        // Resolve both rows before touching either, so a missing row leaves
        // the store unchanged.
        let demoted = rows
            .get(&outgoing_key)
            .map(|row| row.with_role(demoted_role, now))
            .ok_or_else(|| MembershipRepositoryError::query("outgoing president row missing"))?;
        let promoted = rows
            .get(&incoming_key)
            .map(|row| row.with_role(Role::President, now))
            .ok_or_else(|| MembershipRepositoryError::query("incoming member row missing"))?;

        rows.insert(outgoing_key, demoted);
        rows.insert(incoming_key, promoted);
        Ok(())
    }
}

/// Announcement store keyed by announcement id.
#[derive(Debug, Default, Clone)]
pub struct MemoryAnnouncementRepository {
    rows: Arc<Mutex<HashMap<Uuid, Announcement>>>,
}

impl MemoryAnnouncementRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnnouncementRepository for MemoryAnnouncementRepository {
    async fn insert(
        &self,
        announcement: &Announcement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        let mut rows = lock(&self.rows);
        rows.insert(*announcement.id().as_uuid(), announcement.clone());
        Ok(announcement.clone())
    }

    async fn find_by_id(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        let rows = lock(&self.rows);
        Ok(rows
            .get(announcement_id.as_uuid())
            .filter(|row| row.club_id() == club_id)
            .cloned())
    }

    async fn update(
        &self,
        announcement: &Announcement,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        let mut rows = lock(&self.rows);
        let matches = rows
            .get(announcement.id().as_uuid())
            .is_some_and(|row| row.club_id() == announcement.club_id());
        if !matches {
            return Ok(None);
        }

        rows.insert(*announcement.id().as_uuid(), announcement.clone());
        Ok(Some(announcement.clone()))
    }

    async fn delete(
        &self,
        club_id: &ClubId,
        announcement_id: &AnnouncementId,
    ) -> Result<bool, AnnouncementRepositoryError> {
        let mut rows = lock(&self.rows);
        let matches = rows
            .get(announcement_id.as_uuid())
            .is_some_and(|row| row.club_id() == club_id);
        if !matches {
            return Ok(false);
        }

        rows.remove(announcement_id.as_uuid());
        Ok(true)
    }

    async fn list_by_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        let rows = lock(&self.rows);
        let mut listed: Vec<Announcement> = rows
            .values()
            .filter(|row| row.club_id() == club_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory adapters.

    use chrono::Duration;

    use crate::domain::club::{ClubDescription, ClubName};
    use crate::domain::user::{DisplayName, Username};

    use super::*;

    fn seeded_user(username: &str) -> (User, PasswordDigest) {
        let user = User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            DisplayName::new("Grace Hopper").expect("valid display name"),
            false,
        );
        (user, PasswordDigest::from_password("password"))
    }

    fn sample_club(created_by: &UserId) -> Club {
        Club::new(
            ClubId::random(),
            ClubName::new("Chess Club").expect("valid name"),
            ClubDescription::new("Weekly chess meetups for all levels").expect("valid description"),
            ClubStatus::Pending,
            true,
            created_by.clone(),
            Utc::now(),
        )
        .with_branding(Some("/logos/chess.png".to_owned()), None)
    }

    #[tokio::test]
    async fn user_store_round_trips_and_rejects_duplicates() {
        let repo = MemoryUserRepository::new();
        let (user, digest) = seeded_user("grace");
        repo.insert(&user, &digest).await.expect("insert succeeds");

        let found = repo
            .find_by_username(&Username::new("grace").expect("valid username"))
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(found.id(), user.id());

        let (rival, rival_digest) = seeded_user("grace");
        let error = repo
            .insert(&rival, &rival_digest)
            .await
            .expect_err("duplicate username rejected");
        assert!(matches!(
            error,
            UserRepositoryError::DuplicateUsername { .. }
        ));
    }

    #[tokio::test]
    async fn login_checks_the_stored_digest() {
        let repo = MemoryUserRepository::new();
        let (user, digest) = seeded_user("grace");
        repo.insert(&user, &digest).await.expect("insert succeeds");
        let login = MemoryLoginService::new(repo);

        let good = LoginCredentials::try_from_parts("grace", "password").expect("valid parts");
        let authenticated = login.authenticate(&good).await.expect("login succeeds");
        assert_eq!(&authenticated, user.id());

        let bad = LoginCredentials::try_from_parts("grace", "nope").expect("valid parts");
        let error = login.authenticate(&bad).await.expect_err("login fails");
        assert_eq!(error.code(), crate::domain::ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn club_status_update_preserves_branding() {
        let repo = MemoryClubRepository::new();
        let club = sample_club(&UserId::random());
        repo.insert(&club).await.expect("insert succeeds");

        let approved = repo
            .update_status(club.id(), ClubStatus::Approved)
            .await
            .expect("update succeeds")
            .expect("club present");
        assert_eq!(approved.status(), ClubStatus::Approved);
        assert_eq!(approved.logo(), Some("/logos/chess.png"));
        assert_eq!(approved.created_at(), club.created_at());
    }

    #[tokio::test]
    async fn club_list_filters_by_status_newest_first() {
        let repo = MemoryClubRepository::new();
        let creator = UserId::random();
        let older = sample_club(&creator);
        let newer = Club::new(
            ClubId::random(),
            ClubName::new("Robotics Society").expect("valid name"),
            ClubDescription::new("Build and battle robots together").expect("valid description"),
            ClubStatus::Pending,
            true,
            creator.clone(),
            older.created_at() + Duration::minutes(5),
        );
        repo.insert(&older).await.expect("insert succeeds");
        repo.insert(&newer).await.expect("insert succeeds");

        let pending = repo
            .list(Some(ClubStatus::Pending))
            .await
            .expect("list succeeds");
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id(), newer.id());

        let approved = repo
            .list(Some(ClubStatus::Approved))
            .await
            .expect("list succeeds");
        assert!(approved.is_empty());
    }

    #[tokio::test]
    async fn presidency_transfer_swaps_both_roles() {
        let users = MemoryUserRepository::new();
        let repo = MemoryMembershipRepository::new(users);
        let club_id = ClubId::random();
        let president = UserId::random();
        let member = UserId::random();
        let now = Utc::now();
        repo.upsert(&Membership::new(
            club_id.clone(),
            president.clone(),
            Role::President,
            now,
            now,
        ))
        .await
        .expect("seed president");
        repo.upsert(&Membership::new(
            club_id.clone(),
            member.clone(),
            Role::Member,
            now,
            now,
        ))
        .await
        .expect("seed member");

        repo.transfer_presidency(&club_id, &president, &member, Role::Member)
            .await
            .expect("transfer succeeds");

        let demoted = repo
            .get(&club_id, &president)
            .await
            .expect("lookup succeeds")
            .expect("row present");
        assert_eq!(demoted.role(), Role::Member);
        let promoted = repo
            .get(&club_id, &member)
            .await
            .expect("lookup succeeds")
            .expect("row present");
        assert_eq!(promoted.role(), Role::President);
    }

    #[tokio::test]
    async fn presidency_transfer_leaves_the_store_unchanged_on_a_missing_row() {
        let users = MemoryUserRepository::new();
        let repo = MemoryMembershipRepository::new(users);
        let club_id = ClubId::random();
        let president = UserId::random();
        let now = Utc::now();
        repo.upsert(&Membership::new(
            club_id.clone(),
            president.clone(),
            Role::President,
            now,
            now,
        ))
        .await
        .expect("seed president");

        let error = repo
            .transfer_presidency(&club_id, &president, &UserId::random(), Role::Member)
            .await
            .expect_err("missing incoming row fails");
        assert!(error.to_string().contains("incoming member row missing"));

        let untouched = repo
            .get(&club_id, &president)
            .await
            .expect("lookup succeeds")
            .expect("row present");
        assert_eq!(untouched.role(), Role::President);
    }

    #[tokio::test]
    async fn member_directory_joins_profiles_in_request_order() {
        let users = MemoryUserRepository::new();
        let (grace, digest) = seeded_user("grace");
        users.insert(&grace, &digest).await.expect("seed grace");
        let (ada, ada_digest) = seeded_user("ada");
        users.insert(&ada, &ada_digest).await.expect("seed ada");

        let repo = MemoryMembershipRepository::new(users);
        let club_id = ClubId::random();
        let first = Utc::now() - Duration::minutes(10);
        repo.upsert(&Membership::new(
            club_id.clone(),
            grace.id().clone(),
            Role::President,
            first,
            first,
        ))
        .await
        .expect("seed president");
        let second = first + Duration::minutes(5);
        repo.upsert(&Membership::new(
            club_id.clone(),
            ada.id().clone(),
            Role::Pending,
            second,
            second,
        ))
        .await
        .expect("seed applicant");

        let profiles = repo
            .list_profiles_by_club(&club_id)
            .await
            .expect("listing succeeds");
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].username.as_ref(), "grace");
        assert_eq!(profiles[1].username.as_ref(), "ada");
        assert_eq!(profiles[1].role, Role::Pending);
    }

    #[tokio::test]
    async fn announcements_are_scoped_to_their_club() {
        use crate::domain::announcement::{AnnouncementBody, AnnouncementTitle};

        let repo = MemoryAnnouncementRepository::new();
        let club_id = ClubId::random();
        let announcement = Announcement::new(
            AnnouncementId::random(),
            club_id.clone(),
            UserId::random(),
            AnnouncementTitle::new("Match night").expect("valid title"),
            AnnouncementBody::new("Boards are provided.").expect("valid body"),
            Utc::now(),
            Utc::now(),
        );
        repo.insert(&announcement).await.expect("insert succeeds");

        let other_club = repo
            .find_by_id(&ClubId::random(), announcement.id())
            .await
            .expect("lookup succeeds");
        assert!(other_club.is_none());

        let deleted_elsewhere = repo
            .delete(&ClubId::random(), announcement.id())
            .await
            .expect("delete succeeds");
        assert!(!deleted_elsewhere);

        let deleted = repo
            .delete(&club_id, announcement.id())
            .await
            .expect("delete succeeds");
        assert!(deleted);
    }
}

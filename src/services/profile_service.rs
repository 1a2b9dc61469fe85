use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::profile::{
    Education, Experience, Profile, ProfileWithUser, ProfileWithUserRow, SocialLinks,
};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("no profile exists for this user")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Partial update document for the upsert operation. Required fields are
/// always applied; optional fields overwrite only when supplied, so fields
/// absent from a request are never nulled out.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: SocialLinks,
}

/// Parse a comma-separated skills string into a trimmed, order-preserving
/// list. Empty segments are dropped.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_update(profile: &mut Profile, update: ProfileUpdate) {
    profile.status = update.status;
    profile.skills = update.skills;

    if let Some(v) = update.company {
        profile.company = Some(v);
    }
    if let Some(v) = update.website {
        profile.website = Some(v);
    }
    if let Some(v) = update.location {
        profile.location = Some(v);
    }
    if let Some(v) = update.bio {
        profile.bio = Some(v);
    }
    if let Some(v) = update.githubusername {
        profile.githubusername = Some(v);
    }

    let social = &mut profile.social.0;
    if let Some(v) = update.social.youtube {
        social.youtube = Some(v);
    }
    if let Some(v) = update.social.twitter {
        social.twitter = Some(v);
    }
    if let Some(v) = update.social.facebook {
        social.facebook = Some(v);
    }
    if let Some(v) = update.social.linkedin {
        social.linkedin = Some(v);
    }
    if let Some(v) = update.social.instagram {
        social.instagram = Some(v);
    }
}

fn new_profile(user_id: Uuid, update: ProfileUpdate) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::new_v4(),
        user_id,
        status: update.status,
        company: update.company,
        website: update.website,
        location: update.location,
        bio: update.bio,
        githubusername: update.githubusername,
        skills: update.skills,
        social: Json(update.social),
        experience: Json(vec![]),
        education: Json(vec![]),
        created_at: now,
        updated_at: now,
    }
}

const JOIN_USER_SELECT: &str = "SELECT p.*, u.name AS user_name, u.avatar AS user_avatar \
     FROM profiles p JOIN users u ON u.id = p.user_id";

/// All profile reads and writes. One instance per request is fine; it only
/// holds a pool handle.
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    /// Profile for one user with the linked user's name and avatar.
    pub async fn find_with_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileWithUser>, ProfileError> {
        let sql = format!("{} WHERE p.user_id = $1", JOIN_USER_SELECT);
        let row = sqlx::query_as::<_, ProfileWithUserRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ProfileWithUser::from))
    }

    /// Every profile, each with the linked user's name and avatar.
    pub async fn list_with_users(&self) -> Result<Vec<ProfileWithUser>, ProfileError> {
        let rows = sqlx::query_as::<_, ProfileWithUserRow>(JOIN_USER_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ProfileWithUser::from).collect())
    }

    /// Create-if-absent, update-if-present. The existence lookup is awaited
    /// before branching; the update path merges only the supplied fields
    /// over the stored document.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        match self.find_by_user(user_id).await? {
            Some(mut profile) => {
                apply_update(&mut profile, update);
                self.save(&profile).await
            }
            None => self.insert(new_profile(user_id, update)).await,
        }
    }

    /// Delete the user's posts, profile and user record, in that order.
    /// Deliberately not transactional: a failure mid-sequence leaves the
    /// earlier deletions in place and surfaces as a server error.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<(), ProfileError> {
        sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn add_experience(
        &self,
        user_id: Uuid,
        entry: Experience,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.add_experience(entry);
        self.save(&profile).await
    }

    pub async fn remove_experience(
        &self,
        user_id: Uuid,
        entry_id: &str,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.remove_experience(entry_id);
        self.save(&profile).await
    }

    pub async fn add_education(
        &self,
        user_id: Uuid,
        entry: Education,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.add_education(entry);
        self.save(&profile).await
    }

    pub async fn remove_education(
        &self,
        user_id: Uuid,
        entry_id: &str,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self
            .find_by_user(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;
        profile.remove_education(entry_id);
        self.save(&profile).await
    }

    async fn insert(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let inserted = sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles \
             (id, user_id, status, company, website, location, bio, githubusername, \
              skills, social, experience, education, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING *",
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.status)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.githubusername)
        .bind(&profile.skills)
        .bind(&profile.social)
        .bind(&profile.experience)
        .bind(&profile.education)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn save(&self, profile: &Profile) -> Result<Profile, ProfileError> {
        let saved = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET \
             status = $2, company = $3, website = $4, location = $5, bio = $6, \
             githubusername = $7, skills = $8, social = $9, experience = $10, \
             education = $11, updated_at = now() \
             WHERE user_id = $1 \
             RETURNING *",
        )
        .bind(profile.user_id)
        .bind(&profile.status)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.githubusername)
        .bind(&profile.skills)
        .bind(&profile.social)
        .bind(&profile.experience)
        .bind(&profile.education)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }
}

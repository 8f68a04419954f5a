//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use matcha_core::entities::{Candidate, Preferences, Profile, SearchFilter};
use matcha_core::error::DomainError;
use matcha_core::traits::{ProfileRepository, RepoResult};
use matcha_core::value_objects::UserId;

use crate::models::{CandidateModel, PreferencesModel, ProfileModel};

use super::error::{map_db_error, map_foreign_key_violation};
use super::fame::refresh_fame;

const PROFILE_COLUMNS: &str = "user_id, bio, age, gender, sexual_pref, location, latitude, \
     longitude, avatar_url, photo1_url, photo2_url, photo3_url, photo4_url, photo5_url";

/// Candidate row for requester `$1`, with the tag names both users carry
const CANDIDATE_COLUMNS: &str = r"
    u.user_id, u.name, u.fame_rating, p.age, p.bio, p.gender, p.avatar_url,
    p.latitude, p.longitude, u.created_at,
    ARRAY(
        SELECT t.name
        FROM user_tags mine
        JOIN user_tags theirs ON theirs.tag_id = mine.tag_id
        JOIN tags t ON t.tag_id = mine.tag_id
        WHERE mine.user_id = $1 AND theirs.user_id = u.user_id
        ORDER BY t.name
    ) AS common_tags";

/// `$5` holds tag names; an empty array disables the filter
const CARRIES_ANY_TAG_5: &str = r"(
    CARDINALITY($5::TEXT[]) = 0 OR EXISTS (
        SELECT 1 FROM user_tags ut
        JOIN tags t ON t.tag_id = ut.tag_id
        WHERE ut.user_id = u.user_id AND t.name = ANY($5::TEXT[])
    )
)";

const NOT_BLOCKED: &str = r"NOT EXISTS (
    SELECT 1 FROM blocked_users b
    WHERE (b.blocker_id = $1 AND b.blocked_id = u.user_id)
       OR (b.blocker_id = u.user_id AND b.blocked_id = $1)
)";

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn upsert(&self, profile: &Profile) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let [photo1, photo2, photo3, photo4, photo5] = &profile.photos;
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, bio, age, gender, sexual_pref, location, latitude,
                                  longitude, avatar_url, photo1_url, photo2_url, photo3_url,
                                  photo4_url, photo5_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (user_id) DO UPDATE SET
                bio = EXCLUDED.bio,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                sexual_pref = EXCLUDED.sexual_pref,
                location = EXCLUDED.location,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                avatar_url = EXCLUDED.avatar_url,
                photo1_url = EXCLUDED.photo1_url,
                photo2_url = EXCLUDED.photo2_url,
                photo3_url = EXCLUDED.photo3_url,
                photo4_url = EXCLUDED.photo4_url,
                photo5_url = EXCLUDED.photo5_url
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(&profile.bio)
        .bind(profile.age)
        .bind(&profile.gender)
        .bind(&profile.sexual_pref)
        .bind(&profile.location)
        .bind(profile.latitude)
        .bind(profile.longitude)
        .bind(&profile.avatar_url)
        .bind(photo1)
        .bind(photo2)
        .bind(photo3)
        .bind(photo4)
        .bind(photo5)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(profile.user_id)))?;

        refresh_fame(&mut tx, profile.user_id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProfileNotFound(user_id));
        }

        refresh_fame(&mut tx, user_id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_preferences(&self, user_id: UserId) -> RepoResult<Option<Preferences>> {
        let result = sqlx::query_as::<_, PreferencesModel>(
            r"
            SELECT user_id, preferred_gender, age_min, age_max, max_distance_km
            FROM preferences
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Preferences::try_from).transpose()
    }

    #[instrument(skip(self, preferences), fields(user_id = %preferences.user_id))]
    async fn upsert_preferences(&self, preferences: &Preferences) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO preferences (user_id, preferred_gender, age_min, age_max, max_distance_km)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                preferred_gender = EXCLUDED.preferred_gender,
                age_min = EXCLUDED.age_min,
                age_max = EXCLUDED.age_max,
                max_distance_km = EXCLUDED.max_distance_km
            ",
        )
        .bind(preferences.user_id.into_inner())
        .bind(preferences.preferred_gender.as_str())
        .bind(preferences.age_min)
        .bind(preferences.age_max)
        .bind(preferences.max_distance_km)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::UserNotFound(preferences.user_id))
        })?;

        Ok(())
    }

    #[instrument(skip(self, preferences, tags), fields(user_id = %preferences.user_id))]
    async fn discovery_candidates(
        &self,
        preferences: &Preferences,
        tags: &[String],
    ) -> RepoResult<Vec<Candidate>> {
        let models = sqlx::query_as::<_, CandidateModel>(&format!(
            r"
            SELECT {CANDIDATE_COLUMNS}
            FROM users u
            JOIN profiles p ON p.user_id = u.user_id
            WHERE u.user_id <> $1
              AND p.latitude IS NOT NULL
              AND p.longitude IS NOT NULL
              AND p.age BETWEEN $2 AND $3
              AND ($4 = 'both' OR LOWER(p.gender) = $4)
              AND {CARRIES_ANY_TAG_5}
              AND NOT EXISTS (
                  SELECT 1 FROM swipes s WHERE s.swiper_id = $1 AND s.swiped_id = u.user_id
              )
              AND NOT EXISTS (
                  SELECT 1 FROM profile_views v WHERE v.viewer_id = $1 AND v.viewed_id = u.user_id
              )
              AND {NOT_BLOCKED}
            "
        ))
        .bind(preferences.user_id.into_inner())
        .bind(preferences.age_min)
        .bind(preferences.age_max)
        .bind(preferences.preferred_gender.as_str())
        .bind(tags)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Candidate::from).collect())
    }

    #[instrument(skip(self, filter), fields(user_id = %filter.requester))]
    async fn search_candidates(&self, filter: &SearchFilter) -> RepoResult<Vec<Candidate>> {
        let models = sqlx::query_as::<_, CandidateModel>(&format!(
            r"
            SELECT {CANDIDATE_COLUMNS}
            FROM users u
            JOIN profiles p ON p.user_id = u.user_id
            WHERE u.user_id <> $1
              AND p.latitude IS NOT NULL
              AND p.longitude IS NOT NULL
              AND ($2::INTEGER IS NULL OR p.age >= $2)
              AND ($3::INTEGER IS NULL OR p.age <= $3)
              AND ($4 = 'both' OR LOWER(p.gender) = $4)
              AND {CARRIES_ANY_TAG_5}
              AND ($6::INTEGER IS NULL OR u.fame_rating >= $6)
              AND ($7::INTEGER IS NULL OR u.fame_rating <= $7)
              AND {NOT_BLOCKED}
            "
        ))
        .bind(filter.requester.into_inner())
        .bind(filter.age_min)
        .bind(filter.age_max)
        .bind(filter.gender.as_str())
        .bind(filter.tags.as_slice())
        .bind(filter.fame_min)
        .bind(filter.fame_max)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Candidate::from).collect())
    }
}

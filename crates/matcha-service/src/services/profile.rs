//! Profile service
//!
//! Profiles, discovery preferences and candidate discovery.

use std::cmp::Ordering;

use matcha_core::entities::{Candidate, Preferences, SearchFilter, Tag};
use matcha_core::rules::haversine_km;
use matcha_core::value_objects::UserId;
use tracing::{debug, info, instrument};

use crate::dto::{
    CandidateResponse, PreferencesRequest, PreferencesResponse, ProfileResponse, SearchSort,
    SearchUsersQuery, UpsertProfileRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or replace the profile of a user
    #[instrument(skip(self, request))]
    pub async fn upsert(
        &self,
        user_id: UserId,
        request: UpsertProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let profile = request.into_profile(user_id);
        self.ctx.profile_repo().upsert(&profile).await?;
        info!(complete = profile.is_complete(), "Profile saved");
        Ok(profile.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId) -> ServiceResult<ProfileResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile", user_id))?;
        Ok(profile.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.profile_repo().delete(user_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_preferences(&self, user_id: UserId) -> ServiceResult<PreferencesResponse> {
        let prefs = self
            .ctx
            .profile_repo()
            .find_preferences(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Preferences", user_id))?;
        Ok(PreferencesResponse::from(&prefs))
    }

    #[instrument(skip(self, request))]
    pub async fn set_preferences(
        &self,
        user_id: UserId,
        request: PreferencesRequest,
    ) -> ServiceResult<PreferencesResponse> {
        if request.age_min > request.age_max {
            return Err(ServiceError::validation(
                "Minimum age cannot be greater than maximum age",
            ));
        }
        let prefs = request.into_preferences(user_id);
        self.ctx.profile_repo().upsert_preferences(&prefs).await?;
        Ok(PreferencesResponse::from(&prefs))
    }

    /// Candidates for `user_id`: within the preferred distance, ordered by
    /// fame (highest first) and then distance (closest first).
    ///
    /// Users already swiped or viewed, and users blocked in either
    /// direction, are excluded by the repository query. A non-empty `tags`
    /// keeps only candidates carrying at least one of them.
    #[instrument(skip(self, tags))]
    pub async fn discover(
        &self,
        user_id: UserId,
        limit: usize,
        tags: &[String],
    ) -> ServiceResult<Vec<CandidateResponse>> {
        let origin = self.origin(user_id).await?;
        let prefs = self.preferences_or_default(user_id).await?;

        let found = self
            .ctx
            .profile_repo()
            .discovery_candidates(&prefs, &normalize_tags(tags))
            .await?;
        let mut candidates = within_reach(origin, found, Some(f64::from(prefs.max_distance_km)));
        candidates.sort_by(by_fame_then_distance);
        candidates.truncate(limit);

        debug!(found = candidates.len(), "Discovery finished");
        Ok(candidates)
    }

    /// Explicit search with optional age, fame, distance and tag bounds
    #[instrument(skip(self, query), fields(user_id = %query.current_user_id))]
    pub async fn search(&self, query: SearchUsersQuery) -> ServiceResult<Vec<CandidateResponse>> {
        if matches!((query.age_min, query.age_max), (Some(min), Some(max)) if min > max) {
            return Err(ServiceError::validation(
                "Minimum age cannot be greater than maximum age",
            ));
        }
        if matches!((query.fame_min, query.fame_max), (Some(min), Some(max)) if min > max) {
            return Err(ServiceError::validation(
                "Minimum fame cannot be greater than maximum fame",
            ));
        }

        let origin = self.origin(query.current_user_id).await?;
        let filter = SearchFilter {
            age_min: query.age_min,
            age_max: query.age_max,
            fame_min: query.fame_min,
            fame_max: query.fame_max,
            tags: normalize_tags(&query.tags),
            ..SearchFilter::new(query.current_user_id)
        };

        let found = self.ctx.profile_repo().search_candidates(&filter).await?;
        let mut results = within_reach(origin, found, query.max_distance_km);
        match query.sort_by {
            SearchSort::Age => results.sort_by(|a, b| {
                a.age.cmp(&b.age).then_with(|| by_distance(a, b))
            }),
            SearchSort::Distance => results.sort_by(by_distance),
            SearchSort::FameRating => results.sort_by(by_fame_then_distance),
        }
        results.truncate(SEARCH_LIMIT);

        debug!(found = results.len(), sort = ?query.sort_by, "Search finished");
        Ok(results)
    }

    /// Most famous users within the requester's preferences and distance
    #[instrument(skip(self))]
    pub async fn top_fame(&self, user_id: UserId) -> ServiceResult<Vec<CandidateResponse>> {
        let origin = self.origin(user_id).await?;
        let prefs = self.preferences_or_default(user_id).await?;

        let found = self
            .ctx
            .profile_repo()
            .search_candidates(&SearchFilter::from_preferences(&prefs))
            .await?;
        let mut ranked = within_reach(origin, found, Some(f64::from(prefs.max_distance_km)));
        ranked.sort_by(by_fame_then_distance);
        ranked.truncate(TOP_FAME_LIMIT);
        Ok(ranked)
    }

    async fn origin(&self, user_id: UserId) -> ServiceResult<(f64, f64)> {
        self.ctx
            .profile_repo()
            .find(user_id)
            .await?
            .and_then(|p| p.coordinates())
            .ok_or_else(|| ServiceError::validation("User location not set"))
    }

    async fn preferences_or_default(&self, user_id: UserId) -> ServiceResult<Preferences> {
        Ok(self
            .ctx
            .profile_repo()
            .find_preferences(user_id)
            .await?
            .unwrap_or_else(|| Preferences::defaults_for(user_id)))
    }
}

const SEARCH_LIMIT: usize = 50;
const TOP_FAME_LIMIT: usize = 20;

fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = tags
        .iter()
        .map(|t| Tag::normalize(t))
        .filter(|t| !t.is_empty())
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Attach distances from `origin`, dropping candidates beyond `max_km`
fn within_reach(
    origin: (f64, f64),
    candidates: Vec<Candidate>,
    max_km: Option<f64>,
) -> Vec<CandidateResponse> {
    candidates
        .into_iter()
        .filter_map(|c| {
            let distance_km = haversine_km(origin, (c.latitude, c.longitude));
            max_km
                .map_or(true, |max| distance_km <= max)
                .then(|| CandidateResponse::new(c, distance_km))
        })
        .collect()
}

fn by_distance(a: &CandidateResponse, b: &CandidateResponse) -> Ordering {
    a.distance_km
        .partial_cmp(&b.distance_km)
        .unwrap_or(Ordering::Equal)
}

fn by_fame_then_distance(a: &CandidateResponse, b: &CandidateResponse) -> Ordering {
    b.fame_rating
        .cmp(&a.fame_rating)
        .then_with(|| by_distance(a, b))
}

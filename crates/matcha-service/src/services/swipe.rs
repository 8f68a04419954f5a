//! Match engine
//!
//! Records a swipe and, on a reciprocal like, creates the match and its
//! chat. The write path (swipe upsert, match, chat, notification rows and
//! fame) is one transaction inside the swipe repository; this service
//! only pushes the committed notifications afterwards.

use matcha_core::value_objects::{SwipeId, UserId};
use tracing::{info, instrument};

use crate::dto::{SwipeRequest, SwipeResponse, SwipeSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;

/// Swipe service
pub struct SwipeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SwipeService<'a> {
    /// Create a new SwipeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a swipe and resolve a possible match.
    ///
    /// Safe to retry after a transient error: the swipe is an upsert and
    /// the match insert is a no-op when the pair already matched.
    #[instrument(skip(self, request), fields(swiper_id = %request.swiper_id, swiped_id = %request.swiped_id, direction = %request.direction))]
    pub async fn record_swipe(&self, request: SwipeRequest) -> ServiceResult<SwipeResponse> {
        let outcome = self
            .ctx
            .swipe_repo()
            .apply_swipe(request.swiper_id, request.swiped_id, request.direction)
            .await?;

        NotificationService::new(self.ctx).deliver(&outcome.notifications);

        match outcome.resolution.match_id() {
            Some(match_id) => {
                info!(match_id = %match_id, "Match created");
                Ok(SwipeResponse {
                    message: "Match created!".to_string(),
                    match_id: Some(match_id),
                })
            }
            None => Ok(SwipeResponse {
                message: "Swipe registered".to_string(),
                match_id: None,
            }),
        }
    }

    /// Likes a user has received, newest first
    #[instrument(skip(self))]
    pub async fn likes_received(
        &self,
        user_id: UserId,
    ) -> ServiceResult<Vec<SwipeSummaryResponse>> {
        let likes = self.ctx.swipe_repo().likes_received(user_id).await?;
        Ok(likes.into_iter().map(SwipeSummaryResponse::from).collect())
    }

    /// Swipes a user has made, newest first
    #[instrument(skip(self))]
    pub async fn given(&self, user_id: UserId) -> ServiceResult<Vec<SwipeSummaryResponse>> {
        let swipes = self.ctx.swipe_repo().given(user_id).await?;
        Ok(swipes.into_iter().map(SwipeSummaryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, swipe_id: SwipeId) -> ServiceResult<()> {
        self.ctx.swipe_repo().delete(swipe_id).await?;
        info!(swipe_id = %swipe_id, "Swipe deleted");
        Ok(())
    }
}

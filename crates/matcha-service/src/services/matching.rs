//! Match service
//!
//! Listing, statistics and unmatch. Creation happens only through the
//! swipe path.

use matcha_core::value_objects::{MatchId, UserId};
use tracing::{info, instrument};

use crate::dto::{CountResponse, MatchResponse, MatchStatsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Match service
pub struct MatchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MatchService<'a> {
    /// Create a new MatchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Matches of a user, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> ServiceResult<Vec<MatchResponse>> {
        let matches = self.ctx.match_repo().find_by_user(user_id).await?;
        Ok(matches.iter().map(MatchResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn count(&self, user_id: UserId) -> ServiceResult<CountResponse> {
        let count = self.ctx.match_repo().count_by_user(user_id).await?;
        Ok(CountResponse { count })
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, user_id: UserId) -> ServiceResult<MatchStatsResponse> {
        Ok(self.ctx.match_repo().stats(user_id).await?.into())
    }

    /// Delete a match and retract the two likes behind it.
    ///
    /// The chat and its messages go with the match; either user can
    /// start over from a fresh like afterwards.
    #[instrument(skip(self))]
    pub async fn unmatch(&self, match_id: MatchId) -> ServiceResult<()> {
        let removed = self.ctx.match_repo().unmatch(match_id).await?;
        info!(
            match_id = %match_id,
            user1_id = %removed.user1_id,
            user2_id = %removed.user2_id,
            "Unmatched"
        );
        Ok(())
    }
}

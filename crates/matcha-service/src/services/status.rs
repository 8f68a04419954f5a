//! Online status service
//!
//! Presence is derived from `last_login`: a user counts as online for a
//! short window after their last stamp.

use chrono::Utc;
use matcha_core::rules::online_cutoff;
use matcha_core::value_objects::UserId;
use tracing::{debug, instrument};

use crate::dto::{StatusUpdateResponse, UserStatusResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest number of ids accepted by one batch lookup
pub const MAX_BATCH: usize = 50;

const ONLINE_LIST_LIMIT: i64 = 100;

pub struct StatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatusService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Going online refreshes the login stamp; going offline leaves it as is
    #[instrument(skip(self))]
    pub async fn set_online(
        &self,
        user_id: UserId,
        is_online: bool,
    ) -> ServiceResult<StatusUpdateResponse> {
        if is_online {
            self.ctx.user_repo().touch_last_login(user_id).await?;
        }
        Ok(StatusUpdateResponse {
            message: "Status updated successfully".to_string(),
            is_online,
            last_seen: Utc::now(),
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId) -> ServiceResult<UserStatusResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        Ok(UserStatusResponse::observed(&user, Utc::now()))
    }

    /// Status of every existing user in a comma-separated id list
    #[instrument(skip(self))]
    pub async fn batch(&self, raw_ids: &str) -> ServiceResult<Vec<UserStatusResponse>> {
        let ids = parse_id_list(raw_ids)?;
        let now = Utc::now();
        let users = self.ctx.user_repo().find_many(&ids).await?;
        debug!(requested = ids.len(), found = users.len(), "Batch status lookup");
        Ok(users
            .iter()
            .map(|u| UserStatusResponse::observed(u, now))
            .collect())
    }

    /// Users seen within the online window, most recent first
    #[instrument(skip(self))]
    pub async fn online_users(&self) -> ServiceResult<Vec<UserStatusResponse>> {
        let now = Utc::now();
        let users = self
            .ctx
            .user_repo()
            .seen_since(online_cutoff(now), ONLINE_LIST_LIMIT)
            .await?;
        Ok(users
            .iter()
            .map(|u| UserStatusResponse::observed(u, now))
            .collect())
    }
}

fn parse_id_list(raw: &str) -> ServiceResult<Vec<UserId>> {
    let ids = raw
        .split(',')
        .map(|part| part.trim().parse::<UserId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ServiceError::validation("Invalid user IDs format"))?;
    if ids.len() > MAX_BATCH {
        return Err(ServiceError::validation(format!(
            "Too many user IDs (max {MAX_BATCH})"
        )));
    }
    Ok(ids)
}

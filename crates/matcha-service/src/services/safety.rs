//! Profile views, blocks and reports
//!
//! Every write here recomputes the fame of the user on the receiving end
//! inside the repository transaction.

use matcha_core::entities::NewNotification;
use matcha_core::value_objects::{NotificationKind, UserId};
use matcha_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{
    BlockCheckResponse, BlockRequest, BlockResponse, CountResponse, RecordViewRequest,
    ReportRequest, ReportResponse, ViewResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Profile view service
pub struct ViewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record that `viewer_id` looked at `viewed_id` and tell the viewed user
    #[instrument(skip(self, request), fields(viewer_id = %request.viewer_id, viewed_id = %request.viewed_id))]
    pub async fn record(&self, request: RecordViewRequest) -> ServiceResult<ViewResponse> {
        if request.viewer_id == request.viewed_id {
            return Err(ServiceError::validation("Cannot view own profile"));
        }

        let viewer = self
            .ctx
            .user_repo()
            .find_by_id(request.viewer_id)
            .await?
            .ok_or(DomainError::UserNotFound(request.viewer_id))?;

        let view = self
            .ctx
            .view_repo()
            .record(request.viewer_id, request.viewed_id)
            .await?;

        let notification = NewNotification::new(
            request.viewed_id,
            NotificationKind::View,
            format!("{} viewed your profile", viewer.name),
        )
        .related_to(viewer.id);
        if let Err(e) = NotificationService::new(self.ctx).notify(&notification).await {
            warn!(error = %e, "Failed to store view notification");
        }

        Ok(view.into())
    }

    #[instrument(skip(self))]
    pub async fn received(&self, user_id: UserId) -> ServiceResult<Vec<ViewResponse>> {
        let views = self.ctx.view_repo().received(user_id).await?;
        Ok(views.into_iter().map(ViewResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn count(&self, user_id: UserId) -> ServiceResult<CountResponse> {
        let count = self.ctx.view_repo().count_received(user_id).await?;
        Ok(CountResponse { count })
    }
}

/// Block service
pub struct BlockService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlockService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(blocker_id = %request.blocker_id, blocked_id = %request.blocked_id))]
    pub async fn create(&self, request: BlockRequest) -> ServiceResult<BlockResponse> {
        if request.blocker_id == request.blocked_id {
            return Err(ServiceError::validation("Cannot block yourself"));
        }
        let block = self
            .ctx
            .block_repo()
            .create(request.blocker_id, request.blocked_id)
            .await?;
        info!(block_id = %block.id, "User blocked");
        Ok(block.into())
    }

    /// Users blocked by `blocker`
    #[instrument(skip(self))]
    pub async fn list(&self, blocker: UserId) -> ServiceResult<Vec<BlockResponse>> {
        let blocks = self.ctx.block_repo().find_by_blocker(blocker).await?;
        Ok(blocks.into_iter().map(BlockResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, blocker: UserId, blocked: UserId) -> ServiceResult<()> {
        self.ctx.block_repo().delete(blocker, blocked).await?;
        info!("User unblocked");
        Ok(())
    }

    /// Whether either user blocked the other
    #[instrument(skip(self))]
    pub async fn check(&self, a: UserId, b: UserId) -> ServiceResult<BlockCheckResponse> {
        let blocked = self.ctx.block_repo().exists_between(a, b).await?;
        Ok(BlockCheckResponse { blocked })
    }
}

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(reporter_id = %request.reporter_id, reported_id = %request.reported_id))]
    pub async fn create(&self, request: ReportRequest) -> ServiceResult<ReportResponse> {
        if request.reporter_id == request.reported_id {
            return Err(ServiceError::validation("Cannot report yourself"));
        }
        let report = self
            .ctx
            .report_repo()
            .create(
                request.reporter_id,
                request.reported_id,
                request.reason.as_deref(),
            )
            .await?;
        info!(report_id = %report.id, "User reported");
        Ok(report.into())
    }

    #[instrument(skip(self))]
    pub async fn received(&self, user_id: UserId) -> ServiceResult<Vec<ReportResponse>> {
        let reports = self.ctx.report_repo().find_received(user_id).await?;
        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }
}

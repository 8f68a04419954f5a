//! Notification fan-out
//!
//! Every notification is persisted first; only a stored notification is
//! pushed to the addressee's live connections. Push is best-effort: a
//! user with no open connection, or a connection that fails, still finds
//! the notification on the next fetch.

use matcha_core::entities::{NewNotification, Notification};
use matcha_core::value_objects::{NotificationId, UserId};
use tracing::{debug, instrument};

use crate::dto::{
    CreateNotificationRequest, NotificationCountsResponse, NotificationResponse, UpdatedResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist a notification, then push it to the addressee.
    ///
    /// A persistence failure is returned and nothing is pushed.
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = %notification.kind))]
    pub async fn notify(&self, notification: &NewNotification) -> ServiceResult<Notification> {
        let stored = self.ctx.notification_repo().create(notification).await?;
        self.deliver(std::slice::from_ref(&stored));
        Ok(stored)
    }

    /// Push already-persisted notifications to their addressees' live
    /// connections. Never fails.
    pub fn deliver(&self, notifications: &[Notification]) {
        for notification in notifications {
            let delivered = self.ctx.publisher().publish_notification(notification);
            debug!(
                notification_id = %notification.id,
                user_id = %notification.user_id,
                delivered,
                "notification pushed"
            );
        }
    }

    /// `POST /notifications`
    pub async fn create(
        &self,
        request: CreateNotificationRequest,
    ) -> ServiceResult<NotificationResponse> {
        let mut new = NewNotification::new(request.user_id, request.kind, request.content);
        new.related_user_id = request.related_user_id;
        let stored = self.notify(&new).await?;
        Ok(NotificationResponse::from(&stored))
    }

    /// Notifications of a user, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_user(user_id, limit, offset)
            .await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn unread(&self, user_id: UserId) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_unread(user_id).await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn counts(&self, user_id: UserId) -> ServiceResult<NotificationCountsResponse> {
        Ok(self.ctx.notification_repo().counts(user_id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: NotificationId) -> ServiceResult<()> {
        self.ctx.notification_repo().mark_read(id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: UserId) -> ServiceResult<UpdatedResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(user_id).await?;
        Ok(UpdatedResponse {
            message: "All notifications marked as read".to_string(),
            updated,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: NotificationId) -> ServiceResult<()> {
        self.ctx.notification_repo().delete(id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self, user_id: UserId) -> ServiceResult<UpdatedResponse> {
        let updated = self.ctx.notification_repo().delete_all(user_id).await?;
        Ok(UpdatedResponse {
            message: "All notifications deleted".to_string(),
            updated,
        })
    }
}

//! Notification mappers

use matcha_core::entities::{Notification, NotificationCounts};
use matcha_core::error::DomainError;
use matcha_core::value_objects::{NotificationId, UserId};

use crate::models::{NotificationCountsModel, NotificationModel};

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::new(model.notification_id),
            user_id: UserId::new(model.user_id),
            kind: model.kind.parse()?,
            content: model.content,
            related_user_id: model.related_user_id.map(UserId::new),
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}

impl From<NotificationCountsModel> for NotificationCounts {
    fn from(model: NotificationCountsModel) -> Self {
        NotificationCounts {
            total: model.total,
            unread: model.unread,
        }
    }
}

/// Convert a batch of rows, failing on the first corrupt one
pub fn notifications_from_models(
    models: Vec<NotificationModel>,
) -> Result<Vec<Notification>, DomainError> {
    models.into_iter().map(Notification::try_from).collect()
}

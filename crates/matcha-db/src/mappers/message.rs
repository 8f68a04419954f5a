//! Message mapper

use matcha_core::entities::Message;
use matcha_core::value_objects::{ChatId, MessageId, UserId};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::new(model.message_id),
            chat_id: ChatId::new(model.chat_id),
            sender_id: UserId::new(model.sender_id),
            content: model.content,
            sent_at: model.sent_at,
            is_read: model.is_read,
        }
    }
}

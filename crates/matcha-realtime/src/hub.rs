//! Realtime hub
//!
//! Owns the two registries and implements the publisher port used by the
//! services, so REST-triggered writes and socket-triggered writes fan out
//! through the same connections.

use std::time::Duration;

use matcha_common::RealtimeConfig;
use matcha_core::entities::{Message, Notification};
use matcha_core::traits::RealtimePublisher;
use matcha_core::value_objects::{ChatId, UserId};

use crate::connection::ChannelRegistry;
use crate::protocol::{encode, ChatFrame, NotificationFrame};

/// Per-connection limits
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    pub idle_timeout: Duration,
    pub send_buffer: usize,
}

impl From<&RealtimeConfig> for ConnectionSettings {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout(),
            send_buffer: config.send_buffer.max(1),
        }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&RealtimeConfig::default())
    }
}

/// Chat and notification registries
#[derive(Debug)]
pub struct RealtimeHub {
    chats: ChannelRegistry<ChatId>,
    users: ChannelRegistry<UserId>,
    settings: ConnectionSettings,
}

impl RealtimeHub {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            chats: ChannelRegistry::new("chat"),
            users: ChannelRegistry::new("notifications"),
            settings,
        }
    }

    pub fn chats(&self) -> &ChannelRegistry<ChatId> {
        &self.chats
    }

    pub fn users(&self) -> &ChannelRegistry<UserId> {
        &self.users
    }

    pub fn settings(&self) -> ConnectionSettings {
        self.settings
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(ConnectionSettings::default())
    }
}

impl RealtimePublisher for RealtimeHub {
    fn publish_notification(&self, notification: &Notification) -> usize {
        encode(&NotificationFrame::from(notification))
            .map_or(0, |frame| self.users.broadcast(notification.user_id, &frame))
    }

    fn publish_message(&self, message: &Message) -> usize {
        encode(&ChatFrame::from(message))
            .map_or(0, |frame| self.chats.broadcast(message.chat_id, &frame))
    }
}

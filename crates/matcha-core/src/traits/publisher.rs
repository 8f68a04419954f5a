//! Realtime delivery port
//!
//! Services push already-persisted records through this trait. The
//! realtime crate implements it on top of its connection registries;
//! tests substitute a recorder.

use crate::entities::{Message, Notification};

/// Best-effort delivery to currently open realtime connections.
///
/// Implementations must not block on slow consumers and must not fail:
/// the record is already durable, so delivery problems are only logged.
/// Both methods return how many connections accepted the frame.
pub trait RealtimePublisher: Send + Sync {
    fn publish_notification(&self, notification: &Notification) -> usize;

    fn publish_message(&self, message: &Message) -> usize;
}

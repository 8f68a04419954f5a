//! # matcha-realtime
//!
//! Live delivery over WebSockets: per-channel connection registries, the
//! hub that implements the services' publisher port, and the socket
//! handlers for chats and notifications.

pub mod connection;
pub mod hub;
pub mod protocol;
pub mod server;

pub use connection::{ChannelRegistry, Connection, ConnectionId, ConnectionState};
pub use hub::{ConnectionSettings, RealtimeHub};
pub use server::{create_router, RealtimeState};

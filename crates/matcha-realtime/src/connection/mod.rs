//! Connection handles and the per-channel registry

mod connection;
mod registry;

pub use connection::{Connection, ConnectionId, ConnectionState, SendError};
pub use registry::ChannelRegistry;

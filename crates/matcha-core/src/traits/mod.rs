//! Ports implemented by infrastructure crates

mod publisher;
mod repositories;

pub use publisher::RealtimePublisher;
pub use repositories::*;

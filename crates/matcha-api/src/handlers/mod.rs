//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod chats;
pub mod health;
pub mod matches;
pub mod messages;
pub mod notifications;
pub mod profiles;
pub mod safety;
pub mod status;
pub mod swipes;
pub mod tags;
pub mod users;

//! Entity to model mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.
//! Rows holding a text enum (`direction`, `type`, `preferred_gender`) use
//! `TryFrom` since a corrupt value must surface as an error.

mod matching;
mod message;
mod notification;
mod profile;
mod safety;
mod swipe;
mod tag;
mod user;

pub use notification::notifications_from_models;

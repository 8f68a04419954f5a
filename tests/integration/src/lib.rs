//! Integration test utilities for the matcha server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API and the realtime sockets.


pub use fixtures::*;
pub use helpers::*;

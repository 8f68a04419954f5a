//! Pure business rules shared by storage and services

mod fame;
mod geo;
mod presence;
mod swipe;

pub use fame::{compute_fame, FameInputs};
pub use geo::haversine_km;
pub use presence::{is_online, online_cutoff, ONLINE_WINDOW};
pub use swipe::{plan_notifications, SwipeParty, SwipeResolution};

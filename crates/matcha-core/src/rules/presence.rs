//! Online presence derived from the last login stamp

use chrono::{DateTime, Duration, Utc};

/// How long after the last stamp a user still counts as online
pub const ONLINE_WINDOW: Duration = Duration::minutes(3);

/// Stamps at or after this instant count as online at `now`
pub fn online_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - ONLINE_WINDOW
}

pub fn is_online(last_login: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_login.is_some_and(|at| at >= online_cutoff(now))
}

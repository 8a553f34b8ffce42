//! Cache freshness rules

use chrono::{DateTime, Duration, Utc};

/// Default freshness window of cached country and city records
pub const DEFAULT_COST_DATA_TTL_DAYS: i64 = 7;

/// A record is fresh while its age is strictly below the TTL
pub fn is_fresh(last_fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now.signed_duration_since(last_fetched_at) < ttl
}

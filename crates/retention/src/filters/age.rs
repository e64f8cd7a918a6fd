use chrono::{DateTime, TimeDelta, Utc};

/// Flags posts older than the configured maximum age.
#[derive(Debug, Clone, Copy)]
pub struct AgeFilter {
    max_age: TimeDelta,
}

impl AgeFilter {
    pub fn new(max_age: TimeDelta) -> Self {
        Self { max_age }
    }

    /// True iff `now - created_at` is strictly greater than the maximum age.
    pub fn is_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at > self.max_age
    }
}

use chrono::TimeDelta;
use std::collections::HashSet;

use super::post::PostId;

// =============================================================================
// Retention Policy Types
// =============================================================================

/// Post identifiers that are never deleted.
///
/// Membership is exact string equality against the canonical decimal form of
/// the identifier; entries are not trimmed or otherwise normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: HashSet<String>,
}

impl AllowList {
    /// Separator used in the `WHITELIST` setting.
    pub const SEPARATOR: char = ':';

    /// Create an empty allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a colon separated list. Empty input yields an empty list and
    /// empty segments are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.split(Self::SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether `id` is protected.
    pub fn contains(&self, id: PostId) -> bool {
        self.ids.contains(&id.to_string())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<String> for AllowList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Durations that drive the deletion decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDurations {
    /// Posts strictly older than this are eligible for deletion.
    pub max_post_age: TimeDelta,

    /// A reply newer than this marks its parent as under ongoing interaction.
    pub interaction_window: TimeDelta,
}

impl PolicyDurations {
    pub fn new(max_post_age: TimeDelta, interaction_window: TimeDelta) -> Self {
        Self {
            max_post_age,
            interaction_window,
        }
    }
}

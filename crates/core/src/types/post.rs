use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Error, Result};

// =============================================================================
// Post Types
// =============================================================================

/// Timestamp layout used by the platform for `created_at`,
/// e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const PLATFORM_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Platform-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single post owned by (or addressed to) the account.
///
/// Posts are read-only once fetched; the engine only inspects them and may
/// request their deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,

    /// Raw creation timestamp as sent by the platform. A `null` or missing
    /// value decodes as empty and fails to parse for this post alone.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,

    /// Body text.
    #[serde(default, alias = "full_text", deserialize_with = "null_as_empty")]
    pub text: String,

    /// Identifier of the post this one replies to, if any.
    #[serde(default)]
    pub in_reply_to_status_id: Option<PostId>,
}

impl Post {
    /// Create a post that is not a reply.
    pub fn new(id: i64, created_at: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: PostId(id),
            created_at: created_at.into(),
            text: text.into(),
            in_reply_to_status_id: None,
        }
    }

    /// Mark this post as a reply to `parent`.
    pub fn in_reply_to(mut self, parent: i64) -> Self {
        self.in_reply_to_status_id = Some(PostId(parent));
        self
    }

    /// Whether this post is a direct reply to `parent`.
    ///
    /// A stored parent of `0` means "not a reply" on the platform and never
    /// matches.
    pub fn is_reply_to(&self, parent: PostId) -> bool {
        matches!(self.in_reply_to_status_id, Some(id) if id == parent && id.0 != 0)
    }

    /// Parse the creation timestamp into an absolute instant.
    pub fn created_at_time(&self) -> Result<DateTime<Utc>> {
        parse_platform_time(&self.created_at)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a platform timestamp into UTC.
pub fn parse_platform_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(raw, PLATFORM_TIME_FORMAT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::timestamp_parse(raw, e.to_string()))
}

/// Render an instant in the platform's timestamp layout.
pub fn format_platform_time(instant: DateTime<Utc>) -> String {
    instant.format("%a %b %d %H:%M:%S +0000 %Y").to_string()
}

// =============================================================================
// Account & Search Types
// =============================================================================

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub screen_name: String,
}

impl Identity {
    pub fn new(screen_name: impl Into<String>) -> Self {
        Self {
            screen_name: screen_name.into(),
        }
    }
}

/// Envelope returned by the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Post>,
}

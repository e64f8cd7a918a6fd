//! Detection of ongoing conversations under a post.
//!
//! The platform offers no "replies to post X" lookup, so replies are found by
//! searching for posts addressed to the account with an identifier above the
//! post's own, then keeping only direct replies. Lookup failures fail open:
//! the post is treated as having no ongoing interaction.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

use ephemeral_core::{PlatformClient, Post, PostId, MAX_PAGE_SIZE};

/// Checks whether a post received a reply within the recency window.
pub struct InteractionChecker {
    client: Arc<dyn PlatformClient>,
    window: TimeDelta,
}

impl InteractionChecker {
    pub fn new(client: Arc<dyn PlatformClient>, window: TimeDelta) -> Self {
        Self { client, window }
    }

    /// Direct replies to `id`, or an empty list when they cannot be looked up.
    pub async fn replies_to(&self, id: PostId) -> Vec<Post> {
        let identity = match self.client.fetch_own_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Could not resolve own identity, assuming no replies");
                return Vec::new();
            }
        };

        let query = format!("to:{}", identity.screen_name);
        let results = match self.client.search_posts(&query, id, MAX_PAGE_SIZE).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(post_id = %id, query = %query, error = %e, "Reply search failed, assuming no replies");
                return Vec::new();
            }
        };

        results
            .into_iter()
            .filter(|candidate| candidate.is_reply_to(id))
            .collect()
    }

    /// True iff some direct reply to `id` was created within the window of `now`.
    pub async fn has_ongoing_interaction(&self, id: PostId, now: DateTime<Utc>) -> bool {
        for reply in self.replies_to(id).await {
            let created_at = match reply.created_at_time() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(post_id = %id, reply_id = %reply.id, error = %e, "Skipping reply with unparseable timestamp");
                    continue;
                }
            };

            if now - created_at <= self.window {
                tracing::info!(post_id = %id, reply_id = %reply.id, "Post has ongoing interactions");
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ephemeral_core::format_platform_time;
    use ephemeral_core::mocks::MockPlatform;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn reply(id: i64, parent: i64, age: TimeDelta) -> Post {
        Post::new(id, format_platform_time(now() - age), "@ephemeral_test hi").in_reply_to(parent)
    }

    fn checker(platform: &Arc<MockPlatform>) -> InteractionChecker {
        InteractionChecker::new(platform.clone(), TimeDelta::hours(48))
    }

    #[tokio::test]
    async fn test_recent_direct_reply_counts() {
        let platform = Arc::new(MockPlatform::new().with_mentions(vec![reply(20, 9, TimeDelta::hours(2))]));
        assert!(checker(&platform).has_ongoing_interaction(PostId(9), now()).await);

        let searches = platform.searches();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "to:ephemeral_test");
        assert_eq!(searches[0].since_id, PostId(9));
        assert_eq!(searches[0].count, MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_stale_reply_does_not_count() {
        let platform = Arc::new(MockPlatform::new().with_mentions(vec![reply(20, 11, TimeDelta::hours(500))]));
        assert!(!checker(&platform).has_ongoing_interaction(PostId(11), now()).await);
    }

    #[tokio::test]
    async fn test_reply_at_window_edge_counts() {
        let platform = Arc::new(MockPlatform::new().with_mentions(vec![reply(20, 9, TimeDelta::hours(48))]));
        assert!(checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
    }

    #[tokio::test]
    async fn test_reply_to_other_post_is_ignored() {
        let platform = Arc::new(MockPlatform::new().with_mentions(vec![reply(20, 10, TimeDelta::hours(1))]));
        assert!(!checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_no_evidence() {
        let broken = Post::new(20, "yesterday-ish", "@ephemeral_test hi").in_reply_to(9);
        let platform = Arc::new(MockPlatform::new().with_mentions(vec![broken]));
        assert!(!checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
    }

    #[tokio::test]
    async fn test_unparseable_reply_does_not_hide_recent_one() {
        let broken = Post::new(20, "not a time", "").in_reply_to(9);
        let platform = Arc::new(
            MockPlatform::new().with_mentions(vec![broken, reply(21, 9, TimeDelta::hours(1))]),
        );
        assert!(checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
    }

    #[tokio::test]
    async fn test_null_timestamp_reply_does_not_hide_recent_one() {
        let mentions: Vec<Post> = serde_json::from_value(serde_json::json!([
            { "id": 20, "created_at": null, "text": "@ephemeral_test ?", "in_reply_to_status_id": 9 },
            {
                "id": 21,
                "created_at": format_platform_time(now() - TimeDelta::hours(2)),
                "text": "@ephemeral_test agreed",
                "in_reply_to_status_id": 9
            }
        ]))
        .unwrap();
        let platform = Arc::new(MockPlatform::new().with_mentions(mentions));

        let checker = checker(&platform);
        assert_eq!(checker.replies_to(PostId(9)).await.len(), 2);
        assert!(checker.has_ongoing_interaction(PostId(9), now()).await);
    }

    #[tokio::test]
    async fn test_identity_failure_fails_open() {
        let platform = Arc::new(
            MockPlatform::new()
                .with_identity_error("Invalid or expired token")
                .with_mentions(vec![reply(20, 9, TimeDelta::hours(1))]),
        );
        assert!(!checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
        assert!(platform.searches().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_fails_open() {
        let platform = Arc::new(MockPlatform::new().with_search_error("connection reset"));
        assert!(!checker(&platform).has_ongoing_interaction(PostId(9), now()).await);
        assert_eq!(platform.identity_calls(), 1);
    }

    #[tokio::test]
    async fn test_query_uses_screen_name() {
        let platform = Arc::new(MockPlatform::new().with_identity("someone_else"));
        checker(&platform).replies_to(PostId(1)).await;
        assert_eq!(platform.searches()[0].query, "to:someone_else");
    }
}

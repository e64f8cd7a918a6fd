//! Timeline scan and deletion.
//!
//! One run fetches the newest posts once, visits each exactly once in
//! timeline order and deletes a post only when it is older than the maximum
//! age, not allow-listed and without recent replies. Every platform call is
//! awaited before the next one starts. Errors other than configuration are
//! logged and absorbed; the run always completes.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use ephemeral_core::{AllowList, PlatformClient, PolicyDurations, Post, MAX_PAGE_SIZE};

use crate::filters::{AgeFilter, AllowListFilter, InteractionChecker};
use crate::report::RetentionReport;

/// Number of posts fetched per run.
pub const TIMELINE_WINDOW: u32 = MAX_PAGE_SIZE;

/// Outcome of evaluating one timeline post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Eligible; a delete request should be issued.
    Delete,
    /// Creation timestamp could not be parsed.
    UnparseableTimestamp,
    /// Not older than the maximum age.
    TooYoung,
    /// Listed on the allow-list.
    AllowListed,
    /// Has a reply within the recency window.
    OngoingInteraction,
}

/// Applies the retention policy to the account's timeline.
pub struct RetentionEngine {
    client: Arc<dyn PlatformClient>,
    age: AgeFilter,
    allow_list: AllowListFilter,
    interactions: InteractionChecker,
}

impl RetentionEngine {
    pub fn new(client: Arc<dyn PlatformClient>, policy: PolicyDurations, allow_list: AllowList) -> Self {
        Self {
            age: AgeFilter::new(policy.max_post_age),
            allow_list: AllowListFilter::new(allow_list),
            interactions: InteractionChecker::new(client.clone(), policy.interaction_window),
            client,
        }
    }

    /// Scan the timeline once, treating `now` as the current instant.
    pub async fn run(&self, now: DateTime<Utc>) -> RetentionReport {
        let mut report = RetentionReport::default();

        let timeline = match self.client.fetch_own_timeline(TIMELINE_WINDOW, true).await {
            Ok(timeline) => timeline,
            Err(e) => {
                tracing::error!(error = %e, "Could not get timeline");
                report.timeline_unavailable = true;
                Vec::new()
            }
        };

        for post in &timeline {
            report.scanned += 1;
            match self.evaluate(post, now).await {
                Decision::Delete => self.delete(post, &mut report).await,
                Decision::UnparseableTimestamp => report.unparseable += 1,
                Decision::TooYoung => report.too_young += 1,
                Decision::AllowListed => report.allow_listed += 1,
                Decision::OngoingInteraction => report.ongoing_interaction += 1,
            }
        }

        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted.len(),
            delete_failures = report.delete_failures,
            unparseable = report.unparseable,
            allow_listed = report.allow_listed,
            too_young = report.too_young,
            ongoing_interaction = report.ongoing_interaction,
            "{}",
            report.message()
        );

        report
    }

    /// Decide what to do with one post. Filters run in order age, allow-list,
    /// interaction, so the reply search only happens for old unlisted posts.
    pub async fn evaluate(&self, post: &Post, now: DateTime<Utc>) -> Decision {
        let created_at = match post.created_at_time() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(post_id = %post.id, error = %e, "Could not parse post timestamp, skipping");
                return Decision::UnparseableTimestamp;
            }
        };

        if !self.age.is_expired(created_at, now) {
            return Decision::TooYoung;
        }
        if self.allow_list.is_protected(post.id) {
            return Decision::AllowListed;
        }
        if self.interactions.has_ongoing_interaction(post.id, now).await {
            return Decision::OngoingInteraction;
        }

        Decision::Delete
    }

    async fn delete(&self, post: &Post, report: &mut RetentionReport) {
        match self.client.delete_post(post.id, true).await {
            Ok(_) => {
                tracing::info!(
                    post_id = %post.id,
                    created_at = %post.created_at,
                    text = %post.text,
                    "Deleted post"
                );
                report.deleted.push(post.id);
            }
            Err(e) => {
                tracing::error!(post_id = %post.id, error = %e, "Failed to delete post");
                report.delete_failures += 1;
            }
        }
    }
}

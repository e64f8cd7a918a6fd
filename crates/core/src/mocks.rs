//! Mock implementations of core traits for testing.
//!
//! `MockPlatform` is a scripted, in-memory stand-in for the social platform
//! that records every call the engine makes.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::{
    traits::PlatformClient,
    types::{Identity, Post, PostId},
    Error, Result,
};

// =============================================================================
// Mock Platform
// =============================================================================

/// A search request as received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub since_id: PostId,
    pub count: u32,
}

/// A delete request as received by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCall {
    pub id: PostId,
    pub trim_user: bool,
}

/// Scripted platform that serves fixed data and records requests.
pub struct MockPlatform {
    timeline: std::result::Result<Vec<Post>, String>,
    identity: std::result::Result<Identity, String>,
    mentions: std::result::Result<Vec<Post>, String>,
    failing_deletes: HashSet<PostId>,
    timeline_calls: Mutex<Vec<(u32, bool)>>,
    identity_calls: Mutex<usize>,
    searches: Mutex<Vec<SearchCall>>,
    deletes: Mutex<Vec<DeleteCall>>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            timeline: Ok(Vec::new()),
            identity: Ok(Identity::new("ephemeral_test")),
            mentions: Ok(Vec::new()),
            failing_deletes: HashSet::new(),
            timeline_calls: Mutex::new(Vec::new()),
            identity_calls: Mutex::new(0),
            searches: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `posts` as the account's timeline.
    pub fn with_timeline(mut self, posts: Vec<Post>) -> Self {
        self.timeline = Ok(posts);
        self
    }

    /// Fail the timeline fetch.
    pub fn with_timeline_error(mut self, message: &str) -> Self {
        self.timeline = Err(message.to_string());
        self
    }

    /// Serve `screen_name` as the authenticated account.
    pub fn with_identity(mut self, screen_name: &str) -> Self {
        self.identity = Ok(Identity::new(screen_name));
        self
    }

    /// Fail the identity lookup.
    pub fn with_identity_error(mut self, message: &str) -> Self {
        self.identity = Err(message.to_string());
        self
    }

    /// Serve `posts` as posts addressed to the account. Searches filter them
    /// by `since_id` the way the platform does.
    pub fn with_mentions(mut self, posts: Vec<Post>) -> Self {
        self.mentions = Ok(posts);
        self
    }

    /// Fail every search.
    pub fn with_search_error(mut self, message: &str) -> Self {
        self.mentions = Err(message.to_string());
        self
    }

    /// Fail deletion of `id`.
    pub fn with_failing_delete(mut self, id: i64) -> Self {
        self.failing_deletes.insert(PostId(id));
        self
    }

    /// Timeline requests received, as `(count, include_reposts)`.
    pub fn timeline_calls(&self) -> Vec<(u32, bool)> {
        self.timeline_calls.lock().unwrap().clone()
    }

    /// Number of identity lookups.
    pub fn identity_calls(&self) -> usize {
        *self.identity_calls.lock().unwrap()
    }

    /// Search requests received.
    pub fn searches(&self) -> Vec<SearchCall> {
        self.searches.lock().unwrap().clone()
    }

    /// Delete requests received, including failed ones.
    pub fn deletes(&self) -> Vec<DeleteCall> {
        self.deletes.lock().unwrap().clone()
    }

    /// Identifiers for which a delete was requested.
    pub fn deleted_ids(&self) -> Vec<PostId> {
        self.deletes().into_iter().map(|call| call.id).collect()
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn fetch_own_timeline(&self, count: u32, include_reposts: bool) -> Result<Vec<Post>> {
        self.timeline_calls.lock().unwrap().push((count, include_reposts));
        match &self.timeline {
            Ok(posts) => Ok(posts.iter().take(count as usize).cloned().collect()),
            Err(message) => Err(Error::http(message.clone())),
        }
    }

    async fn fetch_own_identity(&self) -> Result<Identity> {
        *self.identity_calls.lock().unwrap() += 1;
        self.identity
            .clone()
            .map_err(|message| Error::platform(401, message))
    }

    async fn search_posts(&self, query: &str, since_id: PostId, count: u32) -> Result<Vec<Post>> {
        self.searches.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            since_id,
            count,
        });
        match &self.mentions {
            Ok(posts) => Ok(posts
                .iter()
                .filter(|post| post.id > since_id)
                .take(count as usize)
                .cloned()
                .collect()),
            Err(message) => Err(Error::http(message.clone())),
        }
    }

    async fn delete_post(&self, id: PostId, trim_user: bool) -> Result<Post> {
        self.deletes.lock().unwrap().push(DeleteCall { id, trim_user });
        if self.failing_deletes.contains(&id) {
            return Err(Error::platform(404, format!("No status found with that ID: {}", id)));
        }

        let echoed = match &self.timeline {
            Ok(posts) => posts.iter().find(|post| post.id == id).cloned(),
            Err(_) => None,
        };
        Ok(echoed.unwrap_or_else(|| Post::new(id.0, "", "")))
    }
}

//! Platform client traits.

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{Identity, Post, PostId};

/// Largest page the platform serves for timeline and search requests.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Capabilities the retention engine needs from the social platform.
///
/// Every call is a single request; implementations must not retry.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetch up to `count` of the account's most recent posts.
    async fn fetch_own_timeline(&self, count: u32, include_reposts: bool) -> Result<Vec<Post>>;

    /// Resolve the authenticated account.
    async fn fetch_own_identity(&self) -> Result<Identity>;

    /// Search posts matching `query` with an identifier greater than `since_id`.
    async fn search_posts(&self, query: &str, since_id: PostId, count: u32) -> Result<Vec<Post>>;

    /// Delete a post. `trim_user` asks the platform to omit user metadata
    /// from the echoed post.
    async fn delete_post(&self, id: PostId, trim_user: bool) -> Result<Post>;
}

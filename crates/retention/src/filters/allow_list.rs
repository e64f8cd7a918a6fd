use ephemeral_core::{AllowList, PostId};

/// Protects explicitly listed posts.
#[derive(Debug, Clone, Default)]
pub struct AllowListFilter {
    list: AllowList,
}

impl AllowListFilter {
    pub fn new(list: AllowList) -> Self {
        Self { list }
    }

    /// True iff `id` is on the allow-list.
    pub fn is_protected(&self, id: PostId) -> bool {
        let protected = self.list.contains(id);
        if protected {
            tracing::info!(post_id = %id, "Post is allow-listed");
        }
        protected
    }
}

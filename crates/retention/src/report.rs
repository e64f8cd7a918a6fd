use ephemeral_core::PostId;
use serde::Serialize;

/// Fixed completion message reported after every scan.
pub const COMPLETION_MESSAGE: &str = "No more tweets to delete";

/// Tally of what one scan did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionReport {
    /// Posts visited.
    pub scanned: usize,
    /// Posts for which deletion succeeded, in timeline order.
    pub deleted: Vec<PostId>,
    /// Deletion requests the platform rejected.
    pub delete_failures: usize,
    /// Posts skipped because their timestamp did not parse.
    pub unparseable: usize,
    /// Old posts kept because they are allow-listed.
    pub allow_listed: usize,
    /// Posts kept because they are not old enough.
    pub too_young: usize,
    /// Old posts kept because of recent replies.
    pub ongoing_interaction: usize,
    /// Whether the timeline itself could not be fetched.
    pub timeline_unavailable: bool,
}

impl RetentionReport {
    /// The completion message; identical for every run.
    pub fn message(&self) -> &'static str {
        COMPLETION_MESSAGE
    }
}

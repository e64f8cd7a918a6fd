//! Result object returned to whatever triggered the invocation.

use serde::{Deserialize, Serialize};

use crate::report::{RetentionReport, COMPLETION_MESSAGE};

/// Status reported for every completed scan.
pub const STATUS_OK: &str = "200";

/// Structured invocation outcome, `{"StatusCode": "200", "Body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "StatusCode")]
    pub status_code: String,
    #[serde(rename = "Body")]
    pub message: String,
}

impl InvocationResponse {
    /// The response for a finished scan.
    pub fn completed() -> Self {
        Self {
            status_code: STATUS_OK.to_string(),
            message: COMPLETION_MESSAGE.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&RetentionReport> for InvocationResponse {
    fn from(_: &RetentionReport) -> Self {
        Self::completed()
    }
}

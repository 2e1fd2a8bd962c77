//! Job status payloads and terminal-state classification.
//!
//! The status endpoint returns `{status, result?, error?}`. Only the
//! terminal statuses are fixed by the upstream contract; anything not
//! recognized as terminal is treated as still-in-progress, so new
//! intermediate statuses never break the poll loop.

use serde::Deserialize;

/// Job completed successfully.
pub const STATUS_COMPLETED: &str = "completed";
/// Job failed (reported form).
pub const STATUS_FAILED: &str = "failed";
/// Job failed (alternate reported form).
pub const STATUS_ERROR: &str = "error";

/// Message used when a failed job carries no error description.
pub const UNKNOWN_FAILURE: &str = "unknown";

/// One response from the job status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    /// Upstream status string, e.g. `queued`, `processing`, `completed`.
    #[serde(default)]
    pub status: String,
    /// Terminal result payload; shape varies, see [`crate::resolve`].
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error description on failed jobs.
    #[serde(default)]
    pub error: Option<String>,
}

/// What a poll response means for the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Terminal success -- stop polling and resolve the payload.
    Completed,
    /// Terminal failure with a human-readable message.
    Failed(String),
    /// Not terminal -- keep polling.
    Pending,
}

/// Classify a status response into a poll-loop disposition.
pub fn classify(response: &JobStatusResponse) -> Disposition {
    match response.status.as_str() {
        STATUS_COMPLETED => Disposition::Completed,
        STATUS_FAILED | STATUS_ERROR => Disposition::Failed(
            response
                .error
                .clone()
                .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
        ),
        _ => Disposition::Pending,
    }
}

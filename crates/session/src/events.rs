//! Session events broadcast to UI collaborators.
//!
//! The controller is the only producer. Rendering is out of scope; the
//! status-line strings below are the contract the front-end displays
//! verbatim.

use fxlab_chroma::resolve::GenerationResult;
use serde::Serialize;

/// Status line before any file is selected and after a reset.
pub const STATUS_AWAITING_INPUT: &str = "AWAITING_INPUT";
/// Status line while the selected file uploads.
pub const STATUS_UPLOADING: &str = "UPLOADING...";
/// Status line once an asset is uploaded and generation is available.
pub const STATUS_READY: &str = "READY";
/// Status line while the generation job is being submitted.
pub const STATUS_SUBMITTING: &str = "SUBMITTING JOB...";
/// Status line once the job is queued upstream.
pub const STATUS_QUEUED: &str = "JOB QUEUED...";
/// Status line when a result is displayed.
pub const STATUS_COMPLETE: &str = "COMPLETE";
/// Status line on any failure.
pub const STATUS_ERROR: &str = "ERROR";

/// Status line for an in-progress job, carrying the attempt count.
pub fn processing_label(attempt: u32) -> String {
    format!("PROCESSING... ({attempt})")
}

/// A session-level event originating from the lifecycle controller.
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    /// The status line changed.
    StatusChanged { text: String },

    /// A generation job is still in progress after `attempt` checks.
    Progress { attempt: u32 },

    /// A generation attempt completed and resolved.
    ResultReady { result: GenerationResult },

    /// An upload or generation attempt failed.
    Failed { message: String },
}

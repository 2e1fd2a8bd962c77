//! Job types and request-body construction.
//!
//! The Chroma API exposes separate image and video generation endpoints
//! with asymmetric request shapes: the video endpoint wants `imageUrl`
//! as a single-element array, the image endpoint wants a scalar (and an
//! extra `toolType` field). The asymmetry is dictated by the upstream
//! protocol and is preserved here exactly.

use std::str::FromStr;

use fxlab_core::types::Timestamp;

/// Which generation endpoint a job targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Image,
    Video,
}

impl JobKind {
    /// URL path segment of the endpoint for this kind, also used as the
    /// first segment of the status path.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            JobKind::Image => "image-gen",
            JobKind::Video => "video-gen",
        }
    }
}

impl FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(JobKind::Image),
            "video" => Ok(JobKind::Video),
            other => Err(format!("Unknown job kind: '{other}' (expected 'image' or 'video')")),
        }
    }
}

/// Fixed fields accompanying every generation request.
#[derive(Debug, Clone)]
pub struct JobParams {
    /// Effect to apply, e.g. `halloween`.
    pub effect_id: String,
    /// Upstream account identifier; also part of the status path.
    pub user_id: String,
    /// Model identifier, e.g. `video-effects`.
    pub model: String,
    /// Ask the service to omit its watermark.
    pub remove_watermark: bool,
    /// Keep the result out of public galleries.
    pub is_private: bool,
}

/// One asynchronous unit of remote generation work.
///
/// Created at submission time; owned by the session controller for the
/// duration of a single generate action. Identity is `job_id`, which is
/// the poll key.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub job_id: String,
    pub source_image_url: String,
    pub submitted_at: Timestamp,
}

impl GenerationJob {
    pub fn new(job_id: String, source_image_url: String) -> Self {
        Self {
            job_id,
            source_image_url,
            submitted_at: chrono::Utc::now(),
        }
    }
}

/// Build the JSON request body for a generation job.
///
/// Video jobs wrap the source URL in a one-element list; image jobs pass
/// it as a scalar and add `toolType`.
pub fn build_request_body(
    kind: JobKind,
    image_url: &str,
    params: &JobParams,
) -> serde_json::Value {
    match kind {
        JobKind::Video => serde_json::json!({
            "imageUrl": [image_url],
            "effectId": params.effect_id,
            "userId": params.user_id,
            "removeWatermark": params.remove_watermark,
            "model": params.model,
            "isPrivate": params.is_private,
        }),
        JobKind::Image => serde_json::json!({
            "model": params.model,
            "toolType": params.model,
            "effectId": params.effect_id,
            "imageUrl": image_url,
            "userId": params.user_id,
            "removeWatermark": params.remove_watermark,
            "isPrivate": params.is_private,
        }),
    }
}

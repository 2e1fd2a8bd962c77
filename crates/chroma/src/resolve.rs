//! Tolerant resolution of terminal result payloads.
//!
//! The upstream contract is not self-describing: the `result` field may
//! be a single object or a list, and the media/thumbnail URLs appear
//! under alternately-named fields depending on the job kind and service
//! version. The candidate field names are probed in a fixed, explicit
//! priority order.

use fxlab_core::media::MediaKind;
use serde::Serialize;

use crate::status::JobStatusResponse;

/// Media-URL field names, probed in order; first non-empty string wins.
pub const MEDIA_URL_FIELDS: &[&str] = &["mediaUrl", "video", "image"];

/// Thumbnail field names, probed in order; first non-empty string wins.
pub const THUMBNAIL_FIELDS: &[&str] = &["thumbnailUrl", "thumbnail"];

/// The canonical outcome of a completed generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    /// Displayable/downloadable media URL.
    pub media_url: String,
    /// Preview thumbnail, when the service provides one.
    pub thumbnail_url: Option<String>,
    /// Image or video, inferred from `media_url`'s extension.
    pub kind: MediaKind,
}

/// Errors from result resolution.
///
/// Distinct from poll and submit failures: the job *completed*, but its
/// payload is unusable. Never retryable.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No media URL in generation result")]
    NoMediaUrl,
}

/// Resolve a terminal `completed` payload into a [`GenerationResult`].
///
/// Pure function of its input. When `result` is a list, only the first
/// element is considered.
pub fn resolve_result(payload: &JobStatusResponse) -> Result<GenerationResult, ResolveError> {
    let item = payload.result.as_ref().map(first_item);

    let media_url = item
        .and_then(|item| first_string_field(item, MEDIA_URL_FIELDS))
        .ok_or(ResolveError::NoMediaUrl)?;
    let thumbnail_url = item.and_then(|item| first_string_field(item, THUMBNAIL_FIELDS));

    let kind = MediaKind::from_url(&media_url);
    Ok(GenerationResult {
        media_url,
        thumbnail_url,
        kind,
    })
}

/// A list payload stands for its first element.
fn first_item(result: &serde_json::Value) -> &serde_json::Value {
    match result {
        serde_json::Value::Array(items) => items.first().unwrap_or(&serde_json::Value::Null),
        other => other,
    }
}

/// Probe `candidates` in order, returning the first non-empty string.
fn first_string_field(item: &serde_json::Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|field| item.get(field))
        .filter_map(|value| value.as_str())
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> JobStatusResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn media_url_field_wins() {
        let p = payload(r#"{"status":"completed","result":{"mediaUrl":"https://x/y.png"}}"#);
        let r = resolve_result(&p).unwrap();
        assert_eq!(r.media_url, "https://x/y.png");
        assert_eq!(r.kind, MediaKind::Image);
        assert_eq!(r.thumbnail_url, None);
    }

    #[test]
    fn list_result_takes_the_first_element() {
        let p = payload(
            r#"{"status":"completed","result":[{"mediaUrl":"a.mp4"},{"mediaUrl":"b.mp4"}]}"#,
        );
        let r = resolve_result(&p).unwrap();
        assert_eq!(r.media_url, "a.mp4");
        assert_eq!(r.kind, MediaKind::Video);
    }

    #[test]
    fn falls_back_to_video_then_image_fields() {
        let p = payload(r#"{"status":"completed","result":{"video":"https://x/clip.webm"}}"#);
        assert_eq!(resolve_result(&p).unwrap().media_url, "https://x/clip.webm");

        let p = payload(r#"{"status":"completed","result":{"image":"https://x/pic.jpg"}}"#);
        assert_eq!(resolve_result(&p).unwrap().media_url, "https://x/pic.jpg");
    }

    #[test]
    fn earlier_candidate_beats_later_one() {
        let p = payload(
            r#"{"status":"completed","result":{"image":"pic.jpg","mediaUrl":"real.mp4"}}"#,
        );
        assert_eq!(resolve_result(&p).unwrap().media_url, "real.mp4");
    }

    #[test]
    fn empty_string_candidates_are_skipped() {
        let p = payload(r#"{"status":"completed","result":{"mediaUrl":"","video":"v.mp4"}}"#);
        assert_eq!(resolve_result(&p).unwrap().media_url, "v.mp4");
    }

    #[test]
    fn thumbnail_candidates_probed_in_order() {
        let p = payload(
            r#"{"status":"completed","result":{"mediaUrl":"a.mp4","thumbnail":"t2.jpg","thumbnailUrl":"t1.jpg"}}"#,
        );
        assert_eq!(
            resolve_result(&p).unwrap().thumbnail_url,
            Some("t1.jpg".to_string())
        );

        let p = payload(
            r#"{"status":"completed","result":{"mediaUrl":"a.mp4","thumbnail":"t2.jpg"}}"#,
        );
        assert_eq!(
            resolve_result(&p).unwrap().thumbnail_url,
            Some("t2.jpg".to_string())
        );
    }

    #[test]
    fn missing_result_is_an_error() {
        let p = payload(r#"{"status":"completed"}"#);
        assert!(matches!(resolve_result(&p), Err(ResolveError::NoMediaUrl)));
    }

    #[test]
    fn empty_list_is_an_error() {
        let p = payload(r#"{"status":"completed","result":[]}"#);
        assert!(matches!(resolve_result(&p), Err(ResolveError::NoMediaUrl)));
    }

    #[test]
    fn non_object_result_is_an_error() {
        let p = payload(r#"{"status":"completed","result":"done"}"#);
        assert!(matches!(resolve_result(&p), Err(ResolveError::NoMediaUrl)));
    }
}

//! Media kind classification.
//!
//! The generation service does not say whether a result is an image or
//! a video; the kind is inferred from the media URL's file extension.

use serde::Serialize;

/// File extensions treated as video results.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];

/// Whether a generated result is a still image or a video clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Infer the media kind from a URL's file extension.
    ///
    /// Matching is case-insensitive and ignores any query string, so
    /// `https://cdn.example/clip.MP4?token=abc` classifies as video.
    /// Anything that is not a known video extension is an image.
    pub fn from_url(url: &str) -> Self {
        let lowered = url.to_ascii_lowercase();
        let path = lowered.split('?').next().unwrap_or(&lowered);
        if VIDEO_EXTENSIONS
            .iter()
            .any(|ext| path.ends_with(&format!(".{ext}")))
        {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

//! Download helpers for generated results.
//!
//! Fetches a result's bytes over HTTP and derives a local file name for
//! saving it. Extension inference prefers the response `Content-Type`
//! and falls back to the URL suffix, defaulting to `jpg`.

use fxlab_core::id::{generate_id, DOWNLOAD_ID_LEN};

/// A fetched result ready to be written to disk by the caller.
#[derive(Debug, Clone)]
pub struct DownloadedMedia {
    /// Raw media bytes.
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server, if any.
    pub content_type: Option<String>,
}

/// Errors from fetching a generated result.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Failed to fetch file ({status})")]
    Fetch {
        /// HTTP status code.
        status: u16,
    },
}

/// Fetch a generated result's bytes.
pub async fn fetch_media(
    client: &reqwest::Client,
    url: &str,
) -> Result<DownloadedMedia, DownloadError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Fetch {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let bytes = response.bytes().await?.to_vec();
    tracing::debug!(url = %url, size = bytes.len(), "Result media fetched");

    Ok(DownloadedMedia {
        bytes,
        content_type,
    })
}

/// Infer a file extension for a downloaded result.
///
/// `Content-Type` wins where it is decisive; otherwise the URL suffix
/// decides. Unrecognized media falls back to `jpg`.
pub fn infer_extension(url: &str, content_type: Option<&str>) -> &'static str {
    let ct = content_type.unwrap_or("");
    let lowered = url.to_ascii_lowercase();

    if ct.contains("video") || lowered.contains(".mp4") || lowered.contains(".webm") {
        "mp4"
    } else if ct.contains("png") || lowered.contains(".png") {
        "png"
    } else if ct.contains("webp") || lowered.contains(".webp") {
        "webp"
    } else {
        "jpg"
    }
}

/// Suggest a local file name: `<prefix>_<8-char id>.<ext>`.
pub fn suggested_filename(prefix: &str, url: &str, content_type: Option<&str>) -> String {
    format!(
        "{prefix}_{}.{}",
        generate_id(DOWNLOAD_ID_LEN),
        infer_extension(url, content_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_content_type_wins() {
        assert_eq!(infer_extension("https://x/y", Some("video/mp4")), "mp4");
    }

    #[test]
    fn webm_url_maps_to_mp4() {
        // All video downloads are saved as .mp4 regardless of container.
        assert_eq!(infer_extension("https://x/y.webm", None), "mp4");
    }

    #[test]
    fn png_from_content_type() {
        assert_eq!(infer_extension("https://x/y", Some("image/png")), "png");
    }

    #[test]
    fn webp_from_url() {
        assert_eq!(infer_extension("https://x/y.webp", None), "webp");
    }

    #[test]
    fn unknown_defaults_to_jpg() {
        assert_eq!(infer_extension("https://x/y", None), "jpg");
        assert_eq!(infer_extension("https://x/y.gif", Some("image/gif")), "jpg");
    }

    #[test]
    fn filename_shape() {
        let name = suggested_filename("halloween_result", "https://x/y.mp4", None);
        assert!(name.starts_with("halloween_result_"));
        assert!(name.ends_with(".mp4"));
        // prefix + '_' + 8-char id + ".mp4"
        assert_eq!(name.len(), "halloween_result_".len() + 8 + ".mp4".len());
    }
}

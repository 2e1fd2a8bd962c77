//! Signed-URL upload client for the asset service.
//!
//! Uploading is a two-step protocol: request a write-capable signed URL
//! for a freshly generated storage key, then PUT the raw bytes to it.
//! The public read URL is constructed deterministically from the asset
//! host and the storage key -- the PUT response body is never inspected.

use fxlab_core::id::{generate_id, ASSET_ID_LEN};

/// Prefix under which all uploaded assets are keyed.
pub const STORAGE_PREFIX: &str = "media";

/// Extension used when the local file name carries none.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Client for the asset storage service.
pub struct AssetStore {
    client: reqwest::Client,
    api_url: String,
    public_url: String,
    project_id: String,
}

/// Errors from the asset upload protocol.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The signed-URL request returned a non-2xx status.
    #[error("Signed URL request failed ({status}): {body}")]
    SignedUrlRequest {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The PUT to the signed URL returned a non-2xx status.
    #[error("Upload failed ({status}): {body}")]
    Upload {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Derive a storage key for a local file name.
///
/// Keys have the shape `media/<21-char id>.<ext>` where `<ext>` is the
/// substring after the last `.` of the file name, or [`DEFAULT_EXTENSION`]
/// when the name has no extension.
pub fn storage_key(file_name: &str) -> String {
    format!(
        "{STORAGE_PREFIX}/{}.{}",
        generate_id(ASSET_ID_LEN),
        file_extension(file_name)
    )
}

/// Extract the extension from a file name, falling back to
/// [`DEFAULT_EXTENSION`] when there is none.
fn file_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => DEFAULT_EXTENSION,
    }
}

impl AssetStore {
    /// Create a new client for the asset service.
    ///
    /// * `api_url`    - signed-URL endpoint host, e.g. `https://upload-api.example`.
    /// * `public_url` - public asset-serving host, e.g. `https://assets.example`.
    /// * `project_id` - fixed project identifier sent with every signed-URL request.
    pub fn new(api_url: String, public_url: String, project_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            public_url,
            project_id,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for sharing connection pools and timeout configuration).
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        public_url: String,
        project_id: String,
    ) -> Self {
        Self {
            client,
            api_url,
            public_url,
            project_id,
        }
    }

    /// Upload a file's bytes and return its durable public URL.
    ///
    /// `file_name` is only used to derive the storage key's extension;
    /// `mime_type` becomes the `Content-Type` of the stored object.
    /// No retry is performed here -- retry/abort policy belongs to the
    /// caller.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<String, UploadError> {
        let key = storage_key(file_name);
        let signed_url = self.request_signed_url(&key).await?;
        self.put_object(&signed_url, bytes, mime_type).await?;

        let public_url = format!("{}/{}", self.public_url, key);
        tracing::info!(key = %key, url = %public_url, "Asset uploaded");
        Ok(public_url)
    }

    // ---- private helpers ----

    /// Request a write-capable signed URL for `key`. The response body
    /// text is the signed URL itself.
    async fn request_signed_url(&self, key: &str) -> Result<String, UploadError> {
        let response = self
            .client
            .get(format!("{}/media/get-upload-url", self.api_url))
            .query(&[("fileName", key), ("projectId", self.project_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UploadError::SignedUrlRequest {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    /// PUT the raw bytes to the signed URL.
    async fn put_object(
        &self,
        signed_url: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<(), UploadError> {
        let response = self
            .client
            .put(signed_url)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UploadError::Upload {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

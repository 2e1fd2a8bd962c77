//! REST client for the Chroma generation endpoints.
//!
//! Wraps job submission (`POST /image-gen` or `/video-gen`) and status
//! retrieval (`GET /<kind>/<userId>/<jobId>/status`) using [`reqwest`].

use crate::job::{build_request_body, JobKind, JobParams};
use crate::status::JobStatusResponse;

/// HTTP client for one Chroma API host.
pub struct ChromaApi {
    client: reqwest::Client,
    api_url: String,
}

/// A successfully queued generation job.
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    /// Server-assigned job identifier, used as the poll key.
    pub job_id: String,
    /// The full response body, verbatim.
    pub raw: serde_json::Value,
}

/// Errors from the Chroma REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ChromaApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Chroma API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx submit response without the `jobId` field.
    #[error("Submit response carried no jobId")]
    MissingJobId,
}

impl ChromaApi {
    /// Create a new client for a Chroma API host.
    ///
    /// * `api_url` - base HTTP URL, e.g. `https://api.example`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for sharing connection pools and timeout configuration).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Submit a generation job referencing an uploaded source image.
    ///
    /// Returns the server-assigned `jobId` along with the raw response
    /// body; `jobId` is the only field later stages rely on, so its
    /// absence is an error here rather than a confusing poll failure.
    pub async fn submit_job(
        &self,
        kind: JobKind,
        image_url: &str,
        params: &JobParams,
    ) -> Result<SubmittedJob, ChromaApiError> {
        let body = build_request_body(kind, image_url, params);

        let response = self
            .client
            .post(format!("{}/{}", self.api_url, kind.endpoint_path()))
            .json(&body)
            .send()
            .await?;

        let raw: serde_json::Value = Self::ensure_success(response).await?.json().await?;
        let job_id = raw
            .get("jobId")
            .and_then(|v| v.as_str())
            .ok_or(ChromaApiError::MissingJobId)?
            .to_string();

        Ok(SubmittedJob { job_id, raw })
    }

    /// Fetch the current status of a job.
    pub async fn fetch_status(
        &self,
        kind: JobKind,
        user_id: &str,
        job_id: &str,
    ) -> Result<JobStatusResponse, ChromaApiError> {
        let response = self
            .client
            .get(format!(
                "{}/{}/{}/{}/status",
                self.api_url,
                kind.endpoint_path(),
                user_id,
                job_id
            ))
            .send()
            .await?;

        Ok(Self::ensure_success(response).await?.json().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ChromaApiError::Api`] with
    /// the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ChromaApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChromaApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

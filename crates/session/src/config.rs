//! Playground configuration loaded from environment variables.

use fxlab_chroma::job::JobKind;

/// Configuration for one playground session.
///
/// All fields default to the hosted playground's endpoints and
/// identifiers. In other deployments, override via environment
/// variables.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// Signed-URL endpoint host of the asset service.
    pub asset_api_url: String,
    /// Public asset-serving host.
    pub asset_public_url: String,
    /// Project identifier sent with every signed-URL request.
    pub asset_project_id: String,
    /// Generation API host.
    pub gen_api_url: String,
    /// Effect applied by generation jobs.
    pub effect_id: String,
    /// Upstream account identifier.
    pub user_id: String,
    /// Model identifier sent with every job.
    pub model: String,
    /// Which generation endpoint jobs target.
    pub job_kind: JobKind,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl PlaygroundConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                                  |
    /// |------------------------|----------------------------------------------------------|
    /// | `ASSET_API_URL`        | `https://interact-screw-basic-outcome.trycloudflare.com` |
    /// | `ASSET_PUBLIC_URL`     | `https://assets.dressr.ai`                               |
    /// | `ASSET_PROJECT_ID`     | `dressr`                                                 |
    /// | `GEN_API_URL`          | `https://api.chromastudio.ai`                            |
    /// | `GEN_EFFECT_ID`        | `halloween`                                              |
    /// | `GEN_USER_ID`          | `DObRu1vyStbUynoQmTcHBlhs55z2`                           |
    /// | `GEN_MODEL`            | `video-effects`                                          |
    /// | `GEN_JOB_KIND`         | `video`                                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                                     |
    pub fn from_env() -> Self {
        let asset_api_url = std::env::var("ASSET_API_URL")
            .unwrap_or_else(|_| "https://interact-screw-basic-outcome.trycloudflare.com".into());
        let asset_public_url =
            std::env::var("ASSET_PUBLIC_URL").unwrap_or_else(|_| "https://assets.dressr.ai".into());
        let asset_project_id =
            std::env::var("ASSET_PROJECT_ID").unwrap_or_else(|_| "dressr".into());

        let gen_api_url =
            std::env::var("GEN_API_URL").unwrap_or_else(|_| "https://api.chromastudio.ai".into());
        let effect_id = std::env::var("GEN_EFFECT_ID").unwrap_or_else(|_| "halloween".into());
        let user_id = std::env::var("GEN_USER_ID")
            .unwrap_or_else(|_| "DObRu1vyStbUynoQmTcHBlhs55z2".into());
        let model = std::env::var("GEN_MODEL").unwrap_or_else(|_| "video-effects".into());

        let job_kind: JobKind = std::env::var("GEN_JOB_KIND")
            .unwrap_or_else(|_| "video".into())
            .parse()
            .expect("GEN_JOB_KIND must be 'image' or 'video'");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            asset_api_url,
            asset_public_url,
            asset_project_id,
            gen_api_url,
            effect_id,
            user_id,
            model,
            job_kind,
            request_timeout_secs,
        }
    }
}

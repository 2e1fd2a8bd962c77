//! The job lifecycle controller.
//!
//! [`SessionController`] owns one user session: the uploaded asset URL,
//! the lifecycle [`Phase`], and the single in-flight generation
//! attempt. It composes the asset store and the Chroma client into the
//! upload -> submit -> poll -> resolve sequence and is the only place
//! that decides what happens on failure at each stage.
//!
//! Every generation attempt is tagged with a monotonically increasing
//! epoch. Reset, asset removal, and new file selections bump the epoch
//! and cancel the in-flight token, so a late-arriving outcome from a
//! superseded attempt is discarded instead of overwriting newer state.

use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;

use fxlab_chroma::api::{ChromaApi, ChromaApiError};
use fxlab_chroma::job::{GenerationJob, JobKind, JobParams};
use fxlab_chroma::poll::{poll_job, PollConfig, PollError};
use fxlab_chroma::resolve::{resolve_result, GenerationResult, ResolveError};
use fxlab_storage::store::{AssetStore, UploadError};

use crate::config::PlaygroundConfig;
use crate::events::{
    processing_label, SessionEvent, STATUS_AWAITING_INPUT, STATUS_COMPLETE, STATUS_ERROR,
    STATUS_QUEUED, STATUS_READY, STATUS_SUBMITTING, STATUS_UPLOADING,
};
use crate::state::Phase;

/// Broadcast channel capacity for session events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Errors surfaced by the lifecycle controller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Building the shared HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The asset upload stage failed; the session is back in `Idle`.
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    /// The submit stage failed; the session is back in `Ready`.
    #[error("Job submission failed: {0}")]
    Submit(#[from] ChromaApiError),

    /// The poll stage failed; the session is back in `Ready`.
    #[error(transparent)]
    Poll(#[from] PollError),

    /// The resolve stage failed; the session is back in `Ready`.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Generate was invoked with no uploaded asset.
    #[error("No uploaded asset to generate from")]
    NoAssetUploaded,

    /// Another upload or generation is already in flight.
    #[error("Another operation is already in progress")]
    Busy,

    /// The attempt was superseded by a reset, removal, or new
    /// selection; its outcome was discarded without touching state.
    #[error("The generation attempt was superseded")]
    Superseded,
}

/// Controls the full job lifecycle for a single session.
///
/// Methods take `&self`; the controller is safe to share (e.g. behind
/// an `Arc`) between UI handlers. One upload or generation runs at a
/// time, enforced by phase gating -- locks are never held across
/// network suspension points, so `reset` stays responsive mid-attempt.
pub struct SessionController {
    store: AssetStore,
    api: ChromaApi,
    job_kind: JobKind,
    params: JobParams,
    poll: PollConfig,
    event_tx: broadcast::Sender<SessionEvent>,
    inner: Mutex<SessionInner>,
}

/// Mutable session state, guarded by the controller's mutex.
struct SessionInner {
    phase: Phase,
    /// Public URL of the uploaded asset; `Some` iff an upload succeeded
    /// and no reset/removal has since occurred.
    asset_url: Option<String>,
    /// The job of the in-flight generation attempt, if any.
    job: Option<GenerationJob>,
    /// The currently displayed result, if any.
    result: Option<GenerationResult>,
    /// Attempt counter for stale-outcome discard.
    epoch: u64,
    /// Cancels the in-flight attempt's poll wait.
    cancel: CancellationToken,
}

impl SessionController {
    /// Build a controller from configuration.
    ///
    /// One HTTP client (with the configured request timeout) is shared
    /// by the asset store and the generation client.
    pub fn new(config: PlaygroundConfig) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let store = AssetStore::with_client(
            client.clone(),
            config.asset_api_url,
            config.asset_public_url,
            config.asset_project_id,
        );
        let api = ChromaApi::with_client(client, config.gen_api_url);
        let params = JobParams {
            effect_id: config.effect_id,
            user_id: config.user_id,
            model: config.model,
            remove_watermark: true,
            is_private: true,
        };

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            store,
            api,
            job_kind: config.job_kind,
            params,
            poll: PollConfig::default(),
            event_tx,
            inner: Mutex::new(SessionInner {
                phase: Phase::Idle,
                asset_url: None,
                job: None,
                result: None,
                epoch: 0,
                cancel: CancellationToken::new(),
            }),
        })
    }

    /// Override the poll cadence (tests shrink it; production keeps the
    /// default 2 s / 60 attempts).
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Upload a newly selected file and make it the session's asset.
    ///
    /// Clears any prior result. On success the session reaches `Ready`
    /// and the public URL is stored and returned; on failure the
    /// session resets to `Idle` with the asset discarded.
    pub async fn select_file(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<String, SessionError> {
        let epoch = {
            let mut inner = self.inner.lock().await;
            if inner.phase.is_busy() {
                return Err(SessionError::Busy);
            }
            inner.phase = Phase::Uploading;
            inner.result = None;
            inner.epoch += 1;
            inner.epoch
        };

        self.emit_status(STATUS_UPLOADING);
        tracing::info!(file_name, "Uploading selected file");

        match self.store.upload(bytes, file_name, mime_type).await {
            Ok(url) => {
                {
                    let mut inner = self.inner.lock().await;
                    if inner.epoch != epoch {
                        // Reset won while the upload was in flight.
                        return Err(SessionError::Superseded);
                    }
                    inner.asset_url = Some(url.clone());
                    inner.phase = Phase::Ready;
                }
                self.emit_status(STATUS_READY);
                tracing::info!(url = %url, "Session asset ready");
                Ok(url)
            }
            Err(err) => {
                if self.inner.lock().await.epoch != epoch {
                    return Err(SessionError::Superseded);
                }
                tracing::error!(error = %err, "Upload failed");
                self.emit_status(STATUS_ERROR);
                let _ = self.event_tx.send(SessionEvent::Failed {
                    message: err.to_string(),
                });
                self.clear_session(false).await;
                Err(err.into())
            }
        }
    }

    /// Run one full generation attempt against the uploaded asset.
    ///
    /// Submit -> poll -> resolve. Any stage failure emits the error and
    /// returns the session to `Ready` with the asset preserved, so the
    /// user may retry without re-uploading. A superseded attempt
    /// returns [`SessionError::Superseded`] and emits nothing.
    pub async fn generate(&self) -> Result<GenerationResult, SessionError> {
        let (image_url, epoch, cancel) = {
            let mut inner = self.inner.lock().await;
            if !inner.phase.can_generate() {
                return Err(if inner.phase.is_busy() {
                    SessionError::Busy
                } else {
                    SessionError::NoAssetUploaded
                });
            }
            let image_url = inner.asset_url.clone().ok_or(SessionError::NoAssetUploaded)?;
            inner.phase = Phase::Submitting;
            inner.epoch += 1;
            inner.cancel = CancellationToken::new();
            (image_url, inner.epoch, inner.cancel.clone())
        };

        match self.run_generation(&image_url, epoch, &cancel).await {
            Ok(result) => Ok(result),
            Err(err) => self.conclude_failed_attempt(epoch, err).await,
        }
    }

    /// Discard the uploaded asset and return to `Idle`. The displayed
    /// result, if any, stays visible until the next selection or reset.
    pub async fn remove_asset(&self) {
        self.clear_session(false).await;
    }

    /// Full reset: discard the asset and the displayed result, abandon
    /// any in-flight attempt, return to `Idle`. Valid from every phase.
    pub async fn reset(&self) {
        self.clear_session(true).await;
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> Phase {
        self.inner.lock().await.phase
    }

    /// Public URL of the uploaded asset, if one is stored.
    pub async fn asset_url(&self) -> Option<String> {
        self.inner.lock().await.asset_url.clone()
    }

    /// The in-flight generation job, if any.
    pub async fn current_job(&self) -> Option<GenerationJob> {
        self.inner.lock().await.job.clone()
    }

    /// The most recently displayed result, if any.
    pub async fn last_result(&self) -> Option<GenerationResult> {
        self.inner.lock().await.result.clone()
    }

    // ---- private helpers ----

    async fn run_generation(
        &self,
        image_url: &str,
        epoch: u64,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, SessionError> {
        self.emit_status(STATUS_SUBMITTING);
        tracing::info!(image_url, "Submitting generation job");

        let submitted = self
            .api
            .submit_job(self.job_kind, image_url, &self.params)
            .await?;

        {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return Err(SessionError::Superseded);
            }
            inner.phase = Phase::Polling;
            inner.job = Some(GenerationJob::new(
                submitted.job_id.clone(),
                image_url.to_string(),
            ));
        }
        tracing::info!(job_id = %submitted.job_id, "Generation job queued");
        self.emit_status(STATUS_QUEUED);

        let payload = poll_job(
            &self.api,
            self.job_kind,
            &self.params.user_id,
            &submitted.job_id,
            &self.poll,
            cancel,
            |attempt| {
                let _ = self.event_tx.send(SessionEvent::Progress { attempt });
                self.emit_status(&processing_label(attempt));
            },
        )
        .await?;

        {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return Err(SessionError::Superseded);
            }
            inner.phase = Phase::Resolving;
        }

        let result = resolve_result(&payload)?;

        {
            let mut inner = self.inner.lock().await;
            if inner.epoch != epoch {
                return Err(SessionError::Superseded);
            }
            inner.phase = Phase::Displayed;
            inner.result = Some(result.clone());
            inner.job = None;
        }
        self.emit_status(STATUS_COMPLETE);
        let _ = self.event_tx.send(SessionEvent::ResultReady {
            result: result.clone(),
        });
        tracing::info!(media_url = %result.media_url, "Generation result displayed");

        Ok(result)
    }

    /// Land a failed attempt back in `Ready` and surface the error --
    /// unless the attempt was superseded, in which case its outcome is
    /// discarded without touching state or emitting anything.
    async fn conclude_failed_attempt(
        &self,
        epoch: u64,
        err: SessionError,
    ) -> Result<GenerationResult, SessionError> {
        let superseded = matches!(
            err,
            SessionError::Superseded | SessionError::Poll(PollError::Cancelled)
        );

        {
            let mut inner = self.inner.lock().await;
            if superseded || inner.epoch != epoch {
                tracing::debug!("Discarding outcome of a superseded generation attempt");
                return Err(SessionError::Superseded);
            }
            inner.phase = Phase::Ready;
            inner.job = None;
        }

        tracing::error!(error = %err, "Generation attempt failed");
        self.emit_status(STATUS_ERROR);
        let _ = self.event_tx.send(SessionEvent::Failed {
            message: err.to_string(),
        });
        Err(err)
    }

    fn emit_status(&self, text: &str) {
        let _ = self.event_tx.send(SessionEvent::StatusChanged {
            text: text.to_string(),
        });
    }

    fn emit_awaiting_input(&self) {
        self.emit_status(STATUS_AWAITING_INPUT);
    }

    /// Return to `Idle`: cancel the in-flight attempt, bump the epoch,
    /// drop the asset (and optionally the displayed result).
    async fn clear_session(&self, clear_result: bool) {
        {
            let mut inner = self.inner.lock().await;
            inner.cancel.cancel();
            inner.cancel = CancellationToken::new();
            inner.epoch += 1;
            inner.asset_url = None;
            inner.job = None;
            inner.phase = Phase::Idle;
            if clear_result {
                inner.result = None;
            }
        }
        self.emit_awaiting_input();
    }
}

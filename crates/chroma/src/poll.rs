//! Bounded status polling for generation jobs.
//!
//! One status request at a time, a fixed wait between attempts, and a
//! hard attempt cap -- never concurrent, never adaptive. Transport or
//! HTTP failures abort immediately; only a not-yet-terminal status is
//! waited out. The wait respects a [`CancellationToken`] so a session
//! reset can abandon an in-flight attempt mid-sleep.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{ChromaApi, ChromaApiError};
use crate::job::JobKind;
use crate::status::{classify, Disposition, JobStatusResponse};

/// Tunable parameters for the poll loop.
pub struct PollConfig {
    /// Fixed wait between status checks.
    pub interval: Duration,
    /// Maximum number of status checks before giving up.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 60,
        }
    }
}

/// Errors from the poll loop.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The status request failed at the transport or HTTP level.
    /// Not retried -- only a pending status is waited out.
    #[error("Status check failed: {0}")]
    Status(#[from] ChromaApiError),

    /// The job reached a terminal failure state.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The attempt cap was exhausted without a terminal status.
    #[error("Job timed out after {attempts} status checks")]
    TimedOut {
        /// Number of status checks issued.
        attempts: u32,
    },

    /// The cancellation token fired while waiting between attempts.
    #[error("Polling cancelled")]
    Cancelled,
}

/// Poll a job until it reaches a terminal state or the cap is exhausted.
///
/// `on_progress` is invoked once after every non-terminal response with
/// the attempt count so far. Returns the terminal `completed` payload,
/// or the first error per [`PollError`]. Exactly one request is in
/// flight at any time.
pub async fn poll_job(
    api: &ChromaApi,
    kind: JobKind,
    user_id: &str,
    job_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    mut on_progress: impl FnMut(u32),
) -> Result<JobStatusResponse, PollError> {
    let mut attempts = 0u32;

    while attempts < config.max_attempts {
        let response = api.fetch_status(kind, user_id, job_id).await?;

        match classify(&response) {
            Disposition::Completed => {
                tracing::info!(job_id, attempts, "Generation job completed");
                return Ok(response);
            }
            Disposition::Failed(message) => {
                tracing::warn!(job_id, error = %message, "Generation job failed");
                return Err(PollError::JobFailed(message));
            }
            Disposition::Pending => {}
        }

        attempts += 1;
        on_progress(attempts);
        tracing::debug!(
            job_id,
            attempt = attempts,
            status = %response.status,
            "Job still in progress",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(job_id, "Polling cancelled");
                return Err(PollError::Cancelled);
            }
            _ = tokio::time::sleep(config.interval) => {}
        }
    }

    Err(PollError::TimedOut { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_caps_at_two_minutes() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_millis(2000));
        assert_eq!(config.max_attempts, 60);
        // 60 checks on a 2-second cadence: a hard 120 s ceiling.
        assert_eq!(config.interval * config.max_attempts, Duration::from_secs(120));
    }
}

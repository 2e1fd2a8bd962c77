//! Session lifecycle phases and gating rules.
//!
//! The controller moves through
//! `Idle -> Uploading -> Ready -> Submitting -> Polling -> Resolving ->
//! Displayed`. Failures never rest in a dedicated phase: a failed
//! upload lands back in `Idle`, a failed generation attempt lands back
//! in `Ready` (the asset is kept). Re-entrant operations are prevented
//! by these gates, not by holding locks across suspension points.

use serde::Serialize;

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No asset uploaded.
    Idle,
    /// A selected file is uploading.
    Uploading,
    /// An asset is uploaded; generation is available.
    Ready,
    /// A generation job is being submitted.
    Submitting,
    /// Waiting for the job to reach a terminal status.
    Polling,
    /// Normalizing the terminal payload.
    Resolving,
    /// A resolved result is displayed; generation is available again.
    Displayed,
}

impl Phase {
    /// Whether a network operation is currently in flight.
    ///
    /// Busy phases gate both new file selections and new generate
    /// actions; reset is the one operation allowed from anywhere.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Uploading | Phase::Submitting | Phase::Polling | Phase::Resolving
        )
    }

    /// Whether a generate action may start from this phase.
    pub fn can_generate(&self) -> bool {
        matches!(self, Phase::Ready | Phase::Displayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_phases_gate_new_operations() {
        assert!(Phase::Uploading.is_busy());
        assert!(Phase::Submitting.is_busy());
        assert!(Phase::Polling.is_busy());
        assert!(Phase::Resolving.is_busy());

        assert!(!Phase::Idle.is_busy());
        assert!(!Phase::Ready.is_busy());
        assert!(!Phase::Displayed.is_busy());
    }

    #[test]
    fn generate_requires_ready_or_displayed() {
        assert!(Phase::Ready.can_generate());
        assert!(Phase::Displayed.can_generate());

        assert!(!Phase::Idle.can_generate());
        assert!(!Phase::Polling.can_generate());
    }
}

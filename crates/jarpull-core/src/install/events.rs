//! Install events - discriminated union for all run state changes.
//!
//! Observers that want a push feed (instead of polling the run snapshot)
//! receive these through an `InstallEventEmitterPort`. The serde
//! representation is a tagged union so non-Rust consumers can switch on
//! `type`.

use serde::{Deserialize, Serialize};

use super::run::InstallPhase;

/// Single discriminated union for all install events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstallEvent {
    /// The run entered a new phase.
    PhaseChanged {
        /// Canonical run key (`software:version`).
        key: String,
        /// Phase that was entered.
        phase: InstallPhase,
        /// Status message accompanying the transition, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Simulated progress update during `Downloading`.
    Progress {
        /// Canonical run key.
        key: String,
        /// Completion percentage (0..=100).
        percent: u8,
        /// Estimated bytes transferred.
        downloaded_estimate: u64,
        /// Static per-software size estimate.
        total_estimate: u64,
        /// Human-readable transfer rate.
        speed_label: String,
    },

    /// The run completed successfully.
    Succeeded {
        /// Canonical run key.
        key: String,
        /// Final status message.
        message: String,
    },

    /// The run failed.
    Failed {
        /// Canonical run key.
        key: String,
        /// Failure description (from `InstallError::user_message`).
        error: String,
    },

    /// A terminal run was auto-cleared back to idle.
    Cleared {
        /// Canonical run key of the run that was cleared.
        key: String,
    },
}

impl InstallEvent {
    /// Create a phase-changed event.
    pub fn phase_changed(
        key: impl Into<String>,
        phase: InstallPhase,
        message: Option<impl Into<String>>,
    ) -> Self {
        Self::PhaseChanged {
            key: key.into(),
            phase,
            message: message.map(Into::into),
        }
    }

    /// Create a progress event.
    pub fn progress(
        key: impl Into<String>,
        percent: u8,
        downloaded_estimate: u64,
        total_estimate: u64,
        speed_label: impl Into<String>,
    ) -> Self {
        Self::Progress {
            key: key.into(),
            percent,
            downloaded_estimate,
            total_estimate,
            speed_label: speed_label.into(),
        }
    }

    /// Create a succeeded event.
    pub fn succeeded(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Succeeded {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a failed event.
    pub fn failed(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            key: key.into(),
            error: error.into(),
        }
    }

    /// Create a cleared event.
    pub fn cleared(key: impl Into<String>) -> Self {
        Self::Cleared { key: key.into() }
    }

    /// Get the run key from any event type.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::PhaseChanged { key, .. }
            | Self::Progress { key, .. }
            | Self::Succeeded { key, .. }
            | Self::Failed { key, .. }
            | Self::Cleared { key } => key,
        }
    }

    /// Get the event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "install:phase",
            Self::Progress { .. } => "install:progress",
            Self::Succeeded { .. } => "install:succeeded",
            Self::Failed { .. } => "install:failed",
            Self::Cleared { .. } => "install:cleared",
        }
    }
}

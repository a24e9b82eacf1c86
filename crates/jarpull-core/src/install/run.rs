//! The observable installation run slot.
//!
//! `InstallRun` is the single shared state the orchestrator writes and every
//! observer (CLI renderer, event bridge) reads. There is exactly one writer;
//! readers get consistent snapshots through a `tokio::sync::watch` channel
//! and never need additional locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::InstallKey;

/// Phase of an installation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallPhase {
    /// No run in progress.
    #[default]
    Idle,
    /// The pull request is being submitted to the panel.
    Requesting,
    /// The panel accepted the pull; simulated progress is running.
    Downloading,
    /// Archive artifact landed; decompress is in flight.
    Extracting,
    /// Terminal: the install completed.
    Succeeded,
    /// Terminal: the install failed.
    Failed,
}

impl InstallPhase {
    /// String representation for logs and wire formats.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Whether this phase ends the run (pending auto-clear back to `Idle`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Simulated download progress, present only during `Downloading`.
///
/// The panel's pull API is fire-and-accept and reports no transfer
/// telemetry, so these numbers are synthetic: `percent` follows the
/// simulator's curve and `downloaded_estimate` is derived from the catalog's
/// approximate artifact size. They must never be mistaken for byte counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallProgress {
    /// Completion percentage, 0..=100, non-decreasing within a run.
    pub percent: u8,
    /// Estimated bytes transferred (`total_estimate * percent / 100`).
    pub downloaded_estimate: u64,
    /// Static per-software size estimate from the catalog.
    pub total_estimate: u64,
    /// Human-readable transfer rate (e.g., "4.2 MB/s").
    pub speed_label: String,
}

/// Snapshot of the single installation run slot.
///
/// `key` is `None` exactly when `phase` is `Idle`; `message` is set whenever
/// the phase is not `Idle`; `progress` is set only during `Downloading`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRun {
    /// Run key, absent when idle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<InstallKey>,
    /// Current phase.
    pub phase: InstallPhase,
    /// Simulated progress (only during `Downloading`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<InstallProgress>,
    /// Human-readable status line (always set when not idle).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the run started; bounds the simulated progress curve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl InstallRun {
    /// The idle slot: no key, no progress, no message.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            key: None,
            phase: InstallPhase::Idle,
            progress: None,
            message: None,
            started_at: None,
        }
    }

    /// Whether the slot is idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, InstallPhase::Idle)
    }

    /// Whether this run matches the given key.
    #[must_use]
    pub fn is_for(&self, key: &InstallKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Current percent, 0 when no progress is published.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.progress.as_ref().map_or(0, |p| p.percent)
    }
}

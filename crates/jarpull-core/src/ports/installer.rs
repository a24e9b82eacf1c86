//! Installer port definition.
//!
//! This port is the public interface of the installation orchestration
//! engine. It abstracts away the run token, the spawned task, and the
//! progress simulator behind three operations: fire off an install, read the
//! current run, subscribe to run changes.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::install::{InstallKey, InstallRun};

/// Request to install one software version onto one server.
///
/// Immutable once submitted; the orchestrator copies what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Panel identifier of the target server.
    pub server: String,
    /// Software identifier (e.g., "paper").
    pub software: String,
    /// Version string (e.g., "1.21.8").
    pub version: String,
}

impl InstallRequest {
    /// Create a new install request.
    pub fn new(
        server: impl Into<String>,
        software: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            software: software.into(),
            version: version.into(),
        }
    }

    /// The run key this request maps to.
    #[must_use]
    pub fn key(&self) -> InstallKey {
        InstallKey::new(&self.software, &self.version)
    }
}

/// Configuration for the installation orchestrator.
///
/// All timing policy lives here rather than in literals so tests can shrink
/// the delays and keep the suite fast.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Wall-clock budget for the simulated download phase.
    pub simulated_duration: Duration,
    /// Cadence of simulated progress ticks.
    pub tick_interval: Duration,
    /// Wait after the simulator finishes before declaring success, to let
    /// the remote pull settle.
    pub settle_delay: Duration,
    /// Wait before calling decompress on archive artifacts; the remote pull
    /// is typically still finishing in the background.
    pub extract_delay: Duration,
    /// How long terminal phases stay visible before auto-clearing to idle.
    pub clear_delay: Duration,
    /// Destination directory on the server for pulled files.
    pub destination_dir: String,
    /// Fixed destination filename for direct-kind artifacts.
    pub jar_filename: String,
    /// Fixed destination filename for archive-kind artifacts.
    pub archive_filename: String,
    /// Seed for the progress simulator; `None` means derive one per run.
    pub progress_seed: Option<u64>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            simulated_duration: Duration::from_secs(30),
            tick_interval: Duration::from_millis(500),
            settle_delay: Duration::from_secs(2),
            extract_delay: Duration::from_secs(10),
            clear_delay: Duration::from_secs(5),
            destination_dir: "/".to_string(),
            jar_filename: "server.jar".to_string(),
            archive_filename: "installer.zip".to_string(),
            progress_seed: None,
        }
    }
}

impl InstallerConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simulated download duration.
    #[must_use]
    pub const fn with_simulated_duration(mut self, duration: Duration) -> Self {
        self.simulated_duration = duration;
        self
    }

    /// Set the progress tick cadence.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the post-download settle delay.
    #[must_use]
    pub const fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the pre-extraction wait.
    #[must_use]
    pub const fn with_extract_delay(mut self, delay: Duration) -> Self {
        self.extract_delay = delay;
        self
    }

    /// Set the terminal-phase auto-clear delay.
    #[must_use]
    pub const fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    /// Set the progress simulator seed (for deterministic tests).
    #[must_use]
    pub const fn with_progress_seed(mut self, seed: u64) -> Self {
        self.progress_seed = Some(seed);
        self
    }

    /// Number of simulated ticks implied by duration and cadence.
    #[must_use]
    pub fn tick_count(&self) -> u32 {
        let interval = self.tick_interval.as_millis().max(1);
        u32::try_from(self.simulated_duration.as_millis() / interval).unwrap_or(u32::MAX)
    }
}

/// Port for the installation orchestration engine.
///
/// `start_install` is fire-and-forget: the outcome is observed through the
/// published `InstallRun`, never through a return value. Starting a run
/// while another is active pre-empts the old one immediately - there is no
/// explicit cancel operation.
#[async_trait]
pub trait InstallerPort: Send + Sync {
    /// Start an installation run.
    ///
    /// Returns the minted run key so callers can label their observation of
    /// the run slot; it carries no success/failure information.
    ///
    /// The `self: Arc<Self>` receiver allows implementations to clone the
    /// Arc and drive the run on a spawned task.
    async fn start_install(self: Arc<Self>, request: InstallRequest) -> InstallKey;

    /// Snapshot of the current run slot.
    fn current_run(&self) -> InstallRun;

    /// Subscribe to run slot changes.
    ///
    /// The receiver observes every committed state; readers tolerate the
    /// slot changing between reads without additional locking (single
    /// writer, watch semantics).
    fn subscribe(&self) -> watch::Receiver<InstallRun>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key() {
        let request = InstallRequest::new("d3adb33f", "paper", "1.21.8");
        assert_eq!(request.key(), InstallKey::new("paper", "1.21.8"));
    }

    #[test]
    fn test_default_config() {
        let config = InstallerConfig::default();
        assert_eq!(config.simulated_duration, Duration::from_secs(30));
        assert_eq!(config.destination_dir, "/");
        assert_eq!(config.jar_filename, "server.jar");
        assert_eq!(config.archive_filename, "installer.zip");
        assert!(config.progress_seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = InstallerConfig::new()
            .with_simulated_duration(Duration::from_millis(100))
            .with_tick_interval(Duration::from_millis(10))
            .with_clear_delay(Duration::from_millis(1))
            .with_progress_seed(7);

        assert_eq!(config.tick_count(), 10);
        assert_eq!(config.progress_seed, Some(7));
        assert_eq!(config.clear_delay, Duration::from_millis(1));
    }

    #[test]
    fn test_tick_count_never_zero_interval() {
        let config = InstallerConfig::new()
            .with_simulated_duration(Duration::from_secs(1))
            .with_tick_interval(Duration::ZERO);
        // Degenerate interval clamps to 1ms rather than dividing by zero.
        assert_eq!(config.tick_count(), 1000);
    }
}

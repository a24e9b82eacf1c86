//! Installation orchestrator.
//!
//! Drives the end-to-end state machine for one installation run: validate
//! against the catalog, submit the pull, run the simulated download, branch
//! on artifact kind, optionally decompress, finalize, and auto-clear.
//!
//! # Concurrency Model
//!
//! - One logical run slot, published through a `watch` channel (single
//!   writer, any number of readers)
//! - An `AtomicU64` epoch mints a `RunToken` per run; every state commit is
//!   token-checked, so anything a superseded run tries to write is discarded
//! - Pre-emption IS cancellation: starting a new run invalidates the old
//!   token immediately, and there is no hard abort of in-flight remote calls

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::time::sleep;

use async_trait::async_trait;

use jarpull_core::{
    ArtifactKind, CatalogEntry, InstallError, InstallEvent, InstallEventEmitterPort, InstallKey,
    InstallPhase, InstallProgress, InstallRequest, InstallRun, InstallerConfig, InstallerPort,
    PanelClientPort, PanelError, SoftwareCatalog,
};

use crate::progress::{ProgressSimulator, SimulatedTick};

/// Token identifying which run currently owns the slot.
///
/// Minted from the epoch counter on every `start_install`; a commit whose
/// token no longer matches the epoch is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RunToken(u64);

/// Dependencies for creating an installer.
pub struct InstallerDeps<P, E>
where
    P: PanelClientPort + 'static,
    E: InstallEventEmitterPort + 'static,
{
    /// Port for the control-panel client API.
    pub panel: Arc<P>,
    /// Port for emitting install events.
    pub event_emitter: Arc<E>,
    /// The software catalog.
    pub catalog: SoftwareCatalog,
    /// Timing and destination policy.
    pub config: InstallerConfig,
}

/// Build an installer from its dependencies.
///
/// Returns an `Arc` so callers can hand the same instance to the spawned
/// run tasks and to observers.
pub fn build_installer<P, E>(deps: InstallerDeps<P, E>) -> Arc<Installer>
where
    P: PanelClientPort + 'static,
    E: InstallEventEmitterPort + 'static,
{
    Arc::new(Installer::new(
        deps.panel,
        deps.event_emitter,
        deps.catalog,
        deps.config,
    ))
}

/// Concrete implementation of the installation orchestration engine.
pub struct Installer {
    /// Panel client for the two remote file operations.
    panel: Arc<dyn PanelClientPort>,
    /// Event emitter for push-style observers.
    emitter: Arc<dyn InstallEventEmitterPort>,
    /// Static software catalog.
    catalog: SoftwareCatalog,
    /// Timing and destination policy.
    config: InstallerConfig,
    /// Epoch counter for minting run tokens.
    epoch: AtomicU64,
    /// The single run slot.
    run_tx: watch::Sender<InstallRun>,
}

impl Installer {
    /// Create a new installer.
    fn new<P, E>(
        panel: Arc<P>,
        emitter: Arc<E>,
        catalog: SoftwareCatalog,
        config: InstallerConfig,
    ) -> Self
    where
        P: PanelClientPort + 'static,
        E: InstallEventEmitterPort + 'static,
    {
        let panel_dyn: Arc<dyn PanelClientPort> = panel;
        let (run_tx, _) = watch::channel(InstallRun::idle());
        Self {
            panel: panel_dyn,
            emitter: emitter as Arc<dyn InstallEventEmitterPort>,
            catalog,
            config,
            epoch: AtomicU64::new(0),
            run_tx,
        }
    }

    /// Mint a fresh token, invalidating whatever run was active before.
    fn mint_token(&self) -> RunToken {
        RunToken(self.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Commit a mutation to the run slot iff `token` is still the active
    /// run.
    ///
    /// The epoch check happens inside the channel's write closure, so a
    /// pre-empting run that has already bumped the epoch can never be
    /// overwritten by a stale timer or response.
    fn apply_if_current<F>(&self, token: RunToken, mutate: F) -> bool
    where
        F: FnOnce(&mut InstallRun),
    {
        let applied = self.run_tx.send_if_modified(|run| {
            if self.epoch.load(Ordering::SeqCst) != token.0 {
                return false;
            }
            mutate(run);
            true
        });

        if !applied {
            tracing::debug!(token = token.0, "ignoring stale commit (run superseded)");
        }
        applied
    }

    /// Enter a non-terminal phase. Progress is only defined during
    /// `Downloading`, which commits its own shape; every other phase clears
    /// it.
    fn commit_phase(
        &self,
        token: RunToken,
        key: &InstallKey,
        phase: InstallPhase,
        message: String,
    ) -> bool {
        let applied = self.apply_if_current(token, |run| {
            run.phase = phase;
            run.message = Some(message.clone());
            run.progress = None;
        });

        if applied {
            tracing::info!(key = %key, phase = phase.as_str(), "run phase changed");
            self.emitter
                .emit(InstallEvent::phase_changed(key.to_string(), phase, Some(message)));
        }
        applied
    }

    /// Apply one simulated progress tick.
    fn commit_progress(&self, token: RunToken, key: &InstallKey, tick: &SimulatedTick) -> bool {
        let progress = InstallProgress {
            percent: tick.percent,
            downloaded_estimate: tick.downloaded_estimate,
            total_estimate: tick.total_estimate,
            speed_label: tick.speed_label.clone(),
        };

        let applied = self.apply_if_current(token, |run| {
            run.progress = Some(progress);
        });

        if applied {
            self.emitter.emit(InstallEvent::progress(
                key.to_string(),
                tick.percent,
                tick.downloaded_estimate,
                tick.total_estimate,
                tick.speed_label.clone(),
            ));
        }
        applied
    }

    /// Finalize the run as succeeded and schedule the auto-clear.
    fn succeed_run(self: &Arc<Self>, token: RunToken, key: &InstallKey) -> bool {
        let message = format!("{} installed successfully!", key.label());
        let applied = self.apply_if_current(token, |run| {
            run.phase = InstallPhase::Succeeded;
            run.message = Some(message.clone());
            run.progress = None;
        });

        if applied {
            tracing::info!(key = %key, "install succeeded");
            self.emitter
                .emit(InstallEvent::succeeded(key.to_string(), message));
            self.schedule_clear(token, key.clone());
        }
        applied
    }

    /// Finalize the run as failed and schedule the auto-clear.
    fn fail_run(self: &Arc<Self>, token: RunToken, key: &InstallKey, error: &InstallError) {
        let message = error.user_message();
        let applied = self.apply_if_current(token, |run| {
            run.phase = InstallPhase::Failed;
            run.message = Some(message.clone());
            run.progress = None;
        });

        if applied {
            tracing::warn!(key = %key, error = %error, "install failed");
            self.emitter.emit(InstallEvent::failed(key.to_string(), message));
            self.schedule_clear(token, key.clone());
        }
    }

    /// After the clear delay, reset a still-current terminal run to idle.
    fn schedule_clear(self: &Arc<Self>, token: RunToken, key: InstallKey) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            sleep(this.config.clear_delay).await;
            let cleared = this.apply_if_current(token, |run| {
                *run = InstallRun::idle();
            });
            if cleared {
                tracing::debug!(key = %key, "terminal run auto-cleared");
                this.emitter.emit(InstallEvent::cleared(key.to_string()));
            }
        });
    }

    /// Destination filename for an artifact kind.
    ///
    /// Fixed names (not derived from the URL) keep repeated installs
    /// idempotent in destination path and give the decompress step a known
    /// target.
    fn destination_filename(&self, kind: ArtifactKind) -> &str {
        if kind.is_archive() {
            &self.config.archive_filename
        } else {
            &self.config.jar_filename
        }
    }

    /// Seed for this run's progress curve.
    fn progress_seed(&self, token: RunToken) -> u64 {
        self.config.progress_seed.unwrap_or_else(|| {
            chrono::Utc::now().timestamp_millis().unsigned_abs() ^ token.0.rotate_left(32)
        })
    }

    /// Drive one run from pull submission to a terminal phase.
    async fn drive_run(
        self: Arc<Self>,
        token: RunToken,
        entry: CatalogEntry,
        request: InstallRequest,
    ) {
        let key = entry.key();
        let filename = self.destination_filename(entry.kind).to_string();

        // Phase: Requesting -> submit the pull
        let pull = self
            .panel
            .pull_file(
                &request.server,
                &entry.artifact_url,
                &self.config.destination_dir,
                &filename,
            )
            .await;

        if let Err(e) = pull {
            self.fail_run(token, &key, &pull_error(e));
            return;
        }

        // Phase: Downloading -> simulated progress until 100
        let message = format!("downloading {}...", key.label());
        let initial = InstallProgress {
            percent: 0,
            downloaded_estimate: 0,
            total_estimate: entry.approx_size,
            speed_label: "0 B/s".to_string(),
        };
        let applied = self.apply_if_current(token, |run| {
            run.phase = InstallPhase::Downloading;
            run.message = Some(message.clone());
            run.progress = Some(initial);
        });
        if !applied {
            return;
        }
        tracing::info!(key = %key, phase = "downloading", "run phase changed");
        self.emitter.emit(InstallEvent::phase_changed(
            key.to_string(),
            InstallPhase::Downloading,
            Some(message),
        ));

        let mut simulator = ProgressSimulator::new(
            entry.approx_size,
            self.config.tick_count(),
            self.config.tick_interval,
            self.progress_seed(token),
        );

        loop {
            sleep(self.config.tick_interval).await;
            let Some(tick) = simulator.next_tick() else {
                break;
            };
            let done = tick.percent >= 100;
            if !self.commit_progress(token, &key, &tick) {
                return;
            }
            if done {
                break;
            }
        }

        // Phase branch on artifact kind
        match entry.kind {
            ArtifactKind::Direct => {
                sleep(self.config.settle_delay).await;
                self.succeed_run(token, &key);
            }
            ArtifactKind::Archive => {
                if !self.commit_phase(
                    token,
                    &key,
                    InstallPhase::Extracting,
                    format!("extracting {}...", key.label()),
                ) {
                    return;
                }

                // The remote pull is typically still finishing; give it the
                // configured head start before asking for the decompress.
                sleep(self.config.extract_delay).await;

                let decompress = self
                    .panel
                    .decompress_file(&request.server, &self.config.destination_dir, &filename)
                    .await;

                match decompress {
                    Ok(()) => {
                        sleep(self.config.settle_delay).await;
                        self.succeed_run(token, &key);
                    }
                    Err(e) => self.fail_run(token, &key, &extraction_error(e)),
                }
            }
        }
    }
}

/// Map a panel failure during the pull submission.
fn pull_error(e: PanelError) -> InstallError {
    match e {
        PanelError::Unauthorized => {
            InstallError::pull_failed_with_status(401, "panel rejected the credentials")
        }
        PanelError::RequestFailed { status, detail } => {
            InstallError::pull_failed_with_status(status, detail)
        }
        PanelError::Transport { message } => InstallError::transport(message),
    }
}

/// Map a panel failure during the decompress call.
///
/// Remote rejections become `ExtractionFailed` so the user knows the
/// artifact landed but is still packed; pure network failures stay
/// `Transport`.
fn extraction_error(e: PanelError) -> InstallError {
    match e {
        PanelError::Unauthorized => {
            InstallError::extraction_failed_with_status(401, "panel rejected the credentials")
        }
        PanelError::RequestFailed { status, detail } => {
            InstallError::extraction_failed_with_status(status, detail)
        }
        PanelError::Transport { message } => InstallError::transport(message),
    }
}

#[async_trait]
impl InstallerPort for Installer {
    async fn start_install(self: Arc<Self>, request: InstallRequest) -> InstallKey {
        let key = request.key();
        let token = self.mint_token();

        tracing::info!(key = %key, server = %request.server, "install requested");

        let Some(entry) = self.catalog.resolve(&request.software, &request.version) else {
            // No remote calls: pre-empt whatever was displayed and go
            // straight to Failed.
            let error = InstallError::catalog_miss(&request.software, &request.version);
            let message = error.user_message();
            let applied = self.apply_if_current(token, |run| {
                *run = InstallRun {
                    key: Some(key.clone()),
                    phase: InstallPhase::Failed,
                    progress: None,
                    message: Some(message.clone()),
                    started_at: Some(chrono::Utc::now()),
                };
            });
            if applied {
                tracing::warn!(key = %key, "no catalog entry for requested version");
                self.emitter.emit(InstallEvent::failed(key.to_string(), message));
                self.schedule_clear(token, key.clone());
            }
            return key;
        };

        let applied = self.apply_if_current(token, |run| {
            *run = InstallRun {
                key: Some(key.clone()),
                phase: InstallPhase::Requesting,
                progress: None,
                message: Some(format!("installing {}...", key.label())),
                started_at: Some(chrono::Utc::now()),
            };
        });
        if applied {
            self.emitter.emit(InstallEvent::phase_changed(
                key.to_string(),
                InstallPhase::Requesting,
                Some(format!("installing {}...", key.label())),
            ));
            tokio::spawn(Arc::clone(&self).drive_run(token, entry, request));
        }

        key
    }

    fn current_run(&self) -> InstallRun {
        self.run_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<InstallRun> {
        self.run_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarpull_core::NoopInstallEmitter;

    struct UnreachablePanel;

    #[async_trait]
    impl PanelClientPort for UnreachablePanel {
        async fn verify_credentials(&self) -> Result<(), PanelError> {
            panic!("no panel call expected")
        }

        async fn list_servers(&self) -> Result<Vec<jarpull_core::PanelServer>, PanelError> {
            panic!("no panel call expected")
        }

        async fn pull_file(
            &self,
            _server: &str,
            _url: &str,
            _directory: &str,
            _filename: &str,
        ) -> Result<(), PanelError> {
            panic!("no panel call expected")
        }

        async fn decompress_file(
            &self,
            _server: &str,
            _root: &str,
            _file: &str,
        ) -> Result<(), PanelError> {
            panic!("no panel call expected")
        }
    }

    fn test_installer() -> Arc<Installer> {
        build_installer(InstallerDeps {
            panel: Arc::new(UnreachablePanel),
            event_emitter: Arc::new(NoopInstallEmitter::new()),
            catalog: SoftwareCatalog::builtin(),
            config: InstallerConfig::default(),
        })
    }

    #[test]
    fn test_stale_token_commits_are_dropped() {
        let installer = test_installer();
        let old = installer.mint_token();
        let _new = installer.mint_token();

        let applied = installer.apply_if_current(old, |run| {
            run.message = Some("stale".to_string());
        });

        assert!(!applied);
        assert!(installer.current_run().message.is_none());
    }

    #[test]
    fn test_current_token_commits_apply() {
        let installer = test_installer();
        let token = installer.mint_token();

        let applied = installer.apply_if_current(token, |run| {
            run.message = Some("live".to_string());
        });

        assert!(applied);
        assert_eq!(installer.current_run().message.as_deref(), Some("live"));
    }

    #[test]
    fn test_destination_filename_by_kind() {
        let installer = test_installer();
        assert_eq!(
            installer.destination_filename(ArtifactKind::Direct),
            "server.jar"
        );
        assert_eq!(
            installer.destination_filename(ArtifactKind::Archive),
            "installer.zip"
        );
    }

    #[test]
    fn test_pull_error_mapping() {
        let mapped = pull_error(PanelError::request_failed(502, "Bad Gateway"));
        assert_eq!(
            mapped,
            InstallError::pull_failed_with_status(502, "Bad Gateway")
        );

        let transport = pull_error(PanelError::transport("connection reset"));
        assert!(matches!(transport, InstallError::Transport { .. }));
    }

    #[test]
    fn test_extraction_error_mapping_is_post_download() {
        let mapped = extraction_error(PanelError::request_failed(500, "Internal Server Error"));
        assert!(mapped.is_post_download());
        assert!(mapped.user_message().contains("extraction failed"));
    }

    #[test]
    fn test_fixed_seed_is_used_when_configured() {
        let installer = build_installer(InstallerDeps {
            panel: Arc::new(UnreachablePanel),
            event_emitter: Arc::new(NoopInstallEmitter::new()),
            catalog: SoftwareCatalog::builtin(),
            config: InstallerConfig::default().with_progress_seed(1234),
        });
        assert_eq!(installer.progress_seed(RunToken(1)), 1234);
        assert_eq!(installer.progress_seed(RunToken(2)), 1234);
    }
}

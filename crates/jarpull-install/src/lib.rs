//! Installation orchestration engine for jarpull.
//!
//! This crate owns the only real state-machine and timing logic in the
//! system: the `Installer` drives one installation run at a time against the
//! panel (pull, simulated download, optional decompress, auto-clear), and
//! the `ProgressSimulator` fabricates the download progress the panel cannot
//! report.

mod orchestrator;
pub mod progress;

pub use orchestrator::{Installer, InstallerDeps, build_installer};
pub use progress::{ProgressSimulator, SimulatedTick, format_bytes, format_speed};

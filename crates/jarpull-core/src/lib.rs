//! Core domain types and port definitions for jarpull.
//!
//! This crate is pure logic: install run state, the software catalog, the
//! error taxonomy, and the trait seams (`ports`) that adapters implement.
//! No I/O happens here.

pub mod catalog;
pub mod install;
pub mod ports;

// Re-export commonly used types for convenience
pub use catalog::{ArtifactKind, CatalogEntry, Category, Software, SoftwareCatalog};
pub use install::{
    InstallError, InstallEvent, InstallKey, InstallPhase, InstallProgress, InstallResult,
    InstallRun,
};
pub use ports::{
    InstallEventEmitterPort, InstallRequest, InstallerConfig, InstallerPort, NoopInstallEmitter,
    PanelClientPort, PanelError, PanelResult, PanelServer,
};

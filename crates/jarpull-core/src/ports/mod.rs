//! Port definitions: the trait seams between the core and its adapters.

mod event_emitter;
mod installer;
mod panel;

pub use event_emitter::{InstallEventEmitterPort, NoopInstallEmitter};
pub use installer::{InstallRequest, InstallerConfig, InstallerPort};
pub use panel::{PanelClientPort, PanelError, PanelResult, PanelServer};

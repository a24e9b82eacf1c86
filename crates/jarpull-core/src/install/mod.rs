//! Installation domain: run keys, phases, progress, events, errors.

mod errors;
mod events;
mod run;
mod types;

pub use errors::{InstallError, InstallResult};
pub use events::InstallEvent;
pub use run::{InstallPhase, InstallProgress, InstallRun};
pub use types::InstallKey;

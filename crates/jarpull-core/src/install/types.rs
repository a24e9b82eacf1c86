//! Core domain types for installation runs.
//!
//! Pure data types with no I/O dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier for an installation run.
///
/// Represents one `software:version` pair. At most one run with one key is
/// logically active at a time; the key is how stale timers and responses
/// from a superseded run are recognized and discarded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallKey {
    software: String,
    version: String,
}

impl InstallKey {
    /// Create a new install key.
    pub fn new(software: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            software: software.into(),
            version: version.into(),
        }
    }

    /// Get the software identifier (e.g., "paper").
    #[must_use]
    pub fn software(&self) -> &str {
        &self.software
    }

    /// Get the version string (e.g., "1.21.8").
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human-readable label ("paper 1.21.8"), used in status messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.software, self.version)
    }

    /// Convert to the canonical string format.
    #[must_use]
    pub fn as_canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InstallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.software, self.version)
    }
}

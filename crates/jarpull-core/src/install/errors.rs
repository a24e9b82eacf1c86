//! Installation error taxonomy.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `reqwest::Error`. Remote failures are captured as
//! status/detail strings at the call site.
//!
//! Every variant is terminal for its run: the orchestrator converts it to a
//! `Failed` phase with `user_message()` and never propagates it further.
//! There is no automatic retry; recovery is a fresh `start_install`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for installation runs.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstallError {
    /// No catalog entry resolves for the requested software/version.
    ///
    /// This is an expected state ("not offered"), surfaced without any
    /// remote calls having been made.
    #[error("no artifact available for {software} {version}")]
    CatalogMiss {
        /// Software identifier that was requested.
        software: String,
        /// Version string that was requested.
        version: String,
    },

    /// The panel rejected the pull request, or it failed before queueing.
    #[error("pull request failed: {detail}")]
    PullRequestFailed {
        /// HTTP status code if the remote responded.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        /// Detailed failure description.
        detail: String,
    },

    /// The pull succeeded but the decompress call failed.
    ///
    /// Kept distinct from `PullRequestFailed` so the user knows the artifact
    /// is present on the server, just not unpacked.
    #[error("extraction failed: {detail}")]
    ExtractionFailed {
        /// HTTP status code if the remote responded.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        /// Detailed failure description.
        detail: String,
    },

    /// Network-level failure of either remote call.
    #[error("transport error: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },
}

impl InstallError {
    /// Create a catalog miss error.
    pub fn catalog_miss(software: impl Into<String>, version: impl Into<String>) -> Self {
        Self::CatalogMiss {
            software: software.into(),
            version: version.into(),
        }
    }

    /// Create a pull failure without an HTTP status.
    pub fn pull_failed(detail: impl Into<String>) -> Self {
        Self::PullRequestFailed {
            status: None,
            detail: detail.into(),
        }
    }

    /// Create a pull failure with an HTTP status.
    pub fn pull_failed_with_status(status: u16, detail: impl Into<String>) -> Self {
        Self::PullRequestFailed {
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Create an extraction failure without an HTTP status.
    pub fn extraction_failed(detail: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            status: None,
            detail: detail.into(),
        }
    }

    /// Create an extraction failure with an HTTP status.
    pub fn extraction_failed_with_status(status: u16, detail: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether this failure happened after the download itself succeeded.
    #[must_use]
    pub const fn is_post_download(&self) -> bool {
        matches!(self, Self::ExtractionFailed { .. })
    }

    /// Convert to a user-friendly status message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::CatalogMiss { software, version } => {
                format!("no artifact available for {software} {version}")
            }
            Self::PullRequestFailed {
                status: Some(code),
                detail,
            } => format!("installation failed: {detail} (HTTP {code})"),
            Self::PullRequestFailed { detail, .. } => {
                format!("installation failed: {detail}")
            }
            Self::ExtractionFailed {
                status: Some(code),
                detail,
            } => format!("download succeeded but extraction failed: {detail} (HTTP {code})"),
            Self::ExtractionFailed { detail, .. } => {
                format!("download succeeded but extraction failed: {detail}")
            }
            Self::Transport { message } => format!("installation failed: {message}"),
        }
    }
}

/// Convenience result type for installation operations.
pub type InstallResult<T> = Result<T, InstallError>;

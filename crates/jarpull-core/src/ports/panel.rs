//! Panel client port definition.
//!
//! The control panel (a Pterodactyl-compatible service) is the only remote
//! collaborator. This port abstracts its client API behind four async
//! operations; the orchestrator treats each as an opaque call that succeeds
//! or fails. Credential handling lives entirely inside implementations - the
//! bearer key never crosses this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One server visible to the authenticated account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelServer {
    /// Short panel identifier used in API paths.
    pub identifier: String,
    /// Display name.
    pub name: String,
}

impl PanelServer {
    /// Create a new server record.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// Error type for panel operations.
///
/// Serializable: remote failures are captured as status/detail strings, not
/// as transport-library error types.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PanelError {
    /// The credential was rejected (HTTP 401/403).
    #[error("panel rejected the credentials")]
    Unauthorized,

    /// The panel responded with a non-success status.
    #[error("panel request failed with status {status}: {detail}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response detail (status text or error body excerpt).
        detail: String,
    },

    /// Network-level failure before any response arrived.
    #[error("transport error: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },
}

impl PanelError {
    /// Create a request-failed error.
    pub fn request_failed(status: u16, detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            detail: detail.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// HTTP status code, if the remote responded at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Convenience result type for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;

/// Port for the control-panel client API.
///
/// Both file operations are fire-and-accept: a success return means the
/// panel queued the work, not that it finished. They are idempotent at the
/// destination-path level - re-invoking with the same arguments re-downloads
/// or re-extracts to the same path.
#[async_trait]
pub trait PanelClientPort: Send + Sync {
    /// Verify the configured credential with a lightweight API round-trip.
    async fn verify_credentials(&self) -> PanelResult<()>;

    /// List the servers the authenticated account can manage.
    async fn list_servers(&self) -> PanelResult<Vec<PanelServer>>;

    /// Ask the panel to pull a remote file into a server's file space.
    async fn pull_file(
        &self,
        server: &str,
        url: &str,
        directory: &str,
        filename: &str,
    ) -> PanelResult<()>;

    /// Ask the panel to decompress an archive already in a server's file
    /// space.
    async fn decompress_file(&self, server: &str, root: &str, file: &str) -> PanelResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_extraction() {
        assert_eq!(PanelError::Unauthorized.status(), Some(401));
        assert_eq!(
            PanelError::request_failed(500, "Internal Server Error").status(),
            Some(500)
        );
        assert_eq!(PanelError::transport("connection refused").status(), None);
    }

    #[test]
    fn test_error_messages() {
        let err = PanelError::request_failed(409, "Conflict");
        let msg = err.to_string();
        assert!(msg.contains("409"));
        assert!(msg.contains("Conflict"));
    }

    #[test]
    fn test_error_serialization_round_trip() {
        let err = PanelError::request_failed(500, "boom");
        let json = serde_json::to_string(&err).unwrap();
        let parsed: PanelError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }
}

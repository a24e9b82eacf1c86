//! Internal error types for panel operations.
//!
//! These errors are internal to `jarpull-panel` and are mapped to the core
//! port's `PanelError` at the crate boundary.

use jarpull_core::PanelError;
use thiserror::Error;

/// Result type alias for internal panel operations.
pub type PanelHttpResult<T> = Result<T, PanelHttpError>;

/// Errors raised by the panel HTTP layer.
#[derive(Debug, Error)]
pub enum PanelHttpError {
    /// The panel responded with a non-success HTTP status.
    #[error("panel API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<PanelHttpError> for PanelError {
    fn from(err: PanelHttpError) -> Self {
        match err {
            PanelHttpError::ApiRequestFailed { status, url } if status == 401 || status == 403 => {
                tracing::debug!(status, url = %url, "credential rejected");
                Self::Unauthorized
            }
            PanelHttpError::ApiRequestFailed { status, url } => {
                Self::request_failed(status, format!("request to {url} was rejected"))
            }
            PanelHttpError::Network(e) => Self::transport(e.to_string()),
            PanelHttpError::InvalidUrl(e) => Self::transport(format!("invalid panel URL: {e}")),
            PanelHttpError::JsonParse(e) => {
                Self::transport(format!("unreadable panel response: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_mapping() {
        let err = PanelHttpError::ApiRequestFailed {
            status: 401,
            url: "https://p.example/api/client".to_string(),
        };
        assert_eq!(PanelError::from(err), PanelError::Unauthorized);

        let err = PanelHttpError::ApiRequestFailed {
            status: 403,
            url: "https://p.example/api/client".to_string(),
        };
        assert_eq!(PanelError::from(err), PanelError::Unauthorized);
    }

    #[test]
    fn test_request_failed_mapping_keeps_status() {
        let err = PanelHttpError::ApiRequestFailed {
            status: 500,
            url: "https://p.example/api/client".to_string(),
        };
        match PanelError::from(err) {
            PanelError::RequestFailed { status, detail } => {
                assert_eq!(status, 500);
                assert!(detail.contains("https://p.example/api/client"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_url_maps_to_transport() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let mapped = PanelError::from(PanelHttpError::InvalidUrl(parse_err));
        assert!(matches!(mapped, PanelError::Transport { .. }));
    }
}

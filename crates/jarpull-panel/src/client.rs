//! Panel client for the Pterodactyl client API.
//!
//! This module provides the concrete `PanelClientPort` implementation. The
//! client is generic over an HTTP backend, allowing for easy testing; use
//! `DefaultPanelClient` for production code.

use async_trait::async_trait;
use url::Url;

use jarpull_core::{PanelClientPort, PanelError, PanelResult, PanelServer};

use crate::config::PanelConfig;
use crate::error::PanelHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{ClientListResponse, DecompressBody, PullFileBody};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default panel client using the reqwest HTTP backend.
pub type DefaultPanelClient = PanelClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the panel's client API.
///
/// The generic parameter `B` is an implementation detail - external code
/// should use `DefaultPanelClient::new()` and talk to it through the
/// `PanelClientPort` trait.
#[derive(Debug)]
pub struct PanelClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

impl DefaultPanelClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the configured base URL cannot be parsed.
    pub fn new(config: &PanelConfig) -> PanelHttpResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config);
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> PanelClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> PanelHttpResult<Self> {
        Ok(Self {
            backend,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Build an absolute endpoint URL from an API-relative path.
    fn endpoint(&self, path: &str) -> PanelHttpResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

/// Parse and normalize the panel base URL so joins keep the full path.
fn parse_base_url(raw: &str) -> PanelHttpResult<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

#[async_trait]
impl<B: HttpBackend> PanelClientPort for PanelClient<B> {
    async fn verify_credentials(&self) -> PanelResult<()> {
        let url = self.endpoint("api/client").map_err(PanelError::from)?;
        // The server list is the lightest authenticated endpoint; a 2xx
        // means the key works, the body is irrelevant here.
        let _: serde_json::Value = self.backend.get_json(&url).await.map_err(PanelError::from)?;
        tracing::debug!("panel credentials verified");
        Ok(())
    }

    async fn list_servers(&self) -> PanelResult<Vec<PanelServer>> {
        let url = self.endpoint("api/client").map_err(PanelError::from)?;
        let response: ClientListResponse =
            self.backend.get_json(&url).await.map_err(PanelError::from)?;

        let servers: Vec<PanelServer> = response
            .data
            .into_iter()
            .map(|entry| PanelServer::new(entry.attributes.identifier, entry.attributes.name))
            .collect();

        tracing::debug!(count = servers.len(), "listed panel servers");
        Ok(servers)
    }

    async fn pull_file(
        &self,
        server: &str,
        url: &str,
        directory: &str,
        filename: &str,
    ) -> PanelResult<()> {
        let endpoint = self
            .endpoint(&format!("api/client/servers/{server}/files/pull"))
            .map_err(PanelError::from)?;
        let body = serde_json::to_value(PullFileBody {
            url,
            directory,
            filename,
        })
        .map_err(|e| PanelError::transport(e.to_string()))?;

        tracing::info!(server, url, filename, "submitting pull request");
        self.backend
            .post_json(&endpoint, &body)
            .await
            .map_err(PanelError::from)
    }

    async fn decompress_file(&self, server: &str, root: &str, file: &str) -> PanelResult<()> {
        let endpoint = self
            .endpoint(&format!("api/client/servers/{server}/files/decompress"))
            .map_err(PanelError::from)?;
        let body = serde_json::to_value(DecompressBody { root, file })
            .map_err(|e| PanelError::transport(e.to_string()))?;

        tracing::info!(server, file, "submitting decompress request");
        self.backend
            .post_json(&endpoint, &body)
            .await
            .map_err(PanelError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedOutcome, FakeBackend};
    use serde_json::json;

    fn server_list_json() -> serde_json::Value {
        json!({
            "object": "list",
            "data": [
                {"object": "server", "attributes": {"identifier": "d3adb33f", "name": "Survival"}},
                {"object": "server", "attributes": {"identifier": "c0ffee00", "name": "Creative"}}
            ]
        })
    }

    #[tokio::test]
    async fn test_list_servers_extracts_identifier_and_name() {
        let backend = FakeBackend::new()
            .with_outcome("api/client", CannedOutcome::Json(server_list_json()));
        let client = PanelClient::with_backend("https://p.example", backend).unwrap();

        let servers = client.list_servers().await.unwrap();
        assert_eq!(
            servers,
            vec![
                PanelServer::new("d3adb33f", "Survival"),
                PanelServer::new("c0ffee00", "Creative"),
            ]
        );
    }

    #[tokio::test]
    async fn test_verify_credentials_maps_unauthorized() {
        let backend =
            FakeBackend::new().with_outcome("api/client", CannedOutcome::Status(401));
        let client = PanelClient::with_backend("https://p.example", backend).unwrap();

        let result = client.verify_credentials().await;
        assert_eq!(result, Err(PanelError::Unauthorized));
    }

    #[tokio::test]
    async fn test_pull_file_posts_expected_body() {
        let backend = FakeBackend::new().with_outcome("files/pull", CannedOutcome::Accepted);
        let client = PanelClient::with_backend("https://p.example", backend).unwrap();

        client
            .pull_file(
                "d3adb33f",
                "https://s3.mcjars.app/paper/1.21.8/server.jar",
                "/",
                "server.jar",
            )
            .await
            .unwrap();

        let requests = client.backend.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0]
                .url
                .ends_with("api/client/servers/d3adb33f/files/pull")
        );
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &json!({
                "url": "https://s3.mcjars.app/paper/1.21.8/server.jar",
                "directory": "/",
                "filename": "server.jar"
            })
        );
    }

    #[tokio::test]
    async fn test_decompress_failure_carries_status() {
        let backend =
            FakeBackend::new().with_outcome("files/decompress", CannedOutcome::Status(500));
        let client = PanelClient::with_backend("https://p.example", backend).unwrap();

        let result = client.decompress_file("d3adb33f", "/", "installer.zip").await;
        match result {
            Err(PanelError::RequestFailed { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            parse_base_url("https://p.example").unwrap().as_str(),
            "https://p.example/"
        );
        assert_eq!(
            parse_base_url("https://p.example/").unwrap().as_str(),
            "https://p.example/"
        );
    }
}

//! HTTP backend abstraction for the panel API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient GET errors.
//! POSTs to the file endpoints are single-shot: they are fire-and-accept
//! operations whose failure semantics belong to the orchestration layer.

use crate::config::PanelConfig;
use crate::error::{PanelHttpError, PanelHttpResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

/// The Accept header the Pterodactyl client API expects.
const PTERODACTYL_ACCEPT: &str = "Application/vnd.pterodactyl.v1+json";

/// Trait for HTTP backends that can talk to the panel.
///
/// This is an implementation detail - external code should use `PanelClient`
/// through the `PanelClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> PanelHttpResult<T>;

    /// POST a JSON body to a URL, expecting a 2xx acceptance with no
    /// meaningful response body.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> PanelHttpResult<()>;
}

/// Production HTTP backend using reqwest.
///
/// GETs retry transient server errors (5xx) and network errors with
/// exponential backoff; POSTs are attempted exactly once.
#[derive(Debug)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying TLS/client initialization fails, which only
    /// happens on broken system configurations.
    #[must_use]
    pub fn new(config: &PanelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: u64::try_from(config.retry_base_delay.as_millis())
                .unwrap_or(u64::MAX),
            api_key: config.api_key.clone(),
        }
    }

    /// Attach auth and the panel's Accept header.
    fn decorate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut request = request.header("Accept", PTERODACTYL_ACCEPT);
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        request
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> PanelHttpResult<reqwest::Response> {
        let mut last_error: Option<PanelHttpError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tokio::time::sleep(delay).await;
            }

            match self.decorate(self.client.get(url.as_str())).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(PanelHttpError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(PanelHttpError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| PanelHttpError::ApiRequestFailed {
            status: 0,
            url: url.to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> PanelHttpResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> PanelHttpResult<()> {
        let response = self
            .decorate(self.client.post(url.as_str()))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(PanelHttpError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

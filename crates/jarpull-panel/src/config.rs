//! Public configuration for the panel client.

use std::time::Duration;

/// Configuration for the panel client.
///
/// The bearer API key lives here; nothing outside this crate ever sees it.
///
/// # Example
///
/// ```
/// use jarpull_panel::PanelConfig;
/// use std::time::Duration;
///
/// let config = PanelConfig::new("https://console.exluhost.my.id")
///     .with_api_key("ptlc_...")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Base URL of the panel (scheme + host, no trailing API path).
    pub(crate) base_url: String,
    /// User agent string for HTTP requests.
    pub(crate) user_agent: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Bearer API key for the client API.
    pub(crate) api_key: Option<String>,
    /// Maximum number of retry attempts for transient GET errors.
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff.
    pub(crate) retry_base_delay: Duration,
}

impl PanelConfig {
    /// Create a configuration for the given panel base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: concat!("jarpull/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }

    /// Set the bearer API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional bearer API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient GET errors.
    ///
    /// Defaults to 3 retries. POST requests are never retried here.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

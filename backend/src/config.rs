//! Environment-driven configuration for the backend client

use crate::error::BackendError;

/// Connection settings for the Rifaqui backend
///
/// Built from the environment in production ([`BackendConfig::from_env`])
/// or explicitly in tests ([`BackendConfig::new`] pointed at a mock server).
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Base URL of the REST gateway, without a trailing slash
    pub api_url: String,
    /// API key, sent as both `apikey` and bearer token
    pub api_key: String,
    /// WebSocket URL for the realtime service
    pub realtime_url: String,
}

impl BackendConfig {
    /// Create a config with the realtime URL derived from the API URL
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_url = trim_trailing_slash(api_url.into());
        let realtime_url = derive_realtime_url(&api_url);
        Self {
            api_url,
            api_key: api_key.into(),
            realtime_url,
        }
    }

    /// Override the derived realtime URL
    #[must_use]
    pub fn with_realtime_url(mut self, realtime_url: impl Into<String>) -> Self {
        self.realtime_url = trim_trailing_slash(realtime_url.into());
        self
    }

    /// Build the config from environment variables
    ///
    /// - `RIFAQUI_API_URL` (required)
    /// - `RIFAQUI_API_KEY` (required)
    /// - `RIFAQUI_REALTIME_URL` (optional; derived from the API URL when unset)
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingEnv`] naming the first variable that
    /// is not set.
    pub fn from_env() -> Result<Self, BackendError> {
        let api_url = std::env::var("RIFAQUI_API_URL")
            .map_err(|_| BackendError::MissingEnv("RIFAQUI_API_URL"))?;
        let api_key = std::env::var("RIFAQUI_API_KEY")
            .map_err(|_| BackendError::MissingEnv("RIFAQUI_API_KEY"))?;

        let mut config = Self::new(api_url, api_key);
        if let Ok(realtime_url) = std::env::var("RIFAQUI_REALTIME_URL") {
            config = config.with_realtime_url(realtime_url);
        }
        Ok(config)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Derive the realtime WebSocket URL from the REST base URL
///
/// `https://x.example.com` becomes `wss://x.example.com/realtime/v1/websocket`.
fn derive_realtime_url(api_url: &str) -> String {
    let ws_base = if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        // Already a ws:// or wss:// URL, or a bare host; pass through
        api_url.to_string()
    };
    format!("{ws_base}/realtime/v1/websocket")
}

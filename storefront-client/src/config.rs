//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the storefront backend
///
/// # Environment variables
///
/// Every field can be set through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STOREFRONT_API_URL | http://localhost:8080/api | Backend base URL |
/// | STOREFRONT_API_KEY | (none) | X-API-Key header value |
/// | STOREFRONT_TIMEOUT_SECS | 30 | Request timeout in seconds |
/// | STOREFRONT_DATA_DIR | ./storefront-data | Guest cart / session directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// API key sent as the X-API-Key header
    pub api_key: Option<String>,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory where guest cart, checkout draft and session files live
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            token: None,
            timeout: 30,
            data_dir: PathBuf::from("./storefront-data"),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("STOREFRONT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".into()),
        );
        config.api_key = std::env::var("STOREFRONT_API_KEY").ok();
        config.timeout = std::env::var("STOREFRONT_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);
        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the local data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}

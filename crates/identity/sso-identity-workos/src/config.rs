//! WorkOS client configuration.

pub const DEFAULT_BASE_API_URL: &str = "https://api.workos.com";

/// Credentials and endpoint settings for the WorkOS API
#[derive(Debug, Clone)]
pub struct WorkOsConfig {
    pub api_key: String,
    pub client_id: String,
    pub base_api_url: String,
    pub http_timeout_seconds: u64,
}

impl WorkOsConfig {
    pub fn new(api_key: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
            base_api_url: DEFAULT_BASE_API_URL.to_string(),
            http_timeout_seconds: 30,
        }
    }

    /// Override the API host. Empty values keep the default.
    pub fn with_base_api_url(mut self, base_api_url: impl Into<String>) -> Self {
        let base_api_url = base_api_url.into();
        if !base_api_url.trim().is_empty() {
            self.base_api_url = base_api_url;
        }
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }
}

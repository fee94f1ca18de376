//! Application configuration.

use anyhow::{Context, Result};

/// SSO connection used for the SAML login button.
pub const CUSTOMER_CONNECTION_ID: &str = "conn_01KA0AJA6PH9WJ712ZT343351V";

/// Directory whose users and groups are listed.
pub const CUSTOMER_DIRECTORY_ID: &str = "directory_01KA0TMS6SBQT60XMRGFG9367V";

/// Page size for directory listings; only the first page is fetched.
pub const DIRECTORY_PAGE_LIMIT: u32 = 50;

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 5000;
pub const DEFAULT_WEBHOOK_TOLERANCE_SECONDS: u64 = 180;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_secret_key: String,
    pub workos_api_key: String,
    pub workos_client_id: String,
    pub workos_base_api_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub webhook_tolerance_seconds: u64,
    /// Externally visible base URL; defaults to `http://localhost:{server_port}`.
    pub public_base_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub connection_id: String,
    pub directory_id: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match non_empty("SERVER_PORT") {
            Some(port) => port
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            None => DEFAULT_SERVER_PORT,
        };

        let webhook_tolerance_seconds = match non_empty("WORKOS_WEBHOOK_TOLERANCE_SECONDS") {
            Some(seconds) => seconds
                .parse()
                .context("WORKOS_WEBHOOK_TOLERANCE_SECONDS must be a number of seconds")?,
            None => DEFAULT_WEBHOOK_TOLERANCE_SECONDS,
        };

        Ok(Self {
            app_secret_key: non_empty("APP_SECRET_KEY")
                .context("APP_SECRET_KEY environment variable is required")?,
            workos_api_key: non_empty("WORKOS_API_KEY")
                .context("WORKOS_API_KEY environment variable is required")?,
            workos_client_id: non_empty("WORKOS_CLIENT_ID")
                .context("WORKOS_CLIENT_ID environment variable is required")?,
            workos_base_api_url: non_empty("WORKOS_BASE_API_URL"),
            webhook_secret: non_empty("WORKOS_WEBHOOK_SECRET"),
            webhook_tolerance_seconds,
            public_base_url: non_empty("PUBLIC_BASE_URL"),
            server_host: non_empty("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            connection_id: CUSTOMER_CONNECTION_ID.to_string(),
            directory_id: CUSTOMER_DIRECTORY_ID.to_string(),
        })
    }

    pub fn public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.server_port),
        }
    }

    /// Absolute URL the provider redirects back to after login.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.public_base_url())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session cookies are only marked secure when served over https.
    pub fn secure_cookies(&self) -> bool {
        self.public_base_url().starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("APP_SECRET_KEY", "secret"),
        ("WORKOS_API_KEY", "sk_test"),
        ("WORKOS_CLIENT_ID", "client_1"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.server_port, 5000);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.callback_url(), "http://localhost:5000/auth/callback");
        assert_eq!(config.workos_base_api_url, None);
        assert_eq!(config.webhook_secret, None);
        assert_eq!(config.webhook_tolerance_seconds, 180);
        assert_eq!(config.connection_id, CUSTOMER_CONNECTION_ID);
        assert_eq!(config.directory_id, CUSTOMER_DIRECTORY_ID);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PUBLIC_BASE_URL", "https://sso.example.com/"));
        vars.push(("SERVER_PORT", "8080"));
        vars.push(("WORKOS_BASE_API_URL", "http://localhost:9999"));
        vars.push(("WORKOS_WEBHOOK_SECRET", "whsec"));

        let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.callback_url(), "https://sso.example.com/auth/callback");
        assert_eq!(config.server_port, 8080);
        assert_eq!(
            config.workos_base_api_url.as_deref(),
            Some("http://localhost:9999")
        );
        assert_eq!(config.webhook_secret.as_deref(), Some("whsec"));
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_default_base_url_follows_port() {
        let mut config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        config.server_port = 8080;
        assert_eq!(config.callback_url(), "http://localhost:8080/auth/callback");

        config.public_base_url = Some("https://sso.example.com".to_string());
        assert_eq!(config.callback_url(), "https://sso.example.com/auth/callback");
    }

    #[test]
    fn test_missing_required_variable() {
        let err = AppConfig::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(err.to_string().contains("WORKOS_CLIENT_ID"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SERVER_PORT", "not-a-port"));
        assert!(AppConfig::from_lookup(lookup_from(&vars)).is_err());
    }
}

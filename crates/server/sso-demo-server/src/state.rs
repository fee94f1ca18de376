//! Shared application state.

use crate::config::{AppConfig, DIRECTORY_PAGE_LIMIT};
use anyhow::{Context, Result};
use sso_identity_core::{DirectorySync, ListDirectoryOptions, SsoProvider};
use sso_identity_session::{SessionConfig, SessionStore};
use sso_identity_workos::{WorkOsClient, WorkOsConfig};
use std::sync::Arc;

/// Immutable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sso: Arc<dyn SsoProvider>,
    pub directory: Arc<dyn DirectorySync>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        sso: Arc<dyn SsoProvider>,
        directory: Arc<dyn DirectorySync>,
    ) -> Result<Self> {
        let session_config = SessionConfig::new(config.app_secret_key.clone())
            .with_secure_cookie(config.secure_cookies());
        let sessions =
            SessionStore::new(session_config).context("Failed to create session store")?;

        Ok(Self {
            config: Arc::new(config),
            sso,
            directory,
            sessions,
        })
    }

    /// State backed by a live WorkOS client for both SSO and directory sync.
    pub fn with_workos(config: AppConfig) -> Result<Self> {
        let mut workos_config =
            WorkOsConfig::new(config.workos_api_key.clone(), config.workos_client_id.clone());
        if let Some(base_api_url) = &config.workos_base_api_url {
            workos_config = workos_config.with_base_api_url(base_api_url.clone());
        }

        let client =
            Arc::new(WorkOsClient::new(workos_config).context("Failed to create WorkOS client")?);

        Self::new(config, client.clone(), client)
    }

    /// Listing parameters for the configured directory, `None` when unset.
    pub fn directory_options(&self) -> Option<ListDirectoryOptions> {
        let directory_id = self.config.directory_id.trim();
        if directory_id.is_empty() {
            return None;
        }
        Some(ListDirectoryOptions::new(directory_id, DIRECTORY_PAGE_LIMIT))
    }
}

use crate::config::AppConfig;
use crate::routes::create_router;
use crate::state::AppState;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the WorkOS SSO demo web application
#[derive(Parser, Debug, Clone)]
#[command(name = "sso-demo-server")]
#[command(about = "WorkOS SSO and Directory Sync demo web application")]
#[command(version)]
pub struct Args {
    /// Address to bind (overrides SERVER_HOST)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Environment file to load instead of ./.env
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

impl Args {
    /// Resolve the configuration: environment first, then CLI overrides.
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.env_file {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
            }
            None => {
                // A missing .env is fine, variables may come from the process environment
                let _ = dotenvy::dotenv();
            }
        }

        let mut config = AppConfig::from_env()?;
        if let Some(host) = &self.host {
            config.server_host = host.clone();
        }
        if let Some(port) = self.port {
            config.server_port = port;
        }
        Ok(config)
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let bind_addr = config.bind_addr();
        let callback_url = config.callback_url();

        if config.webhook_secret.is_none() {
            warn!("WORKOS_WEBHOOK_SECRET is not set, webhook signatures will not be verified");
        }

        let state = AppState::with_workos(config)?;
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", bind_addr))?;

        info!("Server running on http://{}", bind_addr);
        info!("SSO redirect URI: {}", callback_url);

        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}

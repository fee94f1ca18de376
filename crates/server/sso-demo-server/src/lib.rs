//! Web application for signing in through WorkOS SSO, listing directory-synced
//! users and groups, and logging WorkOS webhooks.

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;
pub mod webhook;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;

//! WorkOS client for SSO and Directory Sync.
//!
//! Implements the `sso-identity-core` traits over the WorkOS REST API:
//! authorization URL construction, code-for-profile exchange and first-page
//! listing of directory users and groups.

mod client;
mod config;
mod error;

#[cfg(test)]
mod tests;

pub use client::WorkOsClient;
pub use config::{DEFAULT_BASE_API_URL, WorkOsConfig};
pub use error::{WorkOsError, WorkOsResult};

// Re-export common types for convenience
pub use sso_identity_core::{DirectorySync, IdentityError, SsoProvider};

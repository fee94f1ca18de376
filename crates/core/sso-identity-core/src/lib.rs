//! Core identity provider traits and types.
//!
//! The traits here describe the two halves of the identity provider API the
//! application talks to: SSO (authorization URL + code exchange) and
//! directory sync (listing users and groups). Concrete clients live in
//! separate crates.

mod document;
mod types;

pub use document::{ToDocument, to_pretty_json};
pub use types::{
    AuthorizationRequest, AuthorizationTarget, DirectoryGroup, DirectoryUser, DirectoryUserEmail,
    ListDirectoryOptions, ListMetadata, ListResponse, Profile, ProfileAndToken,
};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider answered with a non-success status and an error message.
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl IdentityError {
    /// Message text of a provider API error, `None` for every other kind.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            IdentityError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Single Sign-On half of the provider API.
#[async_trait]
pub trait SsoProvider: Send + Sync {
    /// Build the URL the browser is sent to in order to start the SSO flow.
    ///
    /// This does not touch the network.
    fn authorization_url(&self, request: &AuthorizationRequest) -> IdentityResult<String>;

    /// Exchange an authorization code for the authenticated profile.
    async fn get_profile_and_token(&self, code: &str) -> IdentityResult<ProfileAndToken>;
}

/// Directory sync half of the provider API.
#[async_trait]
pub trait DirectorySync: Send + Sync {
    async fn list_users(
        &self,
        options: &ListDirectoryOptions,
    ) -> IdentityResult<ListResponse<DirectoryUser>>;

    async fn list_groups(
        &self,
        options: &ListDirectoryOptions,
    ) -> IdentityResult<ListResponse<DirectoryGroup>>;
}

//! WorkOS client error types.

use sso_identity_core::IdentityError;
use thiserror::Error;

pub type WorkOsResult<T> = Result<T, WorkOsError>;

#[derive(Debug, Error)]
pub enum WorkOsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("WorkOS API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<WorkOsError> for IdentityError {
    fn from(err: WorkOsError) -> Self {
        match err {
            WorkOsError::ApiError { status, message } => IdentityError::Api { status, message },
            WorkOsError::HttpError(e) => IdentityError::Transport(e.to_string()),
            WorkOsError::UrlError(e) => IdentityError::Configuration(e.to_string()),
            WorkOsError::InvalidResponse(msg) => IdentityError::InvalidResponse(msg),
        }
    }
}

//! Errors surfaced by route handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sso_identity_core::IdentityError;
use sso_identity_session::SessionError;
use thiserror::Error;
use tracing::error;

/// Failures on the SSO routes, answered with a 500.
///
/// Directory listing routes render their own error page instead and never
/// return this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

//! WorkOS webhook receiver.
//!
//! Events are only logged. Without a configured webhook secret the
//! `WorkOS-Signature` header is checked for presence and nothing more, so
//! payload contents must not be trusted in that mode.

use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{error, info, warn};

pub const SIGNATURE_HEADER: &str = "workos-signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Event {0} carries no data object")]
    MissingData(String),

    #[error("Malformed signature header")]
    MalformedSignature,

    #[error("Signature timestamp outside tolerance")]
    TimestampOutOfTolerance,

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("Invalid webhook secret")]
    InvalidSecret,
}

/// Inbound webhook body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    pub event: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    DirectoryUser,
    DirectoryGroup,
    Unhandled,
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        if self.event.starts_with("dsync.user.") {
            EventKind::DirectoryUser
        } else if self.event.starts_with("dsync.group.") {
            EventKind::DirectoryGroup
        } else {
            EventKind::Unhandled
        }
    }

    /// Id of the user or group the event is about.
    pub fn entity_id(&self) -> Result<Option<&str>, WebhookError> {
        let data = self
            .data
            .as_ref()
            .and_then(|d| d.as_object())
            .ok_or_else(|| WebhookError::MissingData(self.event.clone()))?;
        Ok(data.get("id").and_then(|id| id.as_str()))
    }
}

/// Parse and log one webhook body.
pub fn process_event(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    let event: WebhookEvent = serde_json::from_slice(payload)?;

    info!("--- Received Webhook Event: {} ---", event.event);

    match event.kind() {
        EventKind::DirectoryUser => {
            let user_id = event.entity_id()?;
            info!(
                "DSync User Event ({}): User ID {}",
                event.event,
                user_id.unwrap_or("None")
            );
        }
        EventKind::DirectoryGroup => {
            let group_id = event.entity_id()?;
            info!(
                "DSync Group Event ({}): Group ID {}",
                event.event,
                group_id.unwrap_or("None")
            );
        }
        EventKind::Unhandled => info!("Unhandled Event Type: {}", event.event),
    }

    Ok(event)
}

/// Hex HMAC-SHA256 over `{timestamp}.{body}`.
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSecret)?;

    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a `t=<millis>, v1=<hex>` signature header against the body.
pub fn verify_signature(
    header: &str,
    body: &[u8],
    secret: &str,
    tolerance_seconds: u64,
) -> Result<(), WebhookError> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value.trim()),
            Some(("v1", value)) => signature = Some(value.trim()),
            _ => {}
        }
    }

    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        return Err(WebhookError::MalformedSignature);
    };

    let issued_at: i64 = timestamp
        .parse()
        .map_err(|_| WebhookError::MalformedSignature)?;
    let age_millis = Utc::now().timestamp_millis().abs_diff(issued_at);
    if age_millis > tolerance_seconds.saturating_mul(1000) {
        return Err(WebhookError::TimestampOutOfTolerance);
    }

    let expected = compute_signature(secret, timestamp, body)?;
    if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        Ok(())
    } else {
        Err(WebhookError::SignatureMismatch)
    }
}

/// Handler for `POST /webhooks/workos`
pub async fn workos_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .filter(|value| !value.is_empty())
    else {
        warn!("Webhook received without signature. Ignoring payload.");
        return (StatusCode::OK, "Success (No Signature)").into_response();
    };

    if let Some(secret) = &state.config.webhook_secret {
        let verified = signature
            .to_str()
            .map_err(|_| WebhookError::MalformedSignature)
            .and_then(|signature| {
                verify_signature(
                    signature,
                    &body,
                    secret,
                    state.config.webhook_tolerance_seconds,
                )
            });
        if let Err(e) = verified {
            warn!("Rejecting webhook: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid Signature").into_response();
        }
    }

    match process_event(&body) {
        Ok(_) => (StatusCode::OK, "Success").into_response(),
        Err(e) => {
            error!("An unexpected error occurred during webhook processing: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error").into_response()
        }
    }
}

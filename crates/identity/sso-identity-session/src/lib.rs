//! Cookie-backed session storage with JWT signing.
//!
//! The whole session lives in the browser: a single cookie carries an
//! HS256-signed token whose claims are the session fields. Nothing is kept
//! on the server, so sessions survive restarts as long as the secret does.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sso_identity_core::{Profile, ToDocument};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_COOKIE_NAME: &str = "session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),
}

/// Identity attributes kept for one browser.
///
/// Either all three fields are set by a successful login or the session is
/// treated as anonymous; see [`Session::is_authenticated`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_profile: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Session {
    /// Build an authenticated session from a provider profile.
    ///
    /// The profile is stored as a detached document, not as the typed value.
    pub fn from_profile(profile: &Profile) -> Result<Self, SessionError> {
        Ok(Self {
            first_name: profile.first_name.clone(),
            raw_profile: Some(profile.to_document()?),
            session_id: Some(profile.id.clone()),
        })
    }

    /// Drop every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.raw_profile.is_none() && self.session_id.is_none()
    }

    /// True when both the first name and the raw profile carry a value.
    pub fn is_authenticated(&self) -> bool {
        let has_name = self.first_name.as_deref().is_some_and(|n| !n.is_empty());
        let has_profile = self.raw_profile.as_ref().is_some_and(|p| !is_blank(p));
        has_name && has_profile
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub session: Session,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub ttl: Duration,
    pub secure_cookie: bool,
    pub algorithm: Algorithm,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl: Duration::days(31),
            secure_cookie: false,
            algorithm: Algorithm::HS256,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.secure_cookie = secure;
        self
    }
}

/// Reads and writes [`Session`]s through a signed cookie
#[derive(Clone)]
pub struct SessionStore {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.secret.is_empty() {
            return Err(SessionError::InvalidConfig(
                "session secret must not be empty".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            iat: now.timestamp(),
            exp: (now + self.config.ttl).timestamp(),
            session: session.clone(),
        };

        Ok(encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn decode(&self, token: &str) -> Result<Session, SessionError> {
        let token_data = decode::<SessionClaims>(
            token,
            &self.decoding_key,
            &Validation::new(self.config.algorithm),
        )?;

        Ok(token_data.claims.session)
    }

    /// Session carried by the request cookies.
    ///
    /// A missing, tampered or expired cookie yields an empty session.
    pub fn load(&self, jar: &CookieJar) -> Session {
        let Some(cookie) = jar.get(&self.config.cookie_name) else {
            return Session::default();
        };

        match self.decode(cookie.value()) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable session cookie: {}", e);
                Session::default()
            }
        }
    }

    /// Write `session` into the response cookies, replacing any previous one.
    pub fn save(&self, jar: CookieJar, session: &Session) -> Result<CookieJar, SessionError> {
        let token = self.encode(session)?;

        let cookie = Cookie::build((self.config.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure_cookie)
            .build();

        debug!("Writing session cookie (empty: {})", session.is_empty());
        Ok(jar.add(cookie))
    }
}

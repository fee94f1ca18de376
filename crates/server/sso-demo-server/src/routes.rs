//! Route handlers for login, SSO callback, logout and directory listings.

use crate::error::AppError;
use crate::state::AppState;
use crate::views;
use crate::webhook;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use sso_identity_core::{AuthorizationRequest, AuthorizationTarget, IdentityError};
use sso_identity_session::Session;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const DIRECTORY_NOT_CONFIGURED: &str = "CUSTOMER_DIRECTORY_ID is not configured.";

/// Login methods offered by the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    Saml,
    GoogleOAuth,
    MicrosoftOAuth,
}

impl LoginMethod {
    /// Parse the `login_method` form value. Anything else is rejected.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "saml" => Some(Self::Saml),
            "GoogleOAuth" => Some(Self::GoogleOAuth),
            "MicrosoftOAuth" => Some(Self::MicrosoftOAuth),
            _ => None,
        }
    }

    pub fn target(self, connection_id: &str) -> AuthorizationTarget {
        match self {
            Self::Saml => AuthorizationTarget::Connection(connection_id.to_string()),
            Self::GoogleOAuth => AuthorizationTarget::Provider("GoogleOAuth".to_string()),
            Self::MicrosoftOAuth => AuthorizationTarget::Provider("MicrosoftOAuth".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthForm {
    login_method: Option<String>,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/auth", post(auth))
        .route("/auth/callback", get(auth_callback))
        .route("/logout", get(logout))
        .route("/users", get(list_users))
        .route("/groups", get(list_groups))
        .route("/webhooks/workos", post(webhook::workos_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `302 Found` redirect.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

async fn index(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let session = state.sessions.load(&jar);

    if !session.is_authenticated() {
        return views::render_login();
    }

    let (Some(first_name), Some(raw_profile)) = (&session.first_name, &session.raw_profile) else {
        return views::render_login();
    };

    match views::render_login_successful(first_name, raw_profile) {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to render profile page: {}", e);
            views::render_login()
        }
    }
}

async fn auth(
    State(state): State<AppState>,
    form: Result<Form<AuthForm>, FormRejection>,
) -> Result<Response, AppError> {
    let method = form
        .ok()
        .and_then(|Form(form)| form.login_method)
        .and_then(|selector| LoginMethod::from_selector(&selector));

    let Some(method) = method else {
        return Ok(found("/"));
    };

    let request = AuthorizationRequest::new(
        state.config.callback_url(),
        method.target(&state.config.connection_id),
    );
    let authorization_url = state.sso.authorization_url(&request)?;

    info!("Starting SSO flow with {:?}", method);
    Ok(found(&authorization_url))
}

async fn auth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    // First value wins when `code` is repeated
    let code = params
        .into_iter()
        .find(|(name, _)| name == "code")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty());

    let Some(code) = code else {
        return Ok(found("/"));
    };

    let profile_and_token = state.sso.get_profile_and_token(&code).await?;
    let session = Session::from_profile(&profile_and_token.profile)?;
    let jar = state.sessions.save(jar, &session)?;

    info!("Signed in profile {}", profile_and_token.profile.id);
    Ok((jar, found("/")).into_response())
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let mut session = state.sessions.load(&jar);
    session.clear();
    session.raw_profile = Some(serde_json::Value::String(String::new()));

    let jar = state.sessions.save(jar, &session)?;
    Ok((jar, found("/")).into_response())
}

/// Error page text for a failed listing call.
fn listing_error_message(kind: &str, err: &IdentityError) -> String {
    match err.api_message() {
        Some(message) => {
            error!("WorkOS API Error listing DSync {}: {}", kind, message);
            format!("WorkOS API Error: {}", message)
        }
        None => {
            error!("Unexpected error listing DSync {}: {}", kind, err);
            format!("Error retrieving {}: {}", kind, err)
        }
    }
}

async fn list_users(State(state): State<AppState>) -> Html<String> {
    let Some(options) = state.directory_options() else {
        return views::render_dsync_error(DIRECTORY_NOT_CONFIGURED);
    };

    let page = match state.directory.list_users(&options).await {
        Ok(page) => page,
        Err(e) => return views::render_dsync_error(&listing_error_message("users", &e)),
    };

    views::render_users(&page.data, &options.directory).unwrap_or_else(|e| {
        error!("Unexpected error listing DSync users: {}", e);
        views::render_dsync_error(&format!("Error retrieving users: {}", e))
    })
}

async fn list_groups(State(state): State<AppState>) -> Html<String> {
    let Some(options) = state.directory_options() else {
        return views::render_dsync_error(DIRECTORY_NOT_CONFIGURED);
    };

    let page = match state.directory.list_groups(&options).await {
        Ok(page) => page,
        Err(e) => return views::render_dsync_error(&listing_error_message("groups", &e)),
    };

    views::render_groups(&page.data, &options.directory).unwrap_or_else(|e| {
        error!("Unexpected error listing DSync groups: {}", e);
        views::render_dsync_error(&format!("Error retrieving groups: {}", e))
    })
}

//! Provider record types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an authorization request should send the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationTarget {
    /// A specific, pre-configured SSO connection (used for SAML).
    Connection(String),
    /// A federated social provider such as `GoogleOAuth`.
    Provider(String),
}

/// Request to initiate the SSO authorization flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub redirect_uri: String,
    pub target: AuthorizationTarget,
    pub state: Option<String>,
}

impl AuthorizationRequest {
    pub fn new(redirect_uri: impl Into<String>, target: AuthorizationTarget) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            target,
            state: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// Authenticated identity returned after a successful SSO exchange.
///
/// Fields the provider adds beyond the ones modelled here are kept in
/// `additional_claims`, so re-serializing a profile loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub connection_id: Option<String>,
    #[serde(default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub idp_id: Option<String>,
    #[serde(default)]
    pub role: Option<serde_json::Value>,
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    #[serde(default)]
    pub raw_attributes: Option<serde_json::Value>,
    #[serde(default)]
    pub custom_attributes: Option<serde_json::Value>,
    #[serde(flatten)]
    pub additional_claims: HashMap<String, serde_json::Value>,
}

/// Result of exchanging an authorization code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAndToken {
    pub access_token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUserEmail {
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// A user mirrored from an external directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub idp_id: Option<String>,
    #[serde(default)]
    pub directory_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub emails: Vec<DirectoryUserEmail>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub custom_attributes: Option<serde_json::Value>,
    #[serde(default)]
    pub raw_attributes: Option<serde_json::Value>,
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

impl DirectoryUser {
    /// Primary email, falling back to the first listed one.
    pub fn primary_email(&self) -> Option<&str> {
        if let Some(email) = self.email.as_deref() {
            return Some(email);
        }
        self.emails
            .iter()
            .find(|e| e.primary == Some(true))
            .or_else(|| self.emails.first())
            .and_then(|e| e.value.as_deref())
    }
}

/// A group mirrored from an external directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    pub id: String,
    #[serde(default)]
    pub idp_id: Option<String>,
    #[serde(default)]
    pub directory_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub raw_attributes: Option<serde_json::Value>,
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

/// Pagination cursors of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetadata {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

/// One page of a provider list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub list_metadata: ListMetadata,
}

/// Parameters for listing directory users or groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDirectoryOptions {
    pub directory: String,
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ListDirectoryOptions {
    pub fn new(directory: impl Into<String>, limit: u32) -> Self {
        Self {
            directory: directory.into(),
            limit,
            before: None,
            after: None,
        }
    }
}

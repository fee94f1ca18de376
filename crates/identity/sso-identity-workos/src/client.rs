//! WorkOS HTTP client.

use crate::config::WorkOsConfig;
use crate::error::{WorkOsError, WorkOsResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sso_identity_core::{
    AuthorizationRequest, AuthorizationTarget, DirectoryGroup, DirectorySync, DirectoryUser,
    IdentityResult, ListDirectoryOptions, ListResponse, ProfileAndToken, SsoProvider,
};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Error body returned by the WorkOS API
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Client for the WorkOS SSO and Directory Sync endpoints
#[derive(Clone)]
pub struct WorkOsClient {
    http_client: Client,
    config: WorkOsConfig,
}

impl WorkOsClient {
    pub fn new(config: WorkOsConfig) -> WorkOsResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &WorkOsConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> WorkOsResult<Url> {
        let base = self.config.base_api_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// Generate the SSO authorization URL for a connection or social provider
    pub fn generate_authorization_url(&self, request: &AuthorizationRequest) -> WorkOsResult<Url> {
        let mut url = self.endpoint("sso/authorize")?;

        let mut params = url.query_pairs_mut();
        params.append_pair("client_id", &self.config.client_id);
        params.append_pair("redirect_uri", &request.redirect_uri);
        params.append_pair("response_type", "code");

        match &request.target {
            AuthorizationTarget::Connection(connection_id) => {
                params.append_pair("connection", connection_id);
            }
            AuthorizationTarget::Provider(provider) => {
                params.append_pair("provider", provider);
            }
        }

        if let Some(state) = &request.state {
            params.append_pair("state", state);
        }

        drop(params);

        debug!("Generated authorization URL for {:?}", request.target);
        Ok(url)
    }

    /// Exchange an authorization code for a profile and access token
    pub async fn exchange_code(&self, code: &str) -> WorkOsResult<ProfileAndToken> {
        let url = self.endpoint("sso/token")?;

        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.api_key.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
        ];

        let response = self.http_client.post(url).form(&params).send().await?;
        let profile_and_token: ProfileAndToken = Self::parse_response(response).await?;

        info!(
            "Successfully exchanged code for profile {}",
            profile_and_token.profile.id
        );
        Ok(profile_and_token)
    }

    /// Fetch a single page from a directory sync list endpoint
    async fn list_directory<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &ListDirectoryOptions,
    ) -> WorkOsResult<ListResponse<T>> {
        let url = self.endpoint(path)?;

        let mut query = vec![
            ("directory", options.directory.clone()),
            ("limit", options.limit.to_string()),
        ];
        if let Some(before) = &options.before {
            query.push(("before", before.clone()));
        }
        if let Some(after) = &options.after {
            query.push(("after", after.clone()));
        }

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.config.api_key)
            .query(&query)
            .send()
            .await?;

        let page: ListResponse<T> = Self::parse_response(response).await?;
        debug!(
            "Listed {} records from {} for directory {}",
            page.data.len(),
            path,
            options.directory
        );
        Ok(page)
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> WorkOsResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body
                .message
                .or(body.error_description)
                .or(body.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    if text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string()
                    } else {
                        text
                    }
                });

            error!("WorkOS request failed with {}: {}", status, message);
            return Err(WorkOsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WorkOsError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl SsoProvider for WorkOsClient {
    fn authorization_url(&self, request: &AuthorizationRequest) -> IdentityResult<String> {
        Ok(self.generate_authorization_url(request)?.to_string())
    }

    async fn get_profile_and_token(&self, code: &str) -> IdentityResult<ProfileAndToken> {
        Ok(self.exchange_code(code).await?)
    }
}

#[async_trait]
impl DirectorySync for WorkOsClient {
    async fn list_users(
        &self,
        options: &ListDirectoryOptions,
    ) -> IdentityResult<ListResponse<DirectoryUser>> {
        Ok(self.list_directory("directory_users", options).await?)
    }

    async fn list_groups(
        &self,
        options: &ListDirectoryOptions,
    ) -> IdentityResult<ListResponse<DirectoryGroup>> {
        Ok(self.list_directory("directory_groups", options).await?)
    }
}

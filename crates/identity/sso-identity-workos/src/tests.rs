//! Integration tests against a mocked WorkOS API.

#[cfg(test)]
mod integration_tests {
    use crate::{WorkOsClient, WorkOsConfig};
    use sso_identity_core::{DirectorySync, IdentityError, ListDirectoryOptions, SsoProvider};
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_workos() -> (MockServer, WorkOsClient) {
        let mock_server = MockServer::start().await;
        let config =
            WorkOsConfig::new("sk_test_key", "client_123").with_base_api_url(mock_server.uri());
        let client = WorkOsClient::new(config).unwrap();
        (mock_server, client)
    }

    #[tokio::test]
    async fn test_code_exchange() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("POST"))
            .and(path("/sso/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=auth_code_1"))
            .and(body_string_contains("client_secret=sk_test_key"))
            .and(body_string_contains("client_id=client_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access_1",
                "profile": {
                    "object": "profile",
                    "id": "prof_1",
                    "connection_id": "conn_1",
                    "connection_type": "GoogleOAuth",
                    "email": "ann@example.com",
                    "first_name": "Ann",
                    "last_name": "Lee",
                    "idp_id": "google_1",
                    "raw_attributes": {"locale": "en"}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client.get_profile_and_token("auth_code_1").await.unwrap();
        assert_eq!(result.access_token, "access_1");
        assert_eq!(result.profile.id, "prof_1");
        assert_eq!(result.profile.first_name.as_deref(), Some("Ann"));
        assert_eq!(result.profile.email.as_deref(), Some("ann@example.com"));
        assert_eq!(
            result.profile.additional_claims.get("object").unwrap(),
            "profile"
        );
    }

    #[tokio::test]
    async fn test_code_exchange_api_error() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("POST"))
            .and(path("/sso/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "The code 'bad' has expired or is invalid."
            })))
            .mount(&mock_server)
            .await;

        let err = client.get_profile_and_token("bad").await.unwrap_err();
        match err {
            IdentityError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The code 'bad' has expired or is invalid.");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_users() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("GET"))
            .and(path("/directory_users"))
            .and(query_param("directory", "directory_1"))
            .and(query_param("limit", "50"))
            .and(header("Authorization", "Bearer sk_test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [
                    {
                        "object": "directory_user",
                        "id": "directory_user_1",
                        "directory_id": "directory_1",
                        "first_name": "Ann",
                        "last_name": "Lee",
                        "emails": [{"primary": true, "type": "work", "value": "ann@example.com"}],
                        "state": "active"
                    },
                    {
                        "object": "directory_user",
                        "id": "directory_user_2",
                        "directory_id": "directory_1",
                        "first_name": "Bo",
                        "state": "inactive"
                    }
                ],
                "list_metadata": {"before": null, "after": "directory_user_2"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client
            .list_users(&ListDirectoryOptions::new("directory_1", 50))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].primary_email(), Some("ann@example.com"));
        assert_eq!(page.data[1].state.as_deref(), Some("inactive"));
        assert_eq!(
            page.list_metadata.after.as_deref(),
            Some("directory_user_2")
        );
    }

    #[tokio::test]
    async fn test_list_groups() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("GET"))
            .and(path("/directory_groups"))
            .and(query_param("directory", "directory_1"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "directory_group_1", "name": "Engineering"}],
                "list_metadata": {}
            })))
            .mount(&mock_server)
            .await;

        let page = client
            .list_groups(&ListDirectoryOptions::new("directory_1", 50))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name.as_deref(), Some("Engineering"));
    }

    #[tokio::test]
    async fn test_list_api_error_message() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("GET"))
            .and(path("/directory_users"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Directory not found: 'directory_1'.",
                "code": "entity_not_found"
            })))
            .mount(&mock_server)
            .await;

        let err = client
            .list_users(&ListDirectoryOptions::new("directory_1", 50))
            .await
            .unwrap_err();

        assert_eq!(err.api_message(), Some("Directory not found: 'directory_1'."));
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_not_an_api_error() {
        let (mock_server, client) = setup_mock_workos().await;

        Mock::given(method("GET"))
            .and(path("/directory_groups"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client
            .list_groups(&ListDirectoryOptions::new("directory_1", 50))
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::InvalidResponse(_)));
        assert_eq!(err.api_message(), None);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = WorkOsConfig::new("sk_test_key", "client_123")
            .with_base_api_url("http://127.0.0.1:1")
            .with_http_timeout(2);
        let client = WorkOsClient::new(config).unwrap();

        let err = client.get_profile_and_token("code").await.unwrap_err();
        assert!(matches!(err, IdentityError::Transport(_)));
    }
}

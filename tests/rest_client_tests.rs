//! Integration tests for the REST API client functionality.
//!
//! These tests verify the REST client construction, path normalization,
//! error handling, and API method behavior.

use activecampaign::clients::rest::{RestClient, RestError};
use activecampaign::clients::{HttpError, HttpResponseError};
use activecampaign::{ActiveCampaignConfig, ApiToken, ApiUrl, ApiVersion};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(url: &str) -> ActiveCampaignConfig {
    ActiveCampaignConfig::builder()
        .api_url(ApiUrl::new(url).unwrap())
        .api_token(ApiToken::new("test-token").unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// RestClient Construction Tests
// ============================================================================

#[test]
fn test_rest_client_creates_with_default_version() {
    let client = RestClient::new(&create_test_config("https://acme.api-us1.com")).unwrap();

    assert_eq!(client.http_client().base_path(), "/api/3");
}

#[test]
fn test_rest_client_with_custom_version() {
    let config = ActiveCampaignConfig::builder()
        .api_url(ApiUrl::new("https://acme.api-us1.com").unwrap())
        .api_token(ApiToken::new("test-token").unwrap())
        .api_version(ApiVersion::Custom("4".to_string()))
        .build()
        .unwrap();

    let client = RestClient::new(&config).unwrap();

    assert_eq!(client.http_client().base_path(), "/api/4");
}

#[test]
fn test_rest_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
}

// ============================================================================
// Error Type Tests
// ============================================================================

#[test]
fn test_rest_error_invalid_path_message() {
    let error = RestError::InvalidPath {
        path: String::new(),
    };

    assert!(error.to_string().contains("Invalid REST API path"));
}

#[test]
fn test_rest_error_wraps_http_errors() {
    let http_error = HttpError::Response(HttpResponseError {
        code: 404,
        message: r#"{"message":"Not Found"}"#.to_string(),
        error_reference: Some("abc-123".to_string()),
    });

    let rest_error = RestError::Http(http_error);

    assert!(rest_error.to_string().contains("Not Found"));
    assert_eq!(rest_error.status(), Some(404));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_paths_are_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3/contacts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contact": {"id": "12"}})))
        .expect(2)
        .mount(&server)
        .await;

    let client = RestClient::new(&create_test_config(&server.uri())).unwrap();

    client.get("/contacts/12/", None).await.unwrap();
    client.get("contacts/12", None).await.unwrap();
}

#[tokio::test]
async fn test_empty_path_is_rejected_without_request() {
    let server = MockServer::start().await;
    let client = RestClient::new(&create_test_config(&server.uri())).unwrap();

    let error = client.get("//", None).await.unwrap_err();

    assert!(matches!(error, RestError::InvalidPath { ref path } if path == "//"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_sends_query_and_put_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3/lists"))
        .and(query_param("filters[name]", "Newsletter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lists": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/3/contacts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contact": {"id": "12"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(&create_test_config(&server.uri())).unwrap();

    let mut query = HashMap::new();
    query.insert("filters[name]".to_string(), "Newsletter".to_string());
    client.get("lists", Some(query)).await.unwrap();

    client
        .put("contacts/12", json!({"contact": {"firstName": "Jane"}}), None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.url.path() == "/api/3/contacts/12")
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(sent, json!({"contact": {"firstName": "Jane"}}));
}

#[tokio::test]
async fn test_error_status_is_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/3/lists/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let client = RestClient::new(&create_test_config(&server.uri())).unwrap();

    let error = client.delete("lists/7", None).await.unwrap_err();

    assert_eq!(error.status(), Some(404));
}

// ============================================================================
// Type Export Tests
// ============================================================================

#[test]
fn test_types_exported_at_crate_root() {
    let _: fn(activecampaign::RestClient) = |_| {};
    let _: fn(activecampaign::RestError) = |_| {};
}

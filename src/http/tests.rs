//! Tests for the HTTP module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::pagination::{Page, PageSource, Paging};
use serde::Deserialize;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Activity {
    id: u64,
    name: String,
}

async fn client_for(server: &MockServer) -> Arc<HttpClient> {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.user_agent.starts_with("virtual-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("per_page", "10")
        .query("page", "2");

    assert_eq!(config.query.len(), 2);
    assert_eq!(config.query.get("page"), Some(&"2".to_string()));
    assert_eq!(config.query.get("per_page"), Some(&"10".to_string()));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let data: serde_json::Value = client
        .get_json_with_config("/api/data", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_default_and_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("X-Custom", "yes"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Custom", "yes")
        .build();
    let client = HttpClient::with_auth(config, AuthConfig::bearer("t0ken")).unwrap();
    assert!(client.has_authenticator());

    let response = client
        .request(Method::GET, "/api/secure", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .request(Method::GET, "/api/missing", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Not found");
}

#[tokio::test]
async fn test_http_client_does_not_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .request(Method::GET, "/api/flaky", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("https://ignored.example.com")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let response = client
        .request(
            Method::GET,
            &format!("{}/absolute", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

// ============================================================================
// HttpPageSource Tests
// ============================================================================

#[tokio::test]
async fn test_page_source_sends_page_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "2"))
        .and(query_param("before", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 5, "name": "Morning Ride"},
            {"id": 6, "name": "Evening Run"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source: HttpPageSource<Activity> =
        HttpPageSource::new(client_for(&mock_server).await, "/athlete/activities")
            .with_query("before", "1700000000");

    // Trim counts are never sent to the backend
    let paging = Paging::new(3, 2).with_ignore_first_n(1);
    let page = source.fetch_page(&paging).await.unwrap();

    assert_eq!(
        page,
        Page::Found(vec![
            Activity {
                id: 5,
                name: "Morning Ride".to_string()
            },
            Activity {
                id: 6,
                name: "Evening Run".to_string()
            },
        ])
    );
}

#[tokio::test]
async fn test_page_source_custom_params_and_records_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clubs/1/members"))
        .and(query_param("p", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 1, "name": "Ann"}]
        })))
        .mount(&mock_server)
        .await;

    let source: HttpPageSource<Activity> =
        HttpPageSource::new(client_for(&mock_server).await, "/clubs/1/members")
            .with_page_param("p")
            .with_page_size_param("limit")
            .with_records_path("data");

    let page = source.fetch_page(&Paging::new(1, 10)).await.unwrap();
    assert!(matches!(page, Page::Found(ref items) if items.len() == 1));
}

#[tokio::test]
async fn test_page_source_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clubs/999/members"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Record Not Found"
        })))
        .mount(&mock_server)
        .await;

    let source: HttpPageSource<Activity> =
        HttpPageSource::new(client_for(&mock_server).await, "/clubs/999/members");

    let page = source.fetch_page(&Paging::new(1, 10)).await.unwrap();
    assert!(page.is_not_found());
}

#[tokio::test]
async fn test_page_source_propagates_other_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authorization Error"))
        .mount(&mock_server)
        .await;

    let source: HttpPageSource<Activity> =
        HttpPageSource::new(client_for(&mock_server).await, "/athlete/activities");

    let err = source.fetch_page(&Paging::new(1, 10)).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_page_source_rejects_malformed_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "not-a-number", "name": "x"}
        ])))
        .mount(&mock_server)
        .await;

    let source: HttpPageSource<Activity> =
        HttpPageSource::new(client_for(&mock_server).await, "/athlete/activities");

    let err = source.fetch_page(&Paging::new(1, 10)).await.unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// ClientRegistry Tests
// ============================================================================

#[test]
fn test_registry_caches_per_token() {
    let registry = ClientRegistry::new(HttpClientConfig::default());
    assert!(registry.is_empty().unwrap());

    let a1 = registry.client_for("token-a").unwrap();
    let a2 = registry.client_for("token-a").unwrap();
    let b = registry.client_for("token-b").unwrap();

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b));
    assert!(a1.has_authenticator());
    assert_eq!(registry.len().unwrap(), 2);
}

#[test]
fn test_registry_evict_and_clear() {
    let registry = ClientRegistry::new(HttpClientConfig::default());
    let first = registry.client_for("token").unwrap();

    assert!(registry.evict("token").unwrap());
    assert!(!registry.evict("token").unwrap());

    let second = registry.client_for("token").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    registry.clear().unwrap();
    assert!(registry.is_empty().unwrap());
}

#[test]
fn test_registry_rejects_empty_token() {
    let registry = ClientRegistry::new(HttpClientConfig::default());
    assert!(registry.client_for("").unwrap_err().is_invalid_argument());
}

#[test]
fn test_registries_are_independent() {
    let one = ClientRegistry::new(HttpClientConfig::default());
    let two = ClientRegistry::new(HttpClientConfig::default());

    one.client_for("token").unwrap();
    assert_eq!(one.len().unwrap(), 1);
    assert!(two.is_empty().unwrap());
}

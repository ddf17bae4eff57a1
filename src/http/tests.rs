//! Tests for the HTTP client module

use super::*;
use crate::config::HttpSettings;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(max_retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .max_retries(max_retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

fn authed_client() -> HttpClient {
    let config = HttpClientConfig::builder()
        .header("X-App-Key", "secret123")
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_from_settings() {
    let settings = HttpSettings {
        timeout_secs: 15,
        max_retries: 7,
        requests_per_second: 2,
    };
    let config = HttpClientConfig::from_settings(&settings);

    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.max_retries, 7);
    assert_eq!(config.rate_limit.unwrap().requests_per_second, 2);
    assert!(config.default_headers.is_empty());
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("by_campaign", "true")
        .query("by_ad", "false")
        .json(json!({"key": "value"}))
        .timeout(Duration::from_secs(10))
        .without_default_headers()
        .no_retry();

    assert_eq!(
        config.query,
        vec![
            ("by_campaign".to_string(), "true".to_string()),
            ("by_ad".to_string(), "false".to_string())
        ]
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert!(config.skip_default_headers);
    assert_eq!(config.max_retries, Some(0));
}

#[tokio::test]
async fn test_post_json_sends_body_and_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/snapshots"))
        .and(header("X-App-Key", "secret123"))
        .and(body_json(json!({"destination_format": "csv"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 123})))
        .expect(1)
        .mount(&server)
        .await;

    let created: serde_json::Value = authed_client()
        .post_json_with_config(
            &format!("{}/api/snapshots", server.uri()),
            RequestConfig::new().json(json!({"destination_format": "csv"})),
        )
        .await
        .unwrap();

    assert_eq!(created["id"], 123);
}

#[tokio::test]
async fn test_query_params_sent_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/campaign_stats"))
        .and(query_param("by_campaign", "true"))
        .and(query_param("by_ad", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaign_stats": []})))
        .mount(&server)
        .await;

    let body: serde_json::Value = fast_client(0)
        .get_json_with_config(
            &format!("{}/api/campaign_stats", server.uri()),
            RequestConfig::new()
                .query("by_campaign", "true")
                .query("by_ad", "false"),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"campaign_stats": []}));
}

#[tokio::test]
async fn test_without_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download.csv"))
        .and(header("X-App-Key", "secret123"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/download.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n"))
        .mount(&server)
        .await;

    let response = authed_client()
        .get_with_config(
            &format!("{}/download.csv", server.uri()),
            RequestConfig::new().without_default_headers(),
        )
        .await
        .unwrap();

    assert_eq!(response.text().await.unwrap(), "a,b\n");
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(3)
        .get_with_config(&format!("{}/api/missing", server.uri()), RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, ref body } if body == "Not found"));
    assert!(err.is_request_failure());
}

#[tokio::test]
async fn test_retry_on_500() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .with_priority(2)
        .mount(&server)
        .await;

    let body: serde_json::Value = fast_client(3)
        .get_json(&format!("{}/api/flaky", server.uri()))
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("Rate limited"),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .with_priority(2)
        .mount(&server)
        .await;

    let body: serde_json::Value = fast_client(1)
        .get_json(&format!("{}/api/limited", server.uri()))
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_max_retries_exceeded_keeps_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/always-fail"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Server error"))
        .expect(3)
        .mount(&server)
        .await;

    let err = fast_client(2)
        .get_with_config(&format!("{}/api/always-fail", server.uri()), RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::MaxRetriesExceeded { max_retries, last } => {
            assert_eq!(max_retries, 2);
            assert!(matches!(*last, Error::HttpStatus { status: 503, .. }));
        }
        other => panic!("expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_retries_returns_first_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(0)
        .get_with_config(&format!("{}/api/down", server.uri()), RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
}

#[tokio::test]
async fn test_no_retry_overrides_client_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(3)
        .post_json_with_config::<serde_json::Value>(
            &format!("{}/api/jobs", server.uri()),
            RequestConfig::new().json(json!({})).no_retry(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = fast_client(0)
        .get_json::<serde_json::Value>(&format!("{}/api/html", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_relative_url_rejected() {
    let err = fast_client(3)
        .get_json::<serde_json::Value>("/api/data")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_with_rate_limiter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        let _: serde_json::Value = client
            .get_json(&format!("{}/api/data", server.uri()))
            .await
            .unwrap();
    }
}

#[test]
fn test_debug_hides_headers() {
    let config = HttpClientConfig::builder()
        .header("X-User-Key", "top-secret")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let debug_str = format!("{client:?}");

    assert!(debug_str.contains("HttpClient"));
    assert!(!debug_str.contains("top-secret"));
}

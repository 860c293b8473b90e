//! Tests for HTTP module functionality and response header helpers.

use rangefetch::http::{create_http_client, HttpClientConfig, CONNECT_TIMEOUT, READ_TIMEOUT};
use rangefetch::utils::{body_length, content_range, ContentRange};
use std::time::Duration;

use wiremock::matchers::{header, method};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_default_config() {
    let config = HttpClientConfig::default();
    assert!(config.proxy.is_none());
    assert!(create_http_client(config).is_ok());
}

#[test]
fn test_client_error_converts() {
    fn build() -> rangefetch::Result<()> {
        create_http_client(HttpClientConfig::default())?;
        Ok(())
    }
    assert!(build().is_ok());
}

#[test]
fn test_fixed_timeouts() {
    assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(15));
    assert_eq!(READ_TIMEOUT, Duration::from_secs(15));
}

#[tokio::test]
async fn test_client_sends_request() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let res = client
        .get(test_file_url(&server))
        .header("user-agent", TEST_USER_AGENT)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(body_length(&res), Some(5));
    assert_eq!(content_range(&res), None);
}

#[tokio::test]
async fn test_partial_response_headers() {
    let server = start_mock_server().await;
    Mock::given(header("range", "bytes=10-19"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("content-range", "bytes 10-19/4096")
                .set_body_bytes(create_test_content(10)),
        )
        .mount(&server)
        .await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let res = client
        .get(test_file_url(&server))
        .header("range", "bytes=10-19")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 206);
    assert_eq!(body_length(&res), Some(10));
    assert_eq!(
        content_range(&res),
        Some(ContentRange {
            start: 10,
            end: 19,
            total: Some(4096),
        })
    );
}

//! Integration tests for the transport retry policy and status mapping.

use std::time::Duration;

use forgeapi::{ForgeClient, ForgeError, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry_client(server: &MockServer) -> ForgeClient {
    ForgeClient::builder()
        .base_url(server.uri())
        .token("test-token")
        .retry(RetryPolicy {
            max_attempts: 6,
            base_delay: Duration::from_millis(10),
            retryable: vec![429, 500, 502, 503, 504],
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn two_500s_then_200_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/v1/hubs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream hiccup"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/project/v1/hubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"type": "hubs", "id": "b.hub1", "attributes": {"name": "Main"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_retry_client(&server);
    let hubs = client.hubs().get_hubs().await.unwrap();

    assert_eq!(hubs.len(), 1);
    assert_eq!(hubs[0].id, "b.hub1");
}

#[tokio::test]
async fn exhausted_retries_surface_transient_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/v1/hubs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(6)
        .mount(&server)
        .await;

    let client = fast_retry_client(&server);
    let err = client.hubs().get_hubs().await.unwrap_err();

    match err {
        ForgeError::Transient { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Transient, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 6);
}

#[tokio::test]
async fn unauthorized_fails_without_retrying() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/project/v1/hubs"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_retry_client(&server);
    let err = client.hubs().get_hubs().await.unwrap_err();

    assert!(matches!(err, ForgeError::TokenExpired));
    // 401 is terminal: exactly one request, no retries.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn other_statuses_surface_status_body_and_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/v1/projects/b.p1/folders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such folder"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_retry_client(&server);
    let err = client
        .folders()
        .get_folder("p1", "missing")
        .await
        .unwrap_err();

    match err {
        ForgeError::Api {
            status,
            body,
            endpoint,
        } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such folder");
            assert!(endpoint.contains("folders/missing"));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;

    let client = ForgeClient::new(&server.uri()).unwrap();
    let err = client.hubs().get_hubs().await.unwrap_err();

    assert!(matches!(err, ForgeError::MissingToken));
    assert!(server.received_requests().await.unwrap().is_empty());
}

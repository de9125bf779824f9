//! Integration tests for the model-derivative endpoints: URN encoding and
//! the bounded 202 poll.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use forgeapi::{ForgeClient, ForgeError, PollPolicy};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const URN: &str = "urn:adsk.objects:os.object:bucket/model.rvt";

fn fast_poll_client(server: &MockServer) -> ForgeClient {
    ForgeClient::builder()
        .base_url(server.uri())
        .token("test-token")
        .poll(PollPolicy {
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            timeout: Duration::from_millis(200),
        })
        .build()
        .unwrap()
}

fn encoded_urn() -> String {
    URL_SAFE.encode(URN.as_bytes())
}

#[tokio::test]
async fn object_tree_polls_through_202() {
    let server = MockServer::start().await;
    let tree_path = format!("/modelderivative/v2/designdata/{}/metadata/guid1", encoded_urn());

    Mock::given(method("GET"))
        .and(path(tree_path.as_str()))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "result": "success"
        })))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tree_path.as_str()))
        .and(header("x-ads-force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"type": "objects", "objects": [{"objectid": 1}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let data = client
        .model_derivative()
        .get_object_tree(URN, "guid1", None, true)
        .await
        .unwrap();

    assert_eq!(data["type"], "objects");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn endless_202_hits_the_poll_bound() {
    let server = MockServer::start().await;
    let tree_path = format!("/modelderivative/v2/designdata/{}/metadata/guid1", encoded_urn());

    Mock::given(method("GET"))
        .and(path(tree_path.as_str()))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let err = client
        .model_derivative()
        .get_object_tree(URN, "guid1", None, false)
        .await
        .unwrap_err();

    match err {
        ForgeError::ProcessingTimeout { endpoint, waited } => {
            assert!(endpoint.contains("metadata/guid1"));
            assert!(waited >= Duration::from_millis(200));
        }
        other => panic!("expected ProcessingTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn derivative_download_returns_bytes() {
    let server = MockServer::start().await;
    let derivative_path = format!(
        "/modelderivative/v2/designdata/{}/manifest/{}",
        encoded_urn(),
        urlencoding::encode("urn:adsk.viewing:fs.file:abc/output.svf")
    );

    Mock::given(method("GET"))
        .and(path(derivative_path.as_str()))
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(derivative_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"svf-bytes".to_vec()))
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let bytes = client
        .model_derivative()
        .get_derivative(URN, "urn:adsk.viewing:fs.file:abc/output.svf")
        .await
        .unwrap();

    assert_eq!(bytes, b"svf-bytes");
}

#[tokio::test]
async fn manifest_passes_whole_payload_through() {
    let server = MockServer::start().await;
    let manifest_path = format!("/modelderivative/v2/designdata/{}/manifest", encoded_urn());

    Mock::given(method("GET"))
        .and(path(manifest_path.as_str()))
        .and(header("Accept-Encoding", "gzip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "derivatives": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let manifest = client
        .model_derivative()
        .get_manifest(URN, Some(forgeapi::AcceptEncoding::Gzip))
        .await
        .unwrap();

    assert_eq!(manifest["status"], "success");
}

#[tokio::test]
async fn metadata_unwraps_data_envelope() {
    let server = MockServer::start().await;
    let metadata_path = format!("/modelderivative/v2/designdata/{}/metadata", encoded_urn());

    Mock::given(method("GET"))
        .and(path(metadata_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"type": "metadata", "metadata": [{"guid": "g1", "name": "3D"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let data = client
        .model_derivative()
        .get_metadata_ids(URN, None)
        .await
        .unwrap();

    assert_eq!(data["metadata"][0]["guid"], "g1");
}

#[tokio::test]
async fn properties_carry_objectid_query() {
    let server = MockServer::start().await;
    let properties_path = format!(
        "/modelderivative/v2/designdata/{}/metadata/guid1/properties",
        encoded_urn()
    );

    Mock::given(method("GET"))
        .and(path(properties_path.as_str()))
        .and(query_param("objectid", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"type": "properties", "collection": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_poll_client(&server);
    let data = client
        .model_derivative()
        .get_object_properties(URN, "guid1", None, false, Some("42"))
        .await
        .unwrap();

    assert_eq!(data["type"], "properties");
}

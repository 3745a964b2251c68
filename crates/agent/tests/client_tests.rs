//! Integration tests for [`SensorApiClient`] against a stub API.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::{unreachable_base_url, Behaviour, StubApi, ACCEPTED_MESSAGE};

use smartfactory_agent::client::{Connectivity, SensorApiClient, SubmitError};
use smartfactory_agent::config::Endpoint;
use smartfactory_core::Scenario;

fn client(base_url: &str, endpoint: Endpoint, timeout: Duration) -> SensorApiClient {
    SensorApiClient::new(base_url, endpoint, timeout).expect("client should build")
}

// ---------------------------------------------------------------------------
// Test: raw submission
// ---------------------------------------------------------------------------

/// A 200 response is success and the body arrives verbatim as text/plain.
#[tokio::test]
async fn raw_submission_posts_plain_text() {
    let stub = StubApi::spawn(Behaviour::Accept).await;
    let client = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));

    let text = Scenario::Normal.wire_text();
    client.submit(&text).await.expect("submission should succeed");

    let received = stub.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path, "/api/sensor/raw");
    assert_eq!(received[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(received[0].body, text);
}

/// The `data` endpoint receives the wire text as a JSON string.
#[tokio::test]
async fn data_submission_posts_json_string() {
    let stub = StubApi::spawn(Behaviour::Accept).await;
    let client = client(&stub.base_url, Endpoint::Data, Duration::from_secs(5));

    let text = Scenario::Warning.wire_text();
    client.submit(&text).await.unwrap();

    let received = stub.received();
    assert_eq!(received[0].path, "/api/sensor/data");
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));
    let decoded: String = serde_json::from_str(&received[0].body).unwrap();
    assert_eq!(decoded, text);
}

/// The API's JSON envelope comes back to the caller.
#[tokio::test]
async fn accepted_submission_returns_reply_envelope() {
    let stub = StubApi::spawn(Behaviour::Accept).await;
    let client = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));

    let reply = client
        .submit(&Scenario::Emergency.wire_text())
        .await
        .unwrap()
        .expect("stub replies with a JSON envelope");
    assert!(reply.success);
    assert_eq!(reply.message.as_deref(), Some(ACCEPTED_MESSAGE));
}

/// A 200 with a non-JSON body still counts as delivered.
#[tokio::test]
async fn plain_text_reply_is_delivered_without_envelope() {
    let stub = StubApi::spawn(Behaviour::PlainText).await;
    let client = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));

    let reply = client.submit(&Scenario::Normal.wire_text()).await.unwrap();
    assert!(reply.is_none());
    assert_eq!(stub.received().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: failures
// ---------------------------------------------------------------------------

/// Any status other than 200 is a delivery failure carrying the code.
#[tokio::test]
async fn non_200_status_is_reported() {
    for code in [201, 400, 500] {
        let stub = StubApi::spawn(Behaviour::Status(code)).await;
        let client = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));

        let err = client.submit(&Scenario::Normal.wire_text()).await.unwrap_err();
        assert_matches!(err, SubmitError::HttpStatus(c) if c == code);
    }
}

/// Connection refused surfaces as a transport error.
#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    let base_url = unreachable_base_url().await;
    let client = client(&base_url, Endpoint::Raw, Duration::from_secs(2));

    let err = client.submit(&Scenario::Normal.wire_text()).await.unwrap_err();
    assert_matches!(err, SubmitError::Request(_));
    assert!(!err.is_timeout());
}

/// A server slower than the client timeout yields a timeout error.
#[tokio::test]
async fn slow_server_times_out() {
    let stub = StubApi::spawn(Behaviour::Delay(Duration::from_secs(3))).await;
    let client = client(&stub.base_url, Endpoint::Raw, Duration::from_millis(200));

    let err = client.submit(&Scenario::Normal.wire_text()).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

// ---------------------------------------------------------------------------
// Test: connectivity and read-back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connectivity_check_distinguishes_outcomes() {
    let stub = StubApi::spawn(Behaviour::Accept).await;
    let reachable = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));
    assert_eq!(reachable.check_connectivity().await, Connectivity::Reachable);

    // The stub has no route for this root, so it answers 404.
    let wrong_root = format!("{}/v2", stub.base_url);
    let degraded = client(&wrong_root, Endpoint::Raw, Duration::from_secs(5));
    assert_eq!(degraded.check_connectivity().await, Connectivity::Degraded(404));

    let base_url = unreachable_base_url().await;
    let unreachable = client(&base_url, Endpoint::Raw, Duration::from_secs(2));
    assert_eq!(unreachable.check_connectivity().await, Connectivity::Unreachable);
}

#[tokio::test]
async fn current_reading_decodes_envelope() {
    let stub = StubApi::spawn(Behaviour::Accept).await;
    let client = client(&stub.base_url, Endpoint::Raw, Duration::from_secs(5));

    let response = client.current_reading().await.unwrap();
    assert!(response.success);
    let data = response.data.expect("data should be present");
    assert_eq!(data["furnace_Temp"], 892.0);
    assert_eq!(data["activeWarnings"].as_array().map(Vec::len), Some(1));
}

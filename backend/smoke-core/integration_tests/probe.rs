use crate::helpers::{probe_client, unreachable_base_url};

use smoke_core::error::TransportError;
use smoke_core::probe::{ProbeClient, ProbeParams, ProbeReport, run_probe};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: End-to-end probe: a=5, b=10 returns `{"status": "ok"}`.
///
/// **WHY THIS MATTERS**: This is the exact exchange the probe binary performs by
/// default. The mock only matches when both query parameters arrive unchanged.
///
/// **BUG THIS CATCHES**: Would catch parameters sent as `5.0`, swapped, or in the body.
#[tokio::test]
async fn given_probe_endpoint_ok_when_probed_then_reports_response_data() {
    // GIVEN: A probe endpoint expecting a=5 and b=10
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .and(query_param("a", "5"))
        .and(query_param("b", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = probe_client(&server);

    // WHEN: Running the probe
    let report = run_probe(&client, ProbeParams::new(5.0, 10.0)).await;

    // THEN: The parsed body is reported
    assert!(report.is_success(), "report: {report}");
    assert_eq!(report.to_string(), r#"Response data: {"status":"ok"}"#);
}

/// **VALUE**: A non-2xx status is a `Request` failure and the body is not parsed.
///
/// **WHY THIS MATTERS**: Error pages often carry JSON. Treating that JSON as response
/// data would make a failing server look healthy.
///
/// **BUG THIS CATCHES**: Would catch parsing the body before checking the status.
#[tokio::test]
async fn given_probe_endpoint_not_found_when_probed_then_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = probe_client(&server);

    let report = run_probe(&client, ProbeParams::new(5.0, 10.0)).await;

    match report {
        ProbeReport::Failed(TransportError::Request { status, message, .. }) => {
            assert_eq!(status.0, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("Expected Request failure, got {other:?}"),
    }
}

#[tokio::test]
async fn given_ok_status_with_non_json_body_when_probed_then_json_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = probe_client(&server);

    let result = client.probe(ProbeParams::new(1.0, 2.0)).await;

    assert!(matches!(result, Err(TransportError::Json { .. })));
}

#[tokio::test]
async fn given_unreachable_server_when_probed_then_network_failure() {
    let client = ProbeClient::new(&unreachable_base_url(), None).expect("client should build");

    let report = run_probe(&client, ProbeParams::new(5.0, 10.0)).await;

    assert!(
        report
            .to_string()
            .starts_with("Error making GET request: Network Error"),
        "report: {report}"
    );
    match report {
        ProbeReport::Failed(e) => assert!(e.is_network(), "expected network error, got {e}"),
        other => panic!("Expected network failure, got {other:?}"),
    }
}

#[tokio::test]
async fn given_fractional_params_when_probed_then_sent_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .and(query_param("a", "2.5"))
        .and(query_param("b", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    let client = probe_client(&server);

    let result = client.probe(ProbeParams::new(2.5, -1.0)).await;

    assert_eq!(result.expect("probe should succeed"), json!([1, 2]));
}

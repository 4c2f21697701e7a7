// Unit tests for probe URL construction and report formatting

use crate::error::TransportError;
use crate::probe::{ProbeClient, ProbeParams, ProbeReport};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde_json::json;

/// **VALUE**: Verifies `a` and `b` appear exactly as given.
///
/// **WHY THIS MATTERS**: The probe exists to check how the service handles the numbers
/// it is sent. Any rounding or reformatting makes the smoke result meaningless.
///
/// **BUG THIS CATCHES**: Would catch `{:.2}` style formatting or swapped parameters.
#[test]
fn given_params_when_probe_url_built_then_embeds_values_verbatim() {
    // GIVEN: A client on the default host
    let client = ProbeClient::new("http://localhost:8000", None).unwrap();

    // WHEN: Building the URL for several value shapes
    let cases = [
        (5.0, 10.0, "a=5&b=10"),
        (2.5, -3.0, "a=2.5&b=-3"),
        (0.0, 1e6, "a=0&b=1000000"),
    ];

    // THEN: Path is /test and the query holds the values unchanged
    for (a, b, expected_query) in cases {
        let url = client.probe_url(ProbeParams::new(a, b)).unwrap();
        assert_eq!(url.path(), "/test");
        assert_eq!(url.query(), Some(expected_query), "a={a}, b={b}");
    }
}

#[test]
fn given_base_with_path_when_probe_url_built_then_appends_segment() {
    let client = ProbeClient::new("http://localhost:8000/api", None).unwrap();

    let url = client.probe_url(ProbeParams::new(1.0, 2.0)).unwrap();

    assert_eq!(url.as_str(), "http://localhost:8000/api/test?a=1&b=2");
}

#[test]
fn given_invalid_base_when_client_created_then_url_parse_error() {
    let result = ProbeClient::new("not a url", None);

    assert!(matches!(result, Err(TransportError::UrlParse { .. })));
}

#[test]
fn given_data_report_when_displayed_then_prefixed_with_response_data() {
    let report = ProbeReport::Data(json!({"status": "ok"}));

    assert_eq!(report.to_string(), r#"Response data: {"status":"ok"}"#);
    assert!(report.is_success());
}

#[test]
fn given_failed_report_when_displayed_then_names_get_request() {
    let report = ProbeReport::Failed(TransportError::Request {
        status: HttpStatusCode(503),
        message: String::from("Service Unavailable"),
        location: ErrorLocation::from(Location::caller()),
    });

    let text = report.to_string();

    assert!(text.starts_with("Error making GET request: Request Error: HTTP 503"));
    assert!(!report.is_success());
}

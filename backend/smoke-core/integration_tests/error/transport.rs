use crate::helpers::unreachable_base_url;

use smoke_core::error::{ApplicationError, CoreError, TransportError};
use smoke_core::probe::{ProbeClient, ProbeParams};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

/// **VALUE**: Verifies errors converted with `?` record where the call failed.
///
/// **WHY THIS MATTERS**: A smoke run prints one error line per failure. The location
/// suffix tells a developer which request site produced it.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being removed from the
/// `From<reqwest::Error>` conversion, which would point every error at the error module.
#[tokio::test]
async fn given_network_failure_when_formatted_then_location_points_at_probe() {
    // GIVEN: A probe against a closed port
    let client = ProbeClient::new(&unreachable_base_url(), None).unwrap();

    // WHEN: Probing
    let err = client
        .probe(ProbeParams::new(1.0, 2.0))
        .await
        .expect_err("closed port should fail");

    // THEN: The message names the kind and the probe source file
    let text = err.to_string();
    assert!(text.starts_with("Network Error:"), "text: {text}");
    assert!(text.contains("probe"), "location should name the probe module: {text}");
    assert!(!text.contains("transport.rs"), "location leaked into error module: {text}");
}

#[test]
#[track_caller]
fn given_request_error_when_formatted_then_includes_status_and_location() {
    let err = TransportError::Request {
        status: HttpStatusCode(502),
        message: String::from("Bad Gateway"),
        location: ErrorLocation::from(Location::caller()),
    };

    let text = err.to_string();

    assert!(text.contains("Request Error: HTTP 502 - Bad Gateway"));
    assert!(text.contains("transport.rs"));
    assert!(!err.is_network());
}

#[test]
fn given_application_error_when_wrapped_then_core_error_is_transparent() {
    let err = ApplicationError::MissingField {
        operation: "createPost",
        field: "postId",
        location: ErrorLocation::from(Location::caller()),
    };
    let expected = err.to_string();

    let core: CoreError = err.into();

    assert_eq!(core.to_string(), expected);
    assert!(expected.contains("'postId' absent from 'createPost' response"));
}

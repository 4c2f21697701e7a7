// Unit tests for error module

use crate::error::SmokeError;

use smoke_core::error::{ConfigError, CoreError};

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies setup errors name their kind and where they were raised.
///
/// **WHY THIS MATTERS**: `main` returns this error directly, so its Display is the
/// only thing the operator sees when config or logging fails.
///
/// **BUG THIS CATCHES**: Would catch if the `#[error(...)]` format drops the message
/// or the location.
#[test]
fn given_setup_error_when_displayed_then_contains_message_and_location() {
    // GIVEN: A Setup error
    let err = SmokeError::Setup {
        message: String::from("bad config"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting it
    let text = err.to_string();

    // THEN: Kind, message and the calling file all appear
    assert!(text.starts_with("Setup Error: bad config"), "got: {text}");
    assert!(text.contains("error.rs"), "got: {text}");
}

/// **VALUE**: Verifies config failures keep their own kind and location when they
/// reach `main`.
///
/// **BUG THIS CATCHES**: Would catch the config error being flattened into a string
/// or wrapped with a second, misleading location.
#[test]
fn given_config_error_when_converted_then_core_error_shows_config_details() {
    // GIVEN: A config validation failure
    let config_err = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("credentials.username cannot be empty"),
    };
    let expected = config_err.to_string();

    // WHEN: Converting through the core aggregate
    let err: SmokeError = CoreError::from(config_err).into();

    // THEN: Prefixed once, inner text untouched
    assert_eq!(err.to_string(), format!("Core Error: {expected}"));
    assert!(matches!(
        err,
        SmokeError::Core {
            source: CoreError::Config(_)
        }
    ));
}

// Unit tests for response extraction and the three-state outcome

use crate::error::{ApplicationError, CoreError, TransportError};
use crate::graphql_client::{
    GraphqlErrorEntry, GraphqlOutcome, GraphqlResponse, extract, join_error_messages,
};
use crate::operations::{CreatePost, Login};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde_json::json;

fn response(value: serde_json::Value) -> GraphqlResponse {
    serde_json::from_value(value).expect("test envelope should deserialize")
}

/// **VALUE**: Verifies a null result with GraphQL errors becomes `GraphqlErrors`.
///
/// **WHY THIS MATTERS**: The service raises HTTP exceptions inside resolvers. They
/// arrive as HTTP 200 with `data.login = null` and an `errors` array. Reporting that as
/// a missing field would hide the service's own explanation.
///
/// **BUG THIS CATCHES**: Would catch the errors array being ignored.
#[test]
fn given_null_field_with_errors_when_extracted_then_graphql_errors() {
    // GIVEN: A resolver failure envelope
    let envelope = response(json!({
        "data": {"login": null},
        "errors": [{"message": "Invalid credentials", "path": ["login"]}]
    }));

    // WHEN: Extracting the login result
    let result = extract::<Login>(envelope);

    // THEN: The service message is preserved
    match result {
        Err(ApplicationError::GraphqlErrors { operation, message, .. }) => {
            assert_eq!(operation, "login");
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("Expected GraphqlErrors, got {other:?}"),
    }
}

#[test]
fn given_no_data_and_no_errors_when_extracted_then_missing_field() {
    let envelope = response(json!({}));

    let result = extract::<CreatePost>(envelope);

    assert!(matches!(
        result,
        Err(ApplicationError::MissingField {
            operation: "createPost",
            field: "data",
            ..
        })
    ));
}

/// **VALUE**: Verifies a result of the wrong shape is `Malformed`, not a panic.
///
/// **BUG THIS CATCHES**: Would catch an `unwrap()` on the payload conversion.
#[test]
fn given_wrong_shape_when_extracted_then_malformed() {
    let envelope = response(json!({"data": {"login": {"ok": "yes"}}}));

    let result = extract::<Login>(envelope);

    assert!(matches!(result, Err(ApplicationError::Malformed { .. })));
}

#[test]
fn given_ok_result_alongside_errors_when_extracted_then_succeeds() {
    let envelope = response(json!({
        "data": {"createPost": {"ok": true, "postId": 9}},
        "errors": [{"message": "deprecated field"}]
    }));

    let post_id = extract::<CreatePost>(envelope).expect("data should win over warnings");

    assert_eq!(post_id.to_string(), "9");
}

#[test]
fn given_several_errors_when_joined_then_separated_by_semicolons() {
    let errors = vec![
        GraphqlErrorEntry {
            message: String::from("first"),
            path: None,
        },
        GraphqlErrorEntry {
            message: String::from("second"),
            path: None,
        },
    ];

    assert_eq!(join_error_messages(&errors), "first; second");
}

/// **VALUE**: Verifies the outcome keeps transport and application failures apart
/// when converted into the aggregate error.
///
/// **WHY THIS MATTERS**: Logs must say whether the network or the service said no.
#[test]
fn given_outcomes_when_converted_to_result_then_variant_preserved() {
    let transport: GraphqlOutcome<()> =
        GraphqlOutcome::TransportFailed(TransportError::Request {
            status: HttpStatusCode(500),
            message: String::from("boom"),
            location: ErrorLocation::from(Location::caller()),
        });
    let application: GraphqlOutcome<()> =
        GraphqlOutcome::ApplicationFailed(ApplicationError::Rejected {
            operation: "login",
            location: ErrorLocation::from(Location::caller()),
        });
    let success = GraphqlOutcome::Succeeded(7);

    assert!(matches!(transport.into_result(), Err(CoreError::Transport(_))));
    assert!(matches!(
        application.into_result(),
        Err(CoreError::Application(_))
    ));
    assert_eq!(success.into_result().unwrap(), 7);
}

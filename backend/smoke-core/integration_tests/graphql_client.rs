use crate::helpers::{GRAPHQL_PATH, graphql_client, login_ok};

use smoke_core::error::TransportError;
use smoke_core::graphql_client::GraphqlOutcome;
use smoke_core::operations::{Login, LoginCredentials};

use common::{BearerToken, HttpStatusCode};

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the wire shape of a GraphQL call.
///
/// **WHY THIS MATTERS**: The service only understands `POST /graphql/` with a JSON
/// body of exactly `{"query": ...}` and `Content-Type: application/json`.
///
/// **BUG THIS CATCHES**: Would catch an extra `variables` key, a GET, or a missing
/// content type.
#[tokio::test]
async fn given_document_when_sent_then_posts_json_query_body() {
    // GIVEN: A server that only answers correctly-shaped requests
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = graphql_client(&server);

    // WHEN: Sending a document without a token
    let response = client.send("{ ping }", None).await;

    // THEN: The call succeeds and the body is exactly {"query": ...}
    assert!(response.is_ok(), "send failed: {response:?}");

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"query": "{ ping }"}));
    assert!(
        requests[0].headers.get("authorization").is_none(),
        "No Authorization header without a token"
    );
}

/// **VALUE**: Verifies a supplied token lands in the Authorization header verbatim.
///
/// **BUG THIS CATCHES**: Would catch a lowercase scheme or a token that gets quoted.
#[tokio::test]
async fn given_token_when_sent_then_authorization_header_is_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = graphql_client(&server);

    let response = client
        .send("{ ping }", Some(BearerToken::new("abc.def.ghi")))
        .await;

    assert!(response.is_ok(), "send failed: {response:?}");
}

#[tokio::test]
async fn given_login_ok_when_executed_then_succeeded_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_ok("tok123")))
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();

    let outcome = client.execute(&Login::new(&credentials), None).await;

    match outcome {
        GraphqlOutcome::Succeeded(token) => assert_eq!(token.as_str(), "tok123"),
        other => panic!("Expected Succeeded, got {other:?}"),
    }
}

/// **VALUE**: HTTP failure and payload failure land in different outcome variants.
///
/// **WHY THIS MATTERS**: The whole reason for the three-state outcome is to keep a
/// 500 distinguishable from an `ok: false`.
#[tokio::test]
async fn given_server_error_when_executed_then_transport_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();

    let outcome = client.execute(&Login::new(&credentials), None).await;

    match outcome {
        GraphqlOutcome::TransportFailed(TransportError::Request {
            status, message, ..
        }) => {
            assert_eq!(status, HttpStatusCode(500));
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected TransportFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_ok_false_when_executed_then_application_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"login": {"ok": false}}})),
        )
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();

    let outcome = client.execute(&Login::new(&credentials), None).await;

    assert!(matches!(outcome, GraphqlOutcome::ApplicationFailed(_)));
}

use crate::helpers::{
    CREATE_POST_MARKER, GRAPHQL_PATH, LOGIN_MARKER, capture_logs, create_post_ok, graphql_client,
    logged_lines_containing, login_ok, mount_login, requests_containing, unreachable_base_url,
};

use smoke_core::auth_flow::{AuthenticatedPostFlow, FlowReport, FlowState};
use smoke_core::error::{ApplicationError, CoreError, TransportError};
use smoke_core::graphql_client::GraphqlClient;
use smoke_core::operations::{LoginCredentials, PostDraft};

use common::HttpStatusCode;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_create_post(
    server: &MockServer,
    token: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(CREATE_POST_MARKER))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(response)
        .expect(times)
        .named("createPost mutation")
        .mount(server)
        .await;
}

/// **VALUE**: End-to-end happy path: login token flows into the post-creation call.
///
/// **WHY THIS MATTERS**: This is the contract the smoke binary checks against a live
/// server. The createPost mock only matches with `Authorization: Bearer tok123`, so a
/// success here proves the token was forwarded verbatim.
///
/// **BUG THIS CATCHES**: Would catch the token being dropped, reformatted, or the
/// second call being sent without it.
#[tokio::test]
async fn given_login_ok_and_post_ok_when_flow_runs_then_post_created() {
    // GIVEN: A server that accepts the login and the authorized post
    capture_logs();
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(login_ok("tok123")), 1).await;
    mount_create_post(
        &server,
        "tok123",
        ResponseTemplate::new(200).set_body_json(create_post_ok(json!(42))),
        1,
    )
    .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    // WHEN: Running the flow
    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    // THEN: Success, reported with the post id
    assert!(run.report.is_success(), "report: {:?}", run.report);
    assert_eq!(
        run.report.to_string(),
        "Post created successfully. Post ID: 42"
    );

    // AND: Every state was visited in order
    assert_eq!(
        run.transitions,
        vec![
            FlowState::Start,
            FlowState::LoginSent,
            FlowState::LoginOk,
            FlowState::ActionSent,
            FlowState::ActionOk,
        ]
    );
    assert!(run.transitions.last().is_some_and(FlowState::is_terminal));

    // AND: The operator sees the token, then the post id
    assert_eq!(
        logged_lines_containing("Access Token: tok123"),
        vec!["Login successful. Access Token: tok123".to_string()]
    );
    assert!(
        logged_lines_containing("Post created successfully. Post ID: 42")
            .iter()
            .any(|line| line == "Post created successfully. Post ID: 42")
    );
}

/// **VALUE**: An empty access token is a failed login, not a usable credential.
///
/// **WHY THIS MATTERS**: Forwarding `""` sends a bare `Authorization: Bearer` header and
/// blames the post resolver for what is really a broken login.
///
/// **BUG THIS CATCHES**: Would catch the token check accepting any present string,
/// including the empty one. The createPost mock expects zero calls.
#[tokio::test]
async fn given_login_ok_with_empty_token_when_flow_runs_then_login_failed_without_second_call() {
    // GIVEN: A login that reports ok=true but hands back an empty token
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(login_ok("")), 1).await;
    Mock::given(method("POST"))
        .and(body_string_contains(CREATE_POST_MARKER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("createPost must not be called")
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    // WHEN: Running the flow
    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    // THEN: Login failure naming the missing token
    assert_eq!(run.report.to_string(), "Login failed.");
    assert!(matches!(
        run.report,
        FlowReport::LoginFailed(CoreError::Application(ApplicationError::MissingField {
            operation: "login",
            field: "accessToken",
            ..
        }))
    ));
    assert_eq!(
        run.transitions,
        vec![FlowState::Start, FlowState::LoginSent, FlowState::LoginFailed]
    );
    assert!(requests_containing(&server, CREATE_POST_MARKER).await.is_empty());
}

/// **VALUE**: A token that cannot be written into a header fails the post step locally.
///
/// **WHY THIS MATTERS**: The request never leaves the process, so calling it a network
/// error would send the operator looking at the server.
///
/// **BUG THIS CATCHES**: Would catch reqwest builder errors being folded into `Network`.
#[tokio::test]
async fn given_token_with_newline_when_flow_runs_then_post_failed_with_build_error() {
    // GIVEN: A login that returns a token containing a newline
    capture_logs();
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(login_ok("bad\ntoken-7")), 1)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains(CREATE_POST_MARKER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("createPost must not reach the server")
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    // WHEN: Running the flow
    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    // THEN: The post step fails with a build error, not a network error
    match &run.report {
        FlowReport::PostFailed(CoreError::Transport(e @ TransportError::Build { .. })) => {
            assert!(!e.is_network());
            assert!(logged_lines_containing(&format!("Network error: {e}")).is_empty());
        }
        other => panic!("Expected PostFailed build failure, got {other:?}"),
    }
    assert_eq!(run.transitions.last(), Some(&FlowState::ActionFailed));
}

/// **VALUE**: `login.ok = false` stops the flow before any post-creation call.
///
/// **WHY THIS MATTERS**: Without a token there is nothing to authorize the second call
/// with. Sending it anyway would produce a misleading post-creation failure.
///
/// **BUG THIS CATCHES**: Would catch only the HTTP status being checked. The createPost
/// mock expects zero calls and is verified when the server drops.
#[tokio::test]
async fn given_login_ok_false_when_flow_runs_then_login_failed_without_second_call() {
    // GIVEN: A login that succeeds at HTTP level but reports ok=false
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"login": {"ok": false}}})),
        1,
    )
    .await;
    Mock::given(method("POST"))
        .and(body_string_contains(CREATE_POST_MARKER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("createPost must not be called")
        .mount(&server)
        .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    // WHEN: Running the flow
    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    // THEN: Login failure, application-level
    assert_eq!(run.report.to_string(), "Login failed.");
    assert!(matches!(
        run.report,
        FlowReport::LoginFailed(CoreError::Application(ApplicationError::Rejected { .. }))
    ));
    assert_eq!(
        run.transitions,
        vec![FlowState::Start, FlowState::LoginSent, FlowState::LoginFailed]
    );
    assert!(requests_containing(&server, CREATE_POST_MARKER).await.is_empty());
}

/// **VALUE**: A failed post creation after a good login is reported as such.
///
/// **WHY THIS MATTERS**: An operator reading "Login failed." would go debug the auth
/// service when the post resolver is the one that broke.
///
/// **BUG THIS CATCHES**: Would catch a shared failure branch for both steps.
#[tokio::test]
async fn given_login_ok_and_post_rejected_when_flow_runs_then_post_failed() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(login_ok("tok-x")), 1).await;
    mount_create_post(
        &server,
        "tok-x",
        ResponseTemplate::new(200)
            .set_body_json(json!({"data": {"createPost": {"ok": false, "postId": null}}})),
        1,
    )
    .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    assert_eq!(run.report.to_string(), "Failed to create post.");
    assert!(matches!(
        run.report,
        FlowReport::PostFailed(CoreError::Application(ApplicationError::Rejected {
            operation: "createPost",
            ..
        }))
    ));
    assert_eq!(run.transitions.last(), Some(&FlowState::ActionFailed));
    assert!(run.transitions.contains(&FlowState::LoginOk));
}

#[tokio::test]
async fn given_post_returns_unauthorized_when_flow_runs_then_post_failed_with_status() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(login_ok("tok-401")), 1).await;
    mount_create_post(
        &server,
        "tok-401",
        ResponseTemplate::new(401)
            .set_body_json(json!({"errors": [{"message": "User not found or invalid token"}]})),
        1,
    )
    .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    match &run.report {
        FlowReport::PostFailed(CoreError::Transport(TransportError::Request {
            status,
            message,
            ..
        })) => {
            assert_eq!(*status, HttpStatusCode(401));
            assert_eq!(message, "User not found or invalid token");
        }
        other => panic!("Expected PostFailed transport failure, got {other:?}"),
    }
}

/// **VALUE**: Resolver exceptions surfaced as GraphQL `errors` fail the login.
///
/// **WHY THIS MATTERS**: The service answers bad credentials with HTTP 200, a null
/// `login` and an `errors` entry. That must still read as a login failure.
#[tokio::test]
async fn given_login_graphql_errors_when_flow_runs_then_login_failed() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {"login": null},
            "errors": [{"message": "Incorrect username or password"}]
        })),
        1,
    )
    .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::new("test", "wrong");
    let draft = PostDraft::default();

    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    assert!(matches!(
        run.report,
        FlowReport::LoginFailed(CoreError::Application(
            ApplicationError::GraphqlErrors { .. }
        ))
    ));
}

#[tokio::test]
async fn given_login_body_not_json_when_flow_runs_then_login_failed() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_string("<html>"), 1).await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    assert!(matches!(
        run.report,
        FlowReport::LoginFailed(CoreError::Transport(TransportError::Json { .. }))
    ));
}

/// **VALUE**: An unreachable server ends in the login failure state, no panic.
///
/// **BUG THIS CATCHES**: Would catch an `unwrap()` on the send result.
#[tokio::test]
async fn given_unreachable_server_when_flow_runs_then_login_failed_with_network_error() {
    capture_logs();
    let client = GraphqlClient::new(&format!("{}{GRAPHQL_PATH}", unreachable_base_url()), None)
        .expect("client should build");
    let credentials = LoginCredentials::default();
    let draft = PostDraft::default();

    let run = AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    match &run.report {
        FlowReport::LoginFailed(CoreError::Transport(e)) => {
            assert!(e.is_network(), "expected network error, got {e}");
            // AND: The failure is reported under the network label
            assert_eq!(
                logged_lines_containing(&format!("Network error: {e}")).len(),
                1
            );
        }
        other => panic!("Expected LoginFailed network failure, got {other:?}"),
    }
    assert_eq!(
        run.transitions,
        vec![FlowState::Start, FlowState::LoginSent, FlowState::LoginFailed]
    );
}

#[tokio::test]
async fn given_custom_credentials_when_flow_runs_then_login_document_embeds_them() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"data": {"login": {"ok": false}}})),
        1,
    )
    .await;

    let client = graphql_client(&server);
    let credentials = LoginCredentials::new("alice", "pa\"ss");
    let draft = PostDraft::default();

    AuthenticatedPostFlow::new(&client, &credentials, &draft)
        .run()
        .await;

    let requests = requests_containing(&server, LOGIN_MARKER).await;
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let query = body["query"].as_str().expect("query should be a string");
    assert!(query.contains(r#"login(username: "alice", password: "pa\"ss")"#));
}

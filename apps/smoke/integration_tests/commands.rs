use smoke::commands::create_post::run_create_post_command;
use smoke::commands::probe::run_probe_command;

use smoke_core::auth_flow::{FlowReport, FlowState};
use smoke_core::config::SmokeConfig;
use smoke_core::probe::{ProbeParams, ProbeReport};

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SmokeConfig {
    let mut config = SmokeConfig::default();
    config.probe.base_url = server.uri();
    config.graphql.endpoint = format!("{}/graphql/", server.uri());
    config
}

/// **VALUE**: Verifies the probe command sends the configured values and reports data.
///
/// **WHY THIS MATTERS**: This is the whole of the probe binary once startup is done.
///
/// **BUG THIS CATCHES**: Would catch if the command builds its client from the
/// wrong config section or drops the parameters.
#[tokio::test]
async fn given_healthy_server_when_probe_command_runs_then_reports_data() {
    // GIVEN: A server answering GET /test?a=5&b=10
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .and(query_param("a", "5"))
        .and(query_param("b", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    let config = config_for(&server);

    // WHEN: Running the command with the configured parameters
    let report = run_probe_command(&config, ProbeParams::new(config.probe.a, config.probe.b))
        .await
        .unwrap();

    // THEN: The data is reported verbatim
    assert_eq!(report.to_string(), r#"Response data: {"status":"ok"}"#);
}

#[tokio::test]
async fn given_server_error_when_probe_command_runs_then_returns_failed_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let report = run_probe_command(&config_for(&server), ProbeParams::new(5.0, 10.0))
        .await
        .unwrap();

    assert!(matches!(report, ProbeReport::Failed(_)));
    assert!(report.to_string().starts_with("Error making GET request:"));
}

/// **VALUE**: Verifies an unusable base URL is a command error, not a report.
///
/// **BUG THIS CATCHES**: Would catch if client construction failures are
/// swallowed and the binary exits as if the probe had run.
#[tokio::test]
async fn given_invalid_base_url_when_probe_command_runs_then_returns_core_error() {
    // GIVEN: A config whose base URL cannot be parsed
    let mut config = SmokeConfig::default();
    config.probe.base_url = String::from("not a url");

    // WHEN: Running the command
    let result = run_probe_command(&config, ProbeParams::new(5.0, 10.0)).await;

    // THEN: Core error
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Core Error"), "got: {err}");
}

/// **VALUE**: Verifies the create-post command runs the full flow end to end.
///
/// **WHY THIS MATTERS**: The binary relies on this function for both calls and
/// for handing the token between them.
///
/// **BUG THIS CATCHES**: Would catch if the command passes the wrong config
/// section (credentials or draft) into the flow.
#[tokio::test]
async fn given_healthy_server_when_create_post_command_runs_then_post_is_created() {
    // GIVEN: Login returns a token; createPost requires it
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_string_contains("mutation Login"))
        .and(body_string_contains(r#"username: \"test\""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"login": {"ok": true, "accessToken": "tok123"}}}),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_string_contains("mutation CreatePost"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"createPost": {"ok": true, "postId": "42"}}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Running the command with default credentials and draft
    let run = run_create_post_command(&config_for(&server)).await.unwrap();

    // THEN: The post is created and every state was visited in order
    assert_eq!(
        run.report.to_string(),
        "Post created successfully. Post ID: 42"
    );
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
}

#[tokio::test]
async fn given_login_rejected_when_create_post_command_runs_then_reports_login_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_string_contains("mutation Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"login": {"ok": false, "accessToken": null}}}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_string_contains("mutation CreatePost"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let run = run_create_post_command(&config_for(&server)).await.unwrap();

    assert!(matches!(run.report, FlowReport::LoginFailed(_)));
    assert_eq!(run.transitions.last(), Some(&FlowState::LoginFailed));
}

#[tokio::test]
async fn given_invalid_endpoint_when_create_post_command_runs_then_returns_core_error() {
    let mut config = SmokeConfig::default();
    config.graphql.endpoint = String::from("::");

    let result = run_create_post_command(&config).await;

    assert!(result.is_err());
}

//! Test helpers for smoke-core integration tests.
//!
//! - Building clients against a `wiremock` server
//! - Canned GraphQL responses
//! - An address nothing listens on, for network failures
//! - A process-wide logger that records every message for assertions

use smoke_core::graphql_client::GraphqlClient;
use smoke_core::probe::ProbeClient;

use std::net::TcpListener;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GRAPHQL_PATH: &str = "/graphql/";
pub const LOGIN_MARKER: &str = "mutation Login";
pub const CREATE_POST_MARKER: &str = "mutation CreatePost";

pub fn graphql_client(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new(&format!("{}{GRAPHQL_PATH}", server.uri()), None)
        .expect("GraphQL client should build")
}

pub fn probe_client(server: &MockServer) -> ProbeClient {
    ProbeClient::new(&server.uri(), None).expect("probe client should build")
}

/// Base URL on a port that was free a moment ago and is now closed.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn login_ok(token: &str) -> Value {
    json!({"data": {"login": {"ok": true, "accessToken": token}}})
}

pub fn create_post_ok(post_id: Value) -> Value {
    json!({"data": {"createPost": {"ok": true, "postId": post_id}}})
}

/// Mount a handler for the login mutation, expecting it `times` times.
pub async fn mount_login(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(LOGIN_MARKER))
        .respond_with(response)
        .expect(times)
        .named("login mutation")
        .mount(server)
        .await;
}

/// Recorded requests whose body contains `marker`.
pub async fn requests_containing(server: &MockServer, marker: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| String::from_utf8_lossy(&r.body).contains(marker))
        .collect()
}

static CAPTURED_LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = CAPTURED_LINES.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURING_LOGGER: CapturingLogger = CapturingLogger;

/// Install the recording logger. Later calls are no-ops.
///
/// Lines from every test in this binary land in one buffer, so assertions
/// should look for values unique to the calling test.
pub fn capture_logs() {
    if log::set_logger(&CAPTURING_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Captured log messages containing `needle`, in emission order.
pub fn logged_lines_containing(needle: &str) -> Vec<String> {
    CAPTURED_LINES
        .lock()
        .map(|lines| {
            lines
                .iter()
                .filter(|line| line.contains(needle))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

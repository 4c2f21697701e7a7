// Unit tests for operation documents and payload acceptance

use crate::operations::{
    CreatePost, CreatePostPayload, Login, LoginCredentials, LoginPayload, Operation, PostDraft,
    PostId, render_document, string_literal,
};
use crate::error::ApplicationError;

use serde_json::json;

// ============================================
// DOCUMENT RENDERING
// ============================================

/// **VALUE**: Verifies the default login document matches what the service expects.
///
/// **WHY THIS MATTERS**: The fixed smoke credentials are the whole point of the login step.
/// A renamed field or missing selection means the service never returns a token.
///
/// **BUG THIS CATCHES**: Would catch template edits that drop `accessToken` or change
/// argument names.
#[test]
fn given_default_credentials_when_login_rendered_then_embeds_literals() {
    // GIVEN: Default credentials
    let credentials = LoginCredentials::default();

    // WHEN: Rendering the login document
    let document = Login::new(&credentials).document();

    // THEN: Literals and selections are present
    assert!(document.starts_with("mutation Login {"));
    assert!(document.contains(r#"login(username: "test", password: "password")"#));
    assert!(document.contains("ok"));
    assert!(document.contains("accessToken"));
}

#[test]
fn given_default_draft_when_create_post_rendered_then_embeds_literals() {
    let draft = PostDraft::default();

    let document = CreatePost::new(&draft).document();

    assert!(document.starts_with("mutation CreatePost {"));
    assert!(document.contains(r#"createPost(title: "a title", content: "a content")"#));
    assert!(document.contains("postId"));
}

/// **VALUE**: Verifies values containing quotes cannot break out of the string literal.
///
/// **WHY THIS MATTERS**: Credentials and post text come from config and env. A quote
/// in a password would otherwise produce an invalid document or inject arguments.
///
/// **BUG THIS CATCHES**: Would catch the template being filled with raw `format!`.
#[test]
fn given_quotes_and_newlines_when_string_literal_built_then_escaped() {
    assert_eq!(string_literal(r#"pa"ss"#), r#""pa\"ss""#);
    assert_eq!(string_literal("a\\b"), r#""a\\b""#);
    assert_eq!(string_literal("line1\nline2\t"), r#""line1\nline2\t""#);
    assert_eq!(string_literal("\u{01}"), r#""\u0001""#);
    assert_eq!(string_literal("héllo"), "\"héllo\"");
}

/// **VALUE**: Verifies rendering is single-pass.
///
/// **WHY THIS MATTERS**: If the username were `{{password}}`, a naive sequence of
/// `replace` calls would substitute the password into the username literal.
///
/// **BUG THIS CATCHES**: Would catch a switch to chained `str::replace`.
#[test]
fn given_value_containing_placeholder_when_rendered_then_not_substituted_again() {
    // GIVEN: A value that looks like another placeholder
    let template = "f(a: {{a}}, b: {{b}})";

    // WHEN: Rendering
    let rendered = render_document(template, &[("a", "{{b}}"), ("b", "secret")]);

    // THEN: The first value stays literal
    assert_eq!(rendered, r#"f(a: "{{b}}", b: "secret")"#);
}

#[test]
fn given_unknown_placeholder_when_rendered_then_left_as_written() {
    let rendered = render_document("x {{missing}} {{a}}", &[("a", "1")]);

    assert_eq!(rendered, r#"x {{missing}} "1""#);
}

#[test]
fn given_unterminated_placeholder_when_rendered_then_tail_kept() {
    let rendered = render_document("x {{a", &[("a", "1")]);

    assert_eq!(rendered, "x {{a");
}

#[test]
fn given_credentials_when_debug_formatted_then_password_redacted() {
    let credentials = LoginCredentials::new("alice", "hunter2");

    let debug = format!("{:?}", credentials);

    assert!(debug.contains("alice"));
    assert!(!debug.contains("hunter2"));
}

// ============================================
// PAYLOAD ACCEPTANCE
// ============================================

/// **VALUE**: Verifies `ok: true` with a token yields that exact token.
///
/// **WHY THIS MATTERS**: The token is forwarded verbatim to the next call.
///
/// **BUG THIS CATCHES**: Would catch trimming or re-encoding of the token.
#[test]
fn given_ok_login_payload_when_accepted_then_returns_token() {
    let payload: LoginPayload =
        serde_json::from_value(json!({"ok": true, "accessToken": "tok123"})).unwrap();

    let token = Login::accept(payload).expect("login should be accepted");

    assert_eq!(token.as_str(), "tok123");
}

#[test]
fn given_ok_false_login_payload_when_accepted_then_rejected() {
    let payload: LoginPayload = serde_json::from_value(json!({"ok": false})).unwrap();

    let result = Login::accept(payload);

    assert!(matches!(
        result,
        Err(ApplicationError::Rejected {
            operation: "login",
            ..
        })
    ));
}

/// **VALUE**: Verifies a missing `ok` flag is treated as failure.
///
/// **WHY THIS MATTERS**: Only an explicit `ok: true` counts. A resolver that returned
/// null must not be mistaken for success.
#[test]
fn given_null_ok_login_payload_when_accepted_then_rejected() {
    let payload: LoginPayload =
        serde_json::from_value(json!({"ok": null, "accessToken": "tok"})).unwrap();

    assert!(matches!(
        Login::accept(payload),
        Err(ApplicationError::Rejected { .. })
    ));
}

#[test]
fn given_ok_login_without_token_when_accepted_then_missing_field() {
    let payload: LoginPayload = serde_json::from_value(json!({"ok": true})).unwrap();

    let result = Login::accept(payload);

    assert!(matches!(
        result,
        Err(ApplicationError::MissingField {
            operation: "login",
            field: "accessToken",
            ..
        })
    ));
}

#[test]
fn given_ok_create_post_payload_when_accepted_then_returns_post_id() {
    let payload: CreatePostPayload =
        serde_json::from_value(json!({"ok": true, "postId": 42})).unwrap();

    let post_id = CreatePost::accept(payload).expect("post should be accepted");

    assert_eq!(post_id, PostId(json!(42)));
    assert_eq!(post_id.to_string(), "42");
}

#[test]
fn given_ok_create_post_with_null_id_when_accepted_then_missing_field() {
    let payload: CreatePostPayload =
        serde_json::from_value(json!({"ok": true, "postId": null})).unwrap();

    assert!(matches!(
        CreatePost::accept(payload),
        Err(ApplicationError::MissingField {
            field: "postId",
            ..
        })
    ));
}

#[test]
fn given_string_post_id_when_displayed_then_printed_without_quotes() {
    assert_eq!(PostId(json!("p-7")).to_string(), "p-7");
}

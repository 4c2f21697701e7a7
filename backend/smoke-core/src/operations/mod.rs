//! GraphQL operation documents sent by the authenticated flow.
//!
//! Each operation is a named template constant plus a parameter struct.
//! Template placeholders use `{{name}}`; on render every placeholder is
//! replaced by an escaped GraphQL string literal in a single pass, so a
//! value that itself contains `{{...}}` is never substituted again.

pub mod create_post;
pub mod login;

pub use create_post::{
    CREATE_POST_MUTATION_TEMPLATE, CreatePost, CreatePostPayload, PostDraft, PostId,
};
pub use login::{LOGIN_MUTATION_TEMPLATE, Login, LoginCredentials, LoginPayload};

use crate::error::ApplicationError;

use serde::de::DeserializeOwned;

const PLACEHOLDER_OPEN: &str = "{{";
const PLACEHOLDER_CLOSE: &str = "}}";

/// A GraphQL operation with a typed, ok-flagged result.
pub trait Operation {
    /// Name of the `data` field holding this operation's result.
    const FIELD: &'static str;

    /// Raw result shape as returned under `data.<FIELD>`.
    type Payload: DeserializeOwned;

    /// What a successful result yields to the caller.
    type Output;

    fn document(&self) -> String;

    /// Apply the payload-level success checks.
    fn accept(payload: Self::Payload) -> Result<Self::Output, ApplicationError>;
}

/// Render `template`, substituting `{{name}}` with a quoted literal of the
/// matching argument. Unknown placeholders are left as written.
pub fn render_document(template: &str, arguments: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start + PLACEHOLDER_OPEN.len()..];

        let Some(end) = tail.find(PLACEHOLDER_CLOSE) else {
            rendered.push_str(&rest[start..]);
            return rendered;
        };

        let name = &tail[..end];
        match arguments.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => rendered.push_str(&string_literal(value)),
            None => {
                let placeholder_len = PLACEHOLDER_OPEN.len() + end + PLACEHOLDER_CLOSE.len();
                rendered.push_str(&rest[start..start + placeholder_len]);
            }
        }

        rest = &tail[end + PLACEHOLDER_CLOSE.len()..];
    }

    rendered.push_str(rest);
    rendered
}

/// Quote and escape `value` as a GraphQL string literal.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');

    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\u{08}' => literal.push_str("\\b"),
            '\u{0C}' => literal.push_str("\\f"),
            c if (c as u32) < 0x20 => literal.push_str(&format!("\\u{:04X}", c as u32)),
            c => literal.push(c),
        }
    }

    literal.push('"');
    literal
}

use super::{Operation, render_document};
use crate::error::ApplicationError;

use common::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CREATE_POST_MUTATION_TEMPLATE: &str = "mutation CreatePost {
  createPost(title: {{title}}, content: {{content}}) {
    ok
    postId
  }
}";

const DEFAULT_TITLE: &str = "a title";
const DEFAULT_CONTENT: &str = "a content";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_content")]
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Default for PostDraft {
    fn default() -> Self {
        Self::new(default_title(), default_content())
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_content() -> String {
    DEFAULT_CONTENT.to_string()
}

/// Opaque post identifier, printed as the service returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostId(pub Value);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    pub ok: Option<bool>,
    pub post_id: Option<Value>,
}

/// The `createPost` mutation. Requires a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct CreatePost<'a> {
    draft: &'a PostDraft,
}

impl<'a> CreatePost<'a> {
    pub fn new(draft: &'a PostDraft) -> Self {
        Self { draft }
    }
}

impl Operation for CreatePost<'_> {
    const FIELD: &'static str = "createPost";
    type Payload = CreatePostPayload;
    type Output = PostId;

    fn document(&self) -> String {
        render_document(
            CREATE_POST_MUTATION_TEMPLATE,
            &[
                ("title", self.draft.title.as_str()),
                ("content", self.draft.content.as_str()),
            ],
        )
    }

    fn accept(payload: CreatePostPayload) -> Result<PostId, ApplicationError> {
        if payload.ok != Some(true) {
            return Err(ApplicationError::Rejected {
                operation: Self::FIELD,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match payload.post_id {
            Some(id) if !id.is_null() => Ok(PostId(id)),
            _ => Err(ApplicationError::MissingField {
                operation: Self::FIELD,
                field: "postId",
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

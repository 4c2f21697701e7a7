//! Login, then create a post with the token the login returned.
//!
//! ```text
//! START -> LOGIN_SENT -> {LOGIN_OK, LOGIN_FAILED}
//! LOGIN_OK -> ACTION_SENT -> {ACTION_OK, ACTION_FAILED}
//! ```
//!
//! The post-creation call is built only after a token exists, so the two
//! calls are ordered by data dependency. The token is moved into that call
//! and dropped with it.

use crate::error::CoreError;
use crate::graphql_client::GraphqlClient;
use crate::operations::{CreatePost, Login, LoginCredentials, PostDraft, PostId};

use std::fmt;

use log::{error, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Start,
    LoginSent,
    LoginOk,
    LoginFailed,
    ActionSent,
    ActionOk,
    ActionFailed,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlowState::LoginFailed | FlowState::ActionOk | FlowState::ActionFailed
        )
    }
}

#[derive(Debug)]
pub enum FlowReport {
    LoginFailed(CoreError),
    PostFailed(CoreError),
    PostCreated { post_id: PostId },
}

impl FlowReport {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowReport::PostCreated { .. })
    }

    pub fn cause(&self) -> Option<&CoreError> {
        match self {
            FlowReport::LoginFailed(cause) | FlowReport::PostFailed(cause) => Some(cause),
            FlowReport::PostCreated { .. } => None,
        }
    }
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowReport::LoginFailed(_) => write!(f, "Login failed."),
            FlowReport::PostFailed(_) => write!(f, "Failed to create post."),
            FlowReport::PostCreated { post_id } => {
                write!(f, "Post created successfully. Post ID: {post_id}")
            }
        }
    }
}

/// A finished flow: its report plus every state it passed through.
#[derive(Debug)]
pub struct FlowRun {
    pub report: FlowReport,
    pub transitions: Vec<FlowState>,
}

pub struct AuthenticatedPostFlow<'a> {
    client: &'a GraphqlClient,
    credentials: &'a LoginCredentials,
    draft: &'a PostDraft,
    transitions: Vec<FlowState>,
}

impl<'a> AuthenticatedPostFlow<'a> {
    pub fn new(
        client: &'a GraphqlClient,
        credentials: &'a LoginCredentials,
        draft: &'a PostDraft,
    ) -> Self {
        Self {
            client,
            credentials,
            draft,
            transitions: vec![FlowState::Start],
        }
    }

    fn advance(&mut self, next: FlowState) {
        trace!("Flow state: {:?} -> {next:?}", self.transitions.last());
        self.transitions.push(next);
    }

    fn finish(mut self, terminal: FlowState, report: FlowReport) -> FlowRun {
        debug_assert!(terminal.is_terminal(), "{terminal:?} is not terminal");
        self.advance(terminal);

        match report.cause() {
            None => info!("{report}"),
            Some(cause) => {
                error!("{report}");
                error!("Cause: {cause}");
            }
        }

        FlowRun {
            report,
            transitions: self.transitions,
        }
    }

    /// Run both steps once. Failures end the flow; nothing is retried.
    pub async fn run(mut self) -> FlowRun {
        self.advance(FlowState::LoginSent);
        let login = Login::new(self.credentials);

        let token = match self.client.execute(&login, None).await.into_result() {
            Ok(token) => token,
            Err(cause) => {
                return self.finish(FlowState::LoginFailed, FlowReport::LoginFailed(cause));
            }
        };

        self.advance(FlowState::LoginOk);
        info!("Login successful. Access Token: {}", token.as_str());

        self.advance(FlowState::ActionSent);
        let create_post = CreatePost::new(self.draft);

        match self
            .client
            .execute(&create_post, Some(token))
            .await
            .into_result()
        {
            Ok(post_id) => self.finish(FlowState::ActionOk, FlowReport::PostCreated { post_id }),
            Err(cause) => self.finish(FlowState::ActionFailed, FlowReport::PostFailed(cause)),
        }
    }
}

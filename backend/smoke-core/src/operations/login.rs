use super::{Operation, render_document};
use crate::error::ApplicationError;

use common::{BearerToken, ErrorLocation};

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

pub const LOGIN_MUTATION_TEMPLATE: &str = "mutation Login {
  login(username: {{username}}, password: {{password}}) {
    ok
    accessToken
  }
}";

const DEFAULT_USERNAME: &str = "test";
const DEFAULT_PASSWORD: &str = "password";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for LoginCredentials {
    fn default() -> Self {
        Self::new(default_username(), default_password())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}
fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub ok: Option<bool>,
    pub access_token: Option<String>,
}

/// The `login` mutation.
#[derive(Debug, Clone, Copy)]
pub struct Login<'a> {
    credentials: &'a LoginCredentials,
}

impl<'a> Login<'a> {
    pub fn new(credentials: &'a LoginCredentials) -> Self {
        Self { credentials }
    }
}

impl Operation for Login<'_> {
    const FIELD: &'static str = "login";
    type Payload = LoginPayload;
    type Output = BearerToken;

    fn document(&self) -> String {
        render_document(
            LOGIN_MUTATION_TEMPLATE,
            &[
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ],
        )
    }

    fn accept(payload: LoginPayload) -> Result<BearerToken, ApplicationError> {
        if payload.ok != Some(true) {
            return Err(ApplicationError::Rejected {
                operation: Self::FIELD,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // An empty token cannot authorize anything.
        payload
            .access_token
            .filter(|token| !token.is_empty())
            .map(BearerToken::new)
            .ok_or_else(|| ApplicationError::MissingField {
                operation: Self::FIELD,
                field: "accessToken",
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

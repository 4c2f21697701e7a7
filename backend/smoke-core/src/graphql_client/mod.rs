//! Single-endpoint GraphQL client used by the authenticated flow.
//!
//! The service tunnels resolver failures inside HTTP 200 responses, so a
//! call only succeeds when both the transport and the operation's own `ok`
//! flag agree. [`GraphqlOutcome`] keeps the two failure kinds apart.

use crate::error::{ApplicationError, CoreError, TransportError};
use crate::operations::Operation;

use common::{BearerToken, ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use log::{debug, error, trace, warn};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const GRAPHQL_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
struct GraphqlRequestBody<'a> {
    query: &'a str,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphqlErrorEntry {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

pub fn join_error_messages(errors: &[GraphqlErrorEntry]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of one GraphQL call.
#[derive(Debug)]
pub enum GraphqlOutcome<T> {
    /// The exchange failed or returned a non-2xx status.
    TransportFailed(TransportError),
    /// The exchange succeeded but the operation reported failure.
    ApplicationFailed(ApplicationError),
    Succeeded(T),
}

impl<T> GraphqlOutcome<T> {
    pub fn into_result(self) -> Result<T, CoreError> {
        match self {
            GraphqlOutcome::Succeeded(value) => Ok(value),
            GraphqlOutcome::TransportFailed(e) => Err(e.into()),
            GraphqlOutcome::ApplicationFailed(e) => Err(e.into()),
        }
    }
}

#[derive(Clone)]
pub struct GraphqlClient {
    endpoint: Url,
    client: Client,
}

impl GraphqlClient {
    /// Build a client for `endpoint`. `timeout` of `None` keeps the HTTP
    /// client's default.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `{"query": document}` and decode the envelope.
    ///
    /// A supplied token is consumed into the `Authorization` header.
    ///
    /// # Errors
    /// Returns [`TransportError::Request`] on a non-2xx status, carrying any
    /// GraphQL `errors` messages the body held.
    pub async fn send(
        &self,
        document: &str,
        token: Option<BearerToken>,
    ) -> Result<GraphqlResponse, TransportError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, GRAPHQL_CONTENT_TYPE)
            .json(&GraphqlRequestBody { query: document });

        if let Some(token) = token {
            trace!("Attaching bearer token ({} chars)", token.len());
            request = request.header(AUTHORIZATION, token.into_authorization());
        }

        let response = request.send().await?;
        let status = HttpStatusCode::from(response.status().as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<GraphqlResponse>(&body) {
                Ok(GraphqlResponse {
                    errors: Some(errors),
                    ..
                }) if !errors.is_empty() => {
                    let joined = join_error_messages(&errors);
                    error!("Error: {joined}");
                    joined
                }
                _ => body,
            };

            return Err(TransportError::Request {
                status,
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let envelope: GraphqlResponse = response.json().await?;
        debug!("GraphQL response received from {}", self.endpoint);

        Ok(envelope)
    }

    /// Send `operation` and apply both the transport and payload checks.
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
        token: Option<BearerToken>,
    ) -> GraphqlOutcome<O::Output> {
        debug!("Executing '{}' against {}", O::FIELD, self.endpoint);

        let response = match self.send(&operation.document(), token).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_network() {
                    error!("Network error: {e}");
                }
                return GraphqlOutcome::TransportFailed(e);
            }
        };

        match extract::<O>(response) {
            Ok(output) => GraphqlOutcome::Succeeded(output),
            Err(e) => GraphqlOutcome::ApplicationFailed(e),
        }
    }
}

#[track_caller]
pub(crate) fn extract<O: Operation>(
    response: GraphqlResponse,
) -> Result<O::Output, ApplicationError> {
    let GraphqlResponse { data, errors } = response;
    let errors = errors.unwrap_or_default();

    let field = data
        .and_then(|mut data| data.get_mut(O::FIELD).map(Value::take))
        .filter(|value| !value.is_null());

    let Some(field) = field else {
        if !errors.is_empty() {
            let message = join_error_messages(&errors);
            error!("Error: {message}");
            return Err(ApplicationError::GraphqlErrors {
                operation: O::FIELD,
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        return Err(ApplicationError::MissingField {
            operation: O::FIELD,
            field: "data",
            location: ErrorLocation::from(Location::caller()),
        });
    };

    if !errors.is_empty() {
        warn!(
            "'{}' returned data alongside errors: {}",
            O::FIELD,
            join_error_messages(&errors)
        );
    }

    let payload: O::Payload =
        serde_json::from_value(field).map_err(|e| ApplicationError::Malformed {
            operation: O::FIELD,
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    O::accept(payload)
}

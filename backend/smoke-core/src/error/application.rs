//! Failures reported inside an otherwise successful GraphQL response.

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApplicationError {
    #[error("Rejected: '{operation}' reported ok=false {location}")]
    Rejected {
        operation: &'static str,
        location: ErrorLocation,
    },

    #[error("Missing Field: '{field}' absent from '{operation}' response {location}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Malformed Payload: '{operation}': {message} {location}")]
    Malformed {
        operation: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("GraphQL Errors: '{operation}': {message} {location}")]
    GraphqlErrors {
        operation: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

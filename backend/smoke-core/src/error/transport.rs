//! Errors raised while moving a request over the wire.
//!
//! - `Network`: the exchange never completed (DNS, refused, timeout)
//! - `Request`: the exchange completed with a non-2xx status
//! - `Build`: the request could not be assembled (e.g. an illegal header value)
//! - `Json` / `UrlParse`: local encode/decode failures around the exchange

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Build Error: {message} {location}")]
    Build {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Error: HTTP {status} - {message} {location}")]
    Request {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    pub fn is_network(&self) -> bool {
        matches!(self, TransportError::Network { .. })
    }
}

impl From<url::ParseError> for TransportError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        TransportError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if error.is_decode() {
            return TransportError::Json {
                message: error.to_string(),
                location,
            };
        }

        if error.is_builder() {
            return TransportError::Build {
                message: error.to_string(),
                location,
            };
        }

        TransportError::Network {
            message: error.to_string(),
            location,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        TransportError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

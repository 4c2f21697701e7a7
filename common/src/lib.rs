//! Shared building blocks for the smoke-test workspace.
//!
//! This crate holds the small value types every other crate leans on:
//! error locations, HTTP status classification and the redacted bearer
//! token. Nothing here performs I/O.
//!
//! ## Architecture
//!
//! - **common** (this crate): Plain value types
//! - **smoke-core**: Request flows operating on these types
//! - **smoke**: Binaries wiring config, logging and flows together

pub mod bearer_token;
pub mod error;
pub mod http_status;

pub use bearer_token::BearerToken;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;

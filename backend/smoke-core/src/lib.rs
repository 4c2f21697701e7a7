pub mod auth_flow;
pub mod config;
pub mod error;
pub mod graphql_client;
pub mod operations;
pub mod probe;

#[cfg(test)]
mod tests;

pub const SMOKE_SERVER_PORT: u16 = 8000;
pub const PROBE_SERVER_HOSTNAME: &str = "localhost";
pub const GRAPHQL_SERVER_HOSTNAME: &str = "0.0.0.0";

pub const DEFAULT_PROBE_BASE_URL: &str =
    const_format::concatcp!("http://", PROBE_SERVER_HOSTNAME, ":", SMOKE_SERVER_PORT);
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = const_format::concatcp!(
    "http://",
    GRAPHQL_SERVER_HOSTNAME,
    ":",
    SMOKE_SERVER_PORT,
    "/graphql/"
);

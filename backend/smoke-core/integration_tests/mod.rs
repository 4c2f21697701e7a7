mod auth_flow;
mod error;
mod graphql_client;
mod helpers;
mod probe;

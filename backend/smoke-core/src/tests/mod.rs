mod graphql_client;
mod operations;
mod probe;

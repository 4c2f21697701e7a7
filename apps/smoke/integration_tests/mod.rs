// Integration tests for the smoke binaries' command layer.
//
// Commands run against a `wiremock` server with a config pointing at it.

mod commands;
mod startup;

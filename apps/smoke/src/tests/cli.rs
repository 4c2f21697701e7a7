// Unit tests for argument parsing

use crate::cli::{CreatePostCli, ProbeCli};

use smoke_core::config::ProbeConfig;
use smoke_core::probe::ProbeParams;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// **VALUE**: Verifies configured values are used when no flags are given.
///
/// **WHY THIS MATTERS**: With no arguments the probe must send the defaults
/// (`a=5`, `b=10`).
///
/// **BUG THIS CATCHES**: Would catch if `params()` ignores the config and falls
/// back to zeros.
#[test]
fn given_no_flags_when_building_params_then_uses_config_values() {
    // GIVEN: A bare command line
    let cli = ProbeCli::try_parse_from(["smoke-probe"]).unwrap();

    // WHEN: Building params from the default config
    let params = cli.params(&ProbeConfig::default());

    // THEN: Default values are used
    assert_eq!(params, ProbeParams::new(5.0, 10.0));
    assert!(cli.common.config.is_none());
    assert!(cli.common.log_dir.is_none());
}

/// **VALUE**: Verifies flags override config, negative numbers included.
///
/// **BUG THIS CATCHES**: Would catch if `allow_negative_numbers` is dropped and
/// clap treats `-3` as an unknown short flag.
#[test]
fn given_flags_when_building_params_then_flags_win() {
    // GIVEN: Both values on the command line, one negative
    let cli = ProbeCli::try_parse_from(["smoke-probe", "-a", "2.5", "-b", "-3"]).unwrap();

    // WHEN: Building params
    let params = cli.params(&ProbeConfig::default());

    // THEN: Flag values are used as given
    assert_eq!(params, ProbeParams::new(2.5, -3.0));
}

#[test]
fn given_only_a_flag_when_building_params_then_b_comes_from_config() {
    let cli = ProbeCli::try_parse_from(["smoke-probe", "--a", "1"]).unwrap();

    let params = cli.params(&ProbeConfig::default());

    assert_eq!(params, ProbeParams::new(1.0, 10.0));
}

#[test]
fn given_non_numeric_value_when_parsing_then_fails() {
    let result = ProbeCli::try_parse_from(["smoke-probe", "-a", "five"]);

    assert!(result.is_err());
}

#[test]
fn given_common_flags_when_parsing_create_post_then_paths_are_captured() {
    let cli = CreatePostCli::try_parse_from([
        "smoke-create-post",
        "--config",
        "custom.toml",
        "--log-dir",
        "logs",
    ])
    .unwrap();

    assert_eq!(cli.common.config, Some(PathBuf::from("custom.toml")));
    assert_eq!(cli.common.log_dir, Some(PathBuf::from("logs")));
}

#[test]
fn given_cli_definitions_when_debug_asserted_then_valid() {
    ProbeCli::command().debug_assert();
    CreatePostCli::command().debug_assert();
}

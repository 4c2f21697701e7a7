use smoke::cli::CommonArgs;
use smoke::startup::prepare;

use std::fs;

use tempfile::TempDir;

/// **VALUE**: Verifies startup reads the given config file and creates the log directory.
///
/// **WHY THIS MATTERS**: Both binaries go through `prepare`; a config that is
/// silently ignored would send traffic to the default hosts.
///
/// **BUG THIS CATCHES**: Would catch if `--config` is not passed to the loader,
/// or if a missing log directory is not created before the logger opens its file.
#[test]
fn given_config_file_and_new_log_dir_when_preparing_then_config_is_loaded() {
    // GIVEN: A config file and a log directory that does not exist yet
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
version = 1

[probe]
base_url = "http://probe.internal:9000"
a = 1.5

[credentials]
username = "alice"
"#,
    )
    .unwrap();
    let log_dir = temp_dir.path().join("logs");

    let args = CommonArgs {
        config: Some(config_path),
        log_dir: Some(log_dir.clone()),
    };

    // WHEN: Preparing
    let config = prepare(&args).unwrap();

    // THEN: File values are applied and defaults fill the rest
    assert_eq!(config.probe.base_url, "http://probe.internal:9000");
    assert_eq!(config.probe.a, 1.5);
    assert_eq!(config.probe.b, 10.0);
    assert_eq!(config.credentials.username, "alice");
    assert!(log_dir.is_dir());
}

#[test]
fn given_missing_explicit_config_when_preparing_then_returns_core_error() {
    let temp_dir = TempDir::new().unwrap();
    let args = CommonArgs {
        config: Some(temp_dir.path().join("absent.toml")),
        log_dir: None,
    };

    let err = prepare(&args).unwrap_err();

    assert!(err.to_string().starts_with("Core Error"), "got: {err}");
}

#[test]
fn given_invalid_config_when_preparing_then_returns_core_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "version = 99\n").unwrap();
    let args = CommonArgs {
        config: Some(config_path),
        log_dir: None,
    };

    let err = prepare(&args).unwrap_err();

    assert!(err.to_string().starts_with("Core Error: Config Validation Error"), "got: {err}");
}

// Unit tests for logger module initialization logic
// Tests focus on thread-safety and error handling

use crate::logger::{LOG_FILE_NAME, build_dispatch, initialize};

use std::path::PathBuf;

use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Both binaries share the startup path, and tests call it
/// repeatedly in one process. A second call that panics or errors would crash startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = TempDir::new().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(Some(temp_dir.path()));
    let result2 = initialize(Some(temp_dir.path()));

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory yields an error, not a panic.
///
/// **WHY THIS MATTERS**: `--log-dir` is user input. A bad path must surface as a
/// setup error so the binary exits with a clear message.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` is unwrapped instead of
/// mapped into `SmokeError::Setup`.
#[test]
fn given_invalid_log_dir_when_building_dispatch_then_returns_setup_error() {
    // GIVEN: A path that can never hold a file
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Building the dispatch with that directory
    let result = build_dispatch(Some(&invalid_dir));

    // THEN: Should return a Setup error naming the log file
    let err = match result {
        Ok(_) => panic!("Should return error for invalid log directory"),
        Err(e) => e,
    };
    let err_string = err.to_string();
    assert!(err_string.starts_with("Setup Error"), "got: {err_string}");
    assert!(err_string.contains(LOG_FILE_NAME), "got: {err_string}");
}

/// **VALUE**: Verifies the log file is created inside the given directory.
///
/// **BUG THIS CATCHES**: Would catch if the file chain is dropped or the file
/// name changes without the docs following.
#[test]
fn given_log_dir_when_building_dispatch_then_creates_log_file() {
    // GIVEN: An empty temporary directory
    let temp_dir = TempDir::new().unwrap();

    // WHEN: Building the dispatch
    let result = build_dispatch(Some(temp_dir.path()));

    // THEN: smoke.log exists
    assert!(result.is_ok());
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}

#[test]
fn given_no_log_dir_when_building_dispatch_then_succeeds() {
    assert!(build_dispatch(None).is_ok());
}

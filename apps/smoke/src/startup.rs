use crate::cli::CommonArgs;
use crate::error::SmokeError;
use crate::logger::initialize as LoggerInitialize;

use smoke_core::config::SmokeConfig;
use smoke_core::error::CoreError;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;

use log::{debug, info};

/// Logger first, then config file, then environment overrides.
pub fn prepare(args: &CommonArgs) -> Result<SmokeConfig, SmokeError> {
    if let Some(log_dir) = &args.log_dir {
        create_dir_all(log_dir).map_err(|e| SmokeError::Setup {
            message: format!("Failed to create log directory {}: {e}", log_dir.display()),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    LoggerInitialize(args.log_dir.as_deref())?;

    if let Some(log_dir) = &args.log_dir {
        info!("Log directory: {}", log_dir.display());
    }

    let mut config = SmokeConfig::load(args.config.as_deref()).map_err(CoreError::from)?;
    config.apply_env_overrides().map_err(CoreError::from)?;

    debug!("Effective config: {config:?}");
    Ok(config)
}

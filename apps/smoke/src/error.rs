use smoke_core::error::CoreError;

use common::ErrorLocation;

use thiserror::Error;

/// Errors that stop a smoke binary before its flow can run.
///
/// Flow failures are never returned here; they are logged and the
/// process exits normally.
#[derive(Debug, Error)]
pub enum SmokeError {
    /// Logger or log directory setup failed
    #[error("Setup Error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },

    /// Config or client construction failed in smoke-core
    #[error("Core Error: {source}")]
    Core {
        #[from]
        source: CoreError,
    },
}

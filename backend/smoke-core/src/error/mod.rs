pub mod application;
pub mod config;
pub mod transport;

pub use application::ApplicationError;
pub use config::ConfigError;
pub use transport::TransportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

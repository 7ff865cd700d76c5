use crate::config::ConfigError;
use irrigo_core::error::ValidationError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ObserverError {
    /// Every observer error is caused by the request, never by the server
    pub fn is_user_error(&self) -> bool {
        match self {
            ObserverError::Validation(_) => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed installing logger: {0}")]
    Logging(#[from] TryInitError),
    #[error("Failed registering signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("Failed starting webserver: {0}")]
    Server(#[from] warp::Error),
}

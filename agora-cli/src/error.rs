use agora_client::ClientError;
use agora_shared::observability::ObservabilityError;
use agora_shared::ValidationError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] ObservabilityError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("You must be logged in")]
    NotLoggedIn,

    /// Failure reported to the user as-is
    #[error("{0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn failed(message: impl Into<String>) -> Self {
        CliError::Failed(message.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;

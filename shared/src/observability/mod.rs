//! Observability utilities
//!
//! Centralized logging setup shared by the client library and the CLI

pub mod logging;

pub use logging::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Invalid logging setting: {0}")]
    InvalidSetting(String),
}

pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

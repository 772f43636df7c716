//! Client error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! Status: {status}{}", status_detail(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Circuit breaker is open for service: {0}")]
    CircuitOpen(String),

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Payment(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn status_detail(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(" ({})", message),
        _ => String::new(),
    }
}

impl ClientError {
    /// Transport failures and server errors are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

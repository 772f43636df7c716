//! Shared types, validation and logging for the Agora bounty marketplace client

// Re-export common dependencies
pub use chrono;
pub use rust_decimal;
pub use serde;
pub use serde_json;
pub use tracing;

pub mod observability;
pub mod types;
pub mod validation;

pub use validation::{ValidationError, ValidationResult};

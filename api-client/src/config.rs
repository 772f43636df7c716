//! Connection settings for the two backends

use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PROJECTS_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the bounty marketplace API
    pub api_url: String,
    /// Base URL of the project-management API
    pub projects_api_url: String,
    /// Bearer token sent to the project-management API
    pub projects_token: Option<String>,
    pub timeout_seconds: u64,
    /// Extra attempts for idempotent reads
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub circuit_breaker_threshold: u32,
    pub circuit_breaker_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            projects_api_url: DEFAULT_PROJECTS_API_URL.to_string(),
            projects_token: None,
            timeout_seconds: 30,
            max_retries: 2,
            retry_delay_ms: 500,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_seconds: 60,
            user_agent: format!("agora-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ClientResult<()> {
        validate_base_url("api_url", &self.api_url)?;
        validate_base_url("projects_api_url", &self.projects_api_url)?;

        if self.timeout_seconds == 0 {
            return Err(ClientError::Configuration(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.circuit_breaker_threshold == 0 {
            return Err(ClientError::Configuration(
                "circuit_breaker_threshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accepts absolute http(s) URLs only
pub fn validate_base_url(field: &str, value: &str) -> ClientResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ClientError::Configuration(format!("{} '{}' is invalid: {}", field, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::Configuration(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}

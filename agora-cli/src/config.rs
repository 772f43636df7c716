use agora_client::config::{
    validate_base_url, DEFAULT_API_URL, DEFAULT_PROJECTS_API_URL, DEFAULT_STRIPE_API_URL,
};
use agora_client::ClientConfig;
use agora_shared::observability::{LogConfig, LogFormat, LogLevel};
use agora_shared::types::GeoLocation;
use agora_shared::validation::validate_coordinates;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub payments: PaymentConfig,
    pub location: LocationConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub projects_url: String,
    pub projects_token: Option<String>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub circuit_breaker_threshold: u32,
    pub circuit_breaker_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Card payouts are unavailable without a publishable key
    pub stripe_publishable_key: Option<String>,
    pub stripe_api_url: String,
}

/// Stand-in for device geolocation when submitting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub default_latitude: Option<f64>,
    pub default_longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            url: DEFAULT_API_URL.to_string(),
            projects_url: DEFAULT_PROJECTS_API_URL.to_string(),
            projects_token: None,
            timeout_seconds: 30,
            max_retries: 2,
            retry_delay_ms: 500,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout: 60,
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        PaymentConfig {
            stripe_publishable_key: None,
            stripe_api_url: DEFAULT_STRIPE_API_URL.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            file: default_session_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

fn default_session_file() -> PathBuf {
    let home = env::var("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".agora").join("session.toml")
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidConfig(format!("{} has an invalid value '{}'", key, value))),
        Err(_) => Ok(default),
    }
}

fn env_optional<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidConfig(format!("{} has an invalid value '{}'", key, value))),
        _ => Ok(None),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        Ok(Config {
            api: ApiConfig {
                url: env::var("AGORA_API_URL").unwrap_or(defaults.url),
                projects_url: env::var("AGORA_PROJECTS_API_URL").unwrap_or(defaults.projects_url),
                projects_token: env::var("AGORA_PROJECTS_TOKEN").ok().filter(|t| !t.is_empty()),
                timeout_seconds: env_parse("AGORA_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
                max_retries: env_parse("AGORA_MAX_RETRIES", defaults.max_retries)?,
                retry_delay_ms: env_parse("AGORA_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
                circuit_breaker_threshold: env_parse(
                    "AGORA_CIRCUIT_BREAKER_THRESHOLD",
                    defaults.circuit_breaker_threshold,
                )?,
                circuit_breaker_timeout: env_parse(
                    "AGORA_CIRCUIT_BREAKER_TIMEOUT",
                    defaults.circuit_breaker_timeout,
                )?,
            },
            payments: PaymentConfig {
                stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").ok().filter(|k| !k.is_empty()),
                stripe_api_url: env::var("STRIPE_API_URL")
                    .unwrap_or_else(|_| DEFAULT_STRIPE_API_URL.to_string()),
            },
            location: LocationConfig {
                default_latitude: env_optional("AGORA_DEFAULT_LATITUDE")?,
                default_longitude: env_optional("AGORA_DEFAULT_LONGITUDE")?,
            },
            session: SessionConfig {
                file: env::var("AGORA_SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_session_file()),
            },
            logging: LoggingConfig {
                level: env::var("AGORA_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
                format: env::var("AGORA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("api.url", &self.api.url).map_err(invalid)?;
        validate_base_url("api.projects_url", &self.api.projects_url).map_err(invalid)?;
        validate_base_url("payments.stripe_api_url", &self.payments.stripe_api_url).map_err(invalid)?;

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfig("Timeout must be > 0".to_string()));
        }
        if self.api.circuit_breaker_threshold == 0 {
            return Err(ConfigError::InvalidConfig(
                "Circuit breaker threshold must be > 0".to_string(),
            ));
        }

        match (self.location.default_latitude, self.location.default_longitude) {
            (Some(latitude), Some(longitude)) => validate_coordinates(latitude, longitude)
                .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?,
            (None, None) => {}
            _ => {
                return Err(ConfigError::InvalidConfig(
                    "Default latitude and longitude must be set together".to_string(),
                ))
            }
        }

        self.log_config()?;
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api.url.clone(),
            projects_api_url: self.api.projects_url.clone(),
            projects_token: self.api.projects_token.clone(),
            timeout_seconds: self.api.timeout_seconds,
            max_retries: self.api.max_retries,
            retry_delay_ms: self.api.retry_delay_ms,
            circuit_breaker_threshold: self.api.circuit_breaker_threshold,
            circuit_breaker_timeout_seconds: self.api.circuit_breaker_timeout,
            ..ClientConfig::default()
        }
    }

    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        let level = LogLevel::from_str(&self.logging.level)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        let format = LogFormat::from_str(&self.logging.format)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        Ok(LogConfig {
            level,
            format,
            ..LogConfig::default()
        })
    }

    pub fn default_location(&self) -> Option<GeoLocation> {
        match (self.location.default_latitude, self.location.default_longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation::new(latitude, longitude)),
            _ => None,
        }
    }
}

fn invalid(err: agora_client::ClientError) -> ConfigError {
    ConfigError::InvalidConfig(err.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.url, "http://127.0.0.1:8080");
        assert_eq!(config.api.projects_url, "http://localhost:5000");
        assert_eq!(config.api.max_retries, 2);
        assert!(config.session.file.ends_with(".agora/session.toml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nurl = \"https://agora.example.org\"\n\n[location]\ndefault_latitude = 51.5\ndefault_longitude = -0.12\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.url, "https://agora.example.org");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.default_location(), Some(GeoLocation::new(51.5, -0.12)));
        assert_eq!(config.log_config().unwrap().format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/agora.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        config.api.url = "localhost:8080".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.location.default_latitude = Some(10.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.location.default_latitude = Some(100.0);
        config.location.default_longitude = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_mapping() {
        let mut config = Config::default();
        config.api.projects_token = Some("tok".to_string());
        config.api.circuit_breaker_timeout = 5;

        let client = config.client_config();
        assert_eq!(client.projects_token.as_deref(), Some("tok"));
        assert_eq!(client.circuit_breaker_timeout_seconds, 5);
    }
}

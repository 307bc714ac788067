//! Client configuration
//!
//! `TursoConfig` carries the credentials and HTTP tuning for a client:
//! the platform API token, the default organization slug, and the base URL.
//! Config is loaded from a JSON file, from environment variables, or both
//! (environment variables win).

use crate::error::{Error, Result, ResultExt};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default base URL for the Turso Platform API
pub const DEFAULT_BASE_URL: &str = "https://api.turso.tech/v1";

/// Environment variable for the API token
pub const ENV_API_TOKEN: &str = "TURSO_API_TOKEN";

/// Environment variable for the organization slug
pub const ENV_ORGANIZATION: &str = "TURSO_ORGANIZATION";

/// Environment variable for the base URL
pub const ENV_BASE_URL: &str = "TURSO_BASE_URL";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TursoConfig {
    /// Platform API token (mint via `turso auth api-tokens mint <name>`)
    #[serde(default)]
    pub api_token: String,

    /// Organization slug (e.g. "personal", "my-org")
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Base URL for all API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client tuning
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_organization() -> String {
    "personal".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for TursoConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            organization: default_organization(),
            base_url: default_base_url(),
            http: HttpSettings::default(),
        }
    }
}

impl TursoConfig {
    /// Create a config with the given token and organization
    pub fn new(api_token: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            organization: organization.into(),
            ..Default::default()
        }
    }

    /// Load config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&contents).context("failed to parse config file")?;
        Ok(config)
    }

    /// Build config from environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load config from an optional file, then overlay environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables onto this config
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            if !token.is_empty() {
                self.api_token = token;
            }
        }
        if let Ok(org) = std::env::var(ENV_ORGANIZATION) {
            if !org.is_empty() {
                self.organization = org;
            }
        }
        if let Ok(base) = std::env::var(ENV_BASE_URL) {
            if !base.is_empty() {
                self.base_url = base;
            }
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_empty() {
            return Err(Error::missing_field("api_token"));
        }
        if self.organization.is_empty() {
            return Err(Error::missing_field("organization"));
        }
        url::Url::parse(&self.base_url).map_err(|e| Error::InvalidConfigValue {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Override the base URL (useful for tests against a mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffSettings,

    /// Rate limiting configuration (None disables the limiter)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitSettings>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffSettings::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimitSettings> {
    Some(RateLimitSettings::default())
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffSettings {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60_000
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size (max tokens in bucket)
    #[serde(default = "default_rps")]
    pub burst_size: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_rps(),
        }
    }
}

fn default_rps() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let json = r#"{ "api_token": "ts_abc123" }"#;
        let config: TursoConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_token, "ts_abc123");
        assert_eq!(config.organization, "personal");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "api_token": "ts_abc123",
            "organization": "acme",
            "base_url": "https://api.example.com/v1",
            "http": {
                "timeout_seconds": 60,
                "max_retries": 5,
                "backoff": { "type": "linear", "initial_ms": 200 },
                "rate_limit": { "requests_per_second": 20, "burst_size": 5 }
            }
        }"#;
        let config: TursoConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.organization, "acme");
        assert_eq!(config.http.timeout_seconds, 60);
        assert_eq!(config.http.max_retries, 5);
        assert_eq!(config.http.backoff.backoff_type, BackoffType::Linear);
        assert_eq!(config.http.backoff.initial_ms, 200);
        assert_eq!(config.http.backoff.max_ms, 60_000);
        let rl = config.http.rate_limit.unwrap();
        assert_eq!(rl.requests_per_second, 20);
        assert_eq!(rl.burst_size, 5);
    }

    #[test]
    fn test_validate_missing_token() {
        let config = TursoConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }

    #[test]
    fn test_validate_bad_base_url() {
        let config = TursoConfig::new("ts_abc", "personal").with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_default_http_settings() {
        let settings = HttpSettings::default();
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(settings.max_retries, 3);
        assert!(settings.rate_limit.is_some());
    }
}

//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DAISY_API_URL` - Backend REST base URL (default: `http://localhost:5000/api`)
//! - `DAISY_STORAGE_PATH` - Durable key-value store file (default: `daisy-storage.json`)

use std::path::PathBuf;

use thiserror::Error;

/// Default backend base URL when `DAISY_API_URL` is unset.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default durable store file when `DAISY_STORAGE_PATH` is unset.
const DEFAULT_STORAGE_PATH: &str = "daisy-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend REST base URL, without a trailing slash.
    pub api_url: String,
    /// Path of the durable key-value store file.
    pub storage_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DAISY_API_URL` is set but is not a valid
    /// absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_base_url(&get_env_or_default("DAISY_API_URL", DEFAULT_API_URL))?;
        let storage_path =
            PathBuf::from(get_env_or_default("DAISY_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            api_url,
            storage_path,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a base URL and strip any trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("DAISY_API_URL".to_string(), e.to_string()))?;
    if !parsed.has_host() {
        return Err(ConfigError::InvalidEnvVar(
            "DAISY_API_URL".to_string(),
            "URL must have a host".to_string(),
        ));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

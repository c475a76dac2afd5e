//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STYLEHUB_API_BASE_URL` - Base URL of the StyleHub API (absolute http(s) URL)
//!
//! ## Optional
//! - `STYLEHUB_SESSION_FILE` - Path of the durable session file
//!   (default: `~/.stylehub/session.json`, or `.stylehub/session.json` under
//!   the working directory when no home directory is available)
//! - `STYLEHUB_CATALOG_CACHE_SECS` - Catalog cache TTL in seconds (default: 300)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_CACHE_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// StyleHub client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote StyleHub API.
    pub api_base_url: Url,
    /// Path of the durable session file (the localStorage analogue).
    pub session_file: PathBuf,
    /// Time-to-live for cached catalog reads, in seconds.
    pub catalog_cache_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_required_env("STYLEHUB_API_BASE_URL")?)?;

        let session_file = std::env::var("STYLEHUB_SESSION_FILE")
            .map_or_else(|_| default_session_file(), PathBuf::from);

        let catalog_cache_secs = match std::env::var("STYLEHUB_CATALOG_CACHE_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("STYLEHUB_CATALOG_CACHE_SECS".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_CATALOG_CACHE_SECS,
        };

        Ok(Self {
            api_base_url,
            session_file,
            catalog_cache_secs,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Parse and validate the API base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("STYLEHUB_API_BASE_URL".to_owned(), e.to_string())
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            "STYLEHUB_API_BASE_URL".to_owned(),
            format!("expected an http(s) URL, got scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Default session file location.
///
/// `$HOME/.stylehub/session.json` when a home directory exists, otherwise a
/// `.stylehub` directory under the working directory.
fn default_session_file() -> PathBuf {
    std::env::home_dir().map_or_else(
        || PathBuf::from(".stylehub"),
        |home| home.join(".stylehub"),
    )
    .join("session.json")
}

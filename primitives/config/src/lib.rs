#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Jito Client Configuration
//!
//! This crate handles loading and saving the TOML file that tells the client:
//! - which block-engine endpoint to talk to
//! - which environment variable holds the optional auth UUID
//! - how long a single request may take
//! - how verbose logging should be
//!
//! A missing file is not an error when the default location is used; the
//! built-in defaults point at the public mainnet block engine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public mainnet bundle endpoint.
pub const DEFAULT_BASE_URL: &str = "https://mainnet.block-engine.jito.wtf/api/v1/bundles";

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// JSON-RPC endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the auth UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid_var: Option<String>,
    /// Per-request timeout in seconds; no timeout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (e.g. "info", "jito_client=debug")
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }

fn default_level() -> String { "info".to_string() }

impl Default for EndpointConfig {
    fn default() -> Self { Self { base_url: default_base_url(), uuid_var: None, timeout_secs: None } }
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: default_level() } }
}

impl EndpointConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/jito/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("jito");
        Ok(config_dir.join("config.toml"))
    }

    /// Loads `path` when given (it must exist), otherwise the file at
    /// [`Config::default_path`] if present, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_or_default_internal(path, Self::default_path().ok())
    }

    /// Internal function for testing - allows injection of the default location
    fn load_or_default_internal(
        path: Option<&Path>,
        default_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::from_file(path);
        }

        match default_path {
            Some(default_path) if default_path.exists() => Self::from_file(default_path),
            _ => Ok(Self::default()),
        }
    }
}

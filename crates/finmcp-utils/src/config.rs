//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading process configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected 'pretty' or 'json'")),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info,finmcp_stock=debug`
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name, reported as the MCP server name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-market".to_string(),
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    ///
    /// Recognised keys: `FINMCP_APP_NAME`, `FINMCP_ENV`, `FINMCP_LOG`
    /// (falls back to `RUST_LOG`) and `FINMCP_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let format = match lookup("FINMCP_LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "FINMCP_LOG_FORMAT".to_string(),
                value: raw.clone(),
                reason,
            })?,
            None => defaults.logging.format,
        };

        Ok(Self {
            app_name: lookup("FINMCP_APP_NAME").unwrap_or(defaults.app_name),
            environment: lookup("FINMCP_ENV").unwrap_or(defaults.environment),
            logging: LoggingConfig {
                filter: lookup("FINMCP_LOG")
                    .or_else(|| lookup("RUST_LOG"))
                    .unwrap_or(defaults.logging.filter),
                format,
            },
        })
    }
}

/// Load a `.env` file from the working directory or its parents
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

//! Environment-driven server configuration.

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_GENERAL_QUOTES: &str = "data/quotes.json";
pub const DEFAULT_SCIFI_QUOTES: &str = "data/sci-fi-quotes.json";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for the quote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// General quotes file (JSON array of `"text - author, source"` strings).
    pub general_quotes: PathBuf,
    /// Sci-fi quotes file (`{ "quotes": [{ line, name, source }] }`).
    pub scifi_quotes: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "invalid PORT value: {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            general_quotes: PathBuf::from(DEFAULT_GENERAL_QUOTES),
            scifi_quotes: PathBuf::from(DEFAULT_SCIFI_QUOTES),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("QUOTEHUB_HOST").unwrap_or(defaults.host),
            port,
            general_quotes: lookup("QUOTEHUB_GENERAL_QUOTES")
                .map(PathBuf::from)
                .unwrap_or(defaults.general_quotes),
            scifi_quotes: lookup("QUOTEHUB_SCIFI_QUOTES")
                .map(PathBuf::from)
                .unwrap_or(defaults.scifi_quotes),
            log_filter: lookup("QUOTEHUB_LOG").unwrap_or(defaults.log_filter),
        })
    }

    /// Address to bind, e.g. `"0.0.0.0:3000"`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

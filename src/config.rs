//! Configuration management for the cite binary

use std::env;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// tracing filter directive
    pub log_filter: String,
    /// Sort unordered works before extracting from them
    pub auto_sort: bool,
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: "cite_passages=info,cite=info".to_string(),
            auto_sort: false,
            output: OutputFormat::Json,
        }
    }
}

impl Config {
    /// Load from the environment
    ///
    /// Invalid values fall back to their own default and are returned
    /// alongside the config so the caller can report them.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let mut config = Config::default();
        let mut errors = Vec::new();

        if let Some(filter) = lookup("CITE_LOG") {
            config.log_filter = filter;
        }

        if let Some(value) = lookup("CITE_AUTO_SORT") {
            match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.auto_sort = true,
                "0" | "false" | "no" => config.auto_sort = false,
                _ => errors.push(ConfigError::InvalidValue {
                    key: "CITE_AUTO_SORT",
                    value,
                }),
            }
        }

        if let Some(value) = lookup("CITE_OUTPUT") {
            match value.to_ascii_lowercase().as_str() {
                "json" => config.output = OutputFormat::Json,
                "text" => config.output = OutputFormat::Text,
                _ => errors.push(ConfigError::InvalidValue {
                    key: "CITE_OUTPUT",
                    value,
                }),
            }
        }

        (config, errors)
    }
}

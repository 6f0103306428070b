//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read plan catalog {path}: {source}")]
    PlanCatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid plan catalog {path}: {source}")]
    PlanCatalog {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("chars_per_token must be at least 1")]
    InvalidCharsPerToken,

    #[error("chars_per_page and chars_per_minute must be at least 1")]
    InvalidUnitSize,

    #[error("Rate limit window must be at least 1 second")]
    InvalidRateLimitWindow,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

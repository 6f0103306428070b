//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STUDY_GATE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working setup
//! with the standard plan catalog.
//!
//! # Example
//!
//! ```no_run
//! use study_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let engine = config.engine().expect("Failed to build admission engine");
//! let limiter = config.rate_limiter();
//! ```

mod error;
mod estimation;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use estimation::EstimationConfig;
pub use logging::{init_tracing, LoggingConfig};

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
use crate::domain::admission::AdmissionEngine;
use crate::domain::plan::PlanCatalog;

const ENV_PREFIX: &str = "STUDY_GATE";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Token estimation constants
    #[serde(default)]
    pub estimation: EstimationConfig,

    /// Short-window throttling per action
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// YAML file replacing the standard plan catalog
    #[serde(default)]
    pub plans_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STUDY_GATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `STUDY_GATE__ESTIMATION__CHARS_PER_TOKEN=4` -> `estimation.chars_per_token = 4`
    /// - `STUDY_GATE__RATE_LIMIT__PER_ACTION__GENERATE_CHAT_REPLY=30`
    /// - `STUDY_GATE__PLANS_FILE=/etc/study-gate/plans.yaml`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables layered on top
    ///
    /// The format is taken from the file extension (`.toml`, `.yaml`, `.json`).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.estimation.validate()?;
        if self.rate_limit.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        self.logging.validate()?;
        Ok(())
    }

    /// The plan catalog: the standard one, or the one in `plans_file`
    ///
    /// A custom catalog where a higher tier is stricter than a lower one on
    /// some limit is accepted but logged.
    pub fn plan_catalog(&self) -> Result<PlanCatalog, ConfigError> {
        let Some(path) = &self.plans_file else {
            return Ok(PlanCatalog::standard());
        };

        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::PlanCatalogIo {
            path: path.clone(),
            source,
        })?;
        let catalog =
            PlanCatalog::from_yaml_str(&yaml).map_err(|source| ConfigError::PlanCatalog {
                path: path.clone(),
                source,
            })?;

        if !catalog.is_monotonic() {
            tracing::warn!(
                path = %path.display(),
                "Plan catalog is not monotonic: an upgrade can tighten some limit"
            );
        }

        Ok(catalog)
    }

    /// Build the admission engine from the configured catalog and estimator
    pub fn engine(&self) -> Result<AdmissionEngine, ConfigError> {
        Ok(AdmissionEngine::new(
            self.plan_catalog()?,
            self.estimation.estimator(),
        ))
    }

    /// Build the rate limiter from the configured window and per-action limits
    pub fn rate_limiter(&self) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(self.rate_limit.clone())
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}

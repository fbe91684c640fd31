//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple
//! sources with a clear precedence order. Configuration can come from
//! default values, configuration files, and environment variables.

use crate::{Cli, schedule::Scheduler};
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Database configuration (file path, creation behavior)
    #[serde(default)]
    pub database: fra_sqlite::config::SqliteConfig,

    /// Marketplace parameters (default auction window, unit lead fee)
    #[serde(default)]
    pub market: fra_core::models::MarketConfig,

    /// Expiry sweep scheduling configuration
    #[serde(default)]
    pub schedule: Scheduler,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Set the database file via environment variable
    /// export APP_DATABASE__DATABASE_PATH="/data/market.db"
    ///
    /// # Shorten the default auction window (staging environments)
    /// export APP_MARKET__DEFAULT_WINDOW="10m"
    ///
    /// # Set the sweep interval
    /// export APP_SCHEDULE__EVERY="5m"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps APP_SCHEDULE__EVERY to schedule.every
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    logging::LoggingConfig,
    rollup::{RollupConfig, ROLLUP_SERVER_URL_ENV},
};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rollup: RollupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional config file and the environment
    ///
    /// Load order:
    /// 1. Default configuration
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (prefix: ROSTER__)
    /// 4. `ROLLUP_HTTP_SERVER_URL`
    ///
    /// A missing server URL is a startup error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let server_url = std::env::var(ROLLUP_SERVER_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty());
        Self::load_from(config_path, server_url)
    }

    /// Same as [`AppConfig::load`] with the server URL override passed explicitly.
    pub fn load_from(config_path: Option<&str>, server_url: Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("rollup.server_url", defaults.rollup.server_url)?
            .set_default("rollup.idle_backoff_ms", defaults.rollup.idle_backoff_ms)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format.to_string())?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(anyhow::anyhow!("Config file not found: {}", path));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = server_url {
            builder = builder.set_override("rollup.server_url", url)?;
        }

        let config: AppConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("Failed to parse TOML config")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    pub fn validate(&self) -> Result<()> {
        self.rollup
            .validate()
            .context("Rollup configuration is invalid")?;
        self.logging
            .validate()
            .context("Logging configuration is invalid")?;
        Ok(())
    }
}

//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTHINET` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use healthinet::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.bind_addr());
//! ```

mod analysis;
mod error;
mod geo;
mod pipeline;
mod server;

pub use analysis::{AnalysisConfig, AnalysisProviderKind};
pub use error::{ConfigError, ValidationError};
pub use geo::GeoConfig;
pub use pipeline::PipelineConfig;
pub use server::{CorsPolicy, Environment, ServerConfig};

use serde::Deserialize;

use crate::application::PipelineSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// demo server. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener, CORS and session lifetime
    #[serde(default)]
    pub server: ServerConfig,

    /// Symptom analysis provider
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Routing limits
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Simulated caller position
    #[serde(default)]
    pub geo: GeoConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEALTHINET` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTHINET__SERVER__PORT=5000` -> `server.port = 5000`
    /// - `HEALTHINET__ANALYSIS__PROVIDER=keyword` -> `analysis.provider = keyword`
    /// - `HEALTHINET__SERVER__CORS_ORIGIN=*` -> `server.cors_origin = "*"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEALTHINET")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.analysis.validate()?;
        self.pipeline.validate()?;
        self.geo.validate()?;
        Ok(())
    }

    /// Per-turn limits handed to every conversation.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_hops: self.pipeline.max_hops,
            provider_timeout: self.analysis.timeout(),
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

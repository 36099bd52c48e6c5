//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid turn timeout")]
    InvalidTimeout,

    #[error("Session idle timeout must be at least {min} seconds")]
    SessionIdleTooShort { min: u64 },

    #[error("CORS origin must include an http or https scheme: {0}")]
    InvalidOrigin(String),

    #[error("Provider timeout must be between 1 and {max} ms")]
    InvalidProviderTimeout { max: u64 },

    #[error("Hop ceiling must be at least {min}")]
    HopCeilingTooLow { min: usize },

    #[error("Coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Location accuracy must be positive")]
    InvalidAccuracy,
}

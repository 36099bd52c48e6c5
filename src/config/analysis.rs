//! Symptom analysis provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for a single provider call.
const MAX_TIMEOUT_MS: u64 = 120_000;

/// Analysis provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Which provider answers analysis requests
    #[serde(default)]
    pub provider: AnalysisProviderKind,

    /// Deadline per provider call in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Artificial latency added to mock answers
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

/// Analysis provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisProviderKind {
    /// Canned demo answers
    #[default]
    Mock,
    /// Keyword matching on the symptom text
    Keyword,
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ValidationError::InvalidProviderTimeout {
                max: MAX_TIMEOUT_MS,
            });
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: AnalysisProviderKind::default(),
            timeout_ms: default_timeout_ms(),
            simulated_latency_ms: 0,
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.provider, AnalysisProviderKind::Mock);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.simulated_latency(), Duration::ZERO);
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AnalysisConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_timeout() {
        let config = AnalysisConfig {
            timeout_ms: 600_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidProviderTimeout { max: 120_000 })
        );
    }
}

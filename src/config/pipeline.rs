//! Triage pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Fewest hops that still let the full agent chain run.
const MIN_HOPS: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum agent invocations per turn
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_hops < MIN_HOPS {
            return Err(ValidationError::HopCeilingTooLow { min: MIN_HOPS });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
        }
    }
}

fn default_max_hops() -> usize {
    10
}

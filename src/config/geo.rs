//! Simulated caller position

use serde::Deserialize;

use super::error::ValidationError;

/// Position reported by the fixed location provider
#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Accuracy radius in meters
    #[serde(default = "default_accuracy")]
    pub accuracy_m: f64,

    /// Report no position at all, as when the caller refuses sharing it
    #[serde(default)]
    pub disabled: bool,
}

impl GeoConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(ValidationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if self.accuracy_m <= 0.0 {
            return Err(ValidationError::InvalidAccuracy);
        }
        Ok(())
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            accuracy_m: default_accuracy(),
            disabled: false,
        }
    }
}

// Central Tunis
fn default_latitude() -> f64 {
    36.8065
}

fn default_longitude() -> f64 {
    10.1815
}

fn default_accuracy() -> f64 {
    100.0
}

//! Location providers.

use async_trait::async_trait;

use crate::domain::triage::GeoPoint;
use crate::ports::{LocationProvider, ProviderError};

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocationProvider {
    point: GeoPoint,
}

impl FixedLocationProvider {
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f64>) -> Self {
        Self {
            point: GeoPoint {
                latitude,
                longitude,
                accuracy,
            },
        }
    }

    /// Simulated position in central Tunis, 100 m accuracy.
    pub fn tunis() -> Self {
        Self::new(36.8065, 10.1815, Some(100.0))
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<Option<GeoPoint>, ProviderError> {
        Ok(Some(self.point))
    }
}

/// Caller who did not share a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationProvider;

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn current_location(&self) -> Result<Option<GeoPoint>, ProviderError> {
        Ok(None)
    }
}

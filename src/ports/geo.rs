//! Geolocation ports - caller position and facility search.

use async_trait::async_trait;

use crate::domain::triage::{Facility, GeoPoint};

use super::ProviderError;

/// Source of the caller's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns `Ok(None)` when no position is available (e.g. not shared).
    async fn current_location(&self) -> Result<Option<GeoPoint>, ProviderError>;
}

/// Directory of medical facilities.
#[async_trait]
pub trait FacilityLocator: Send + Sync {
    /// Facilities near `location` that may offer `specialist_type`.
    ///
    /// Implementations may return a superset; callers filter and sort.
    async fn find(
        &self,
        location: &GeoPoint,
        specialist_type: &str,
    ) -> Result<Vec<Facility>, ProviderError>;
}

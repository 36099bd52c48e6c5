//! Mock Facility Locator.
//!
//! Serves a fixed catalog of establishments instead of querying a mapping
//! service. The catalog is returned unfiltered; the caller filters by
//! specialty and sorts by distance.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::triage::{Facility, GeoPoint, LatLng};
use crate::ports::{FacilityLocator, ProviderError};

fn facility(
    name: &str,
    address: &str,
    specialties: &[&str],
    distance: f64,
    rating: f32,
    lat: f64,
    lng: f64,
) -> Facility {
    Facility {
        name: name.to_string(),
        address: address.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        distance,
        rating,
        location: LatLng { lat, lng },
    }
}

/// Establishments around central Tunis.
pub fn tunis_catalog() -> Vec<Facility> {
    vec![
        facility(
            "Centre Médical El Manzah",
            "15 Avenue Habib Bourguiba, Tunis",
            &["general", "cardiologist", "neurologist"],
            1.2,
            4.5,
            36.8165,
            10.1915,
        ),
        facility(
            "Clinique La Soukra",
            "42 Rue de Carthage, Tunis",
            &["neurologist", "dermatologist", "ophthalmologist"],
            2.3,
            4.8,
            36.8265,
            10.2015,
        ),
        facility(
            "Hôpital Charles Nicolle",
            "78 Boulevard Bab Saadoun, Tunis",
            &["general", "cardiologist", "neurologist", "oncologist", "emergency"],
            3.1,
            4.2,
            36.7965,
            10.1715,
        ),
        facility(
            "Dr. Ahmed Ben Salah",
            "150 Rue de Marseille, Tunis",
            &["dermatologist", "general"],
            1.9,
            4.9,
            36.8365,
            10.1615,
        ),
    ]
}

/// Catalog-backed facility locator.
#[derive(Debug, Clone)]
pub struct MockFacilityLocator {
    catalog: Vec<Facility>,
    failure: Option<ProviderError>,
    delay: Duration,
    /// Specialist types searched, in call order.
    searches: Arc<Mutex<Vec<String>>>,
}

impl MockFacilityLocator {
    pub fn with_catalog(catalog: Vec<Facility>) -> Self {
        Self {
            catalog,
            failure: None,
            delay: Duration::ZERO,
            searches: Arc::default(),
        }
    }

    pub fn tunis() -> Self {
        Self::with_catalog(tunis_catalog())
    }

    /// Makes every search fail with `error`.
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sets simulated latency per search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockFacilityLocator {
    fn default() -> Self {
        Self::tunis()
    }
}

#[async_trait]
impl FacilityLocator for MockFacilityLocator {
    async fn find(
        &self,
        _location: &GeoPoint,
        specialist_type: &str,
    ) -> Result<Vec<Facility>, ProviderError> {
        self.searches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(specialist_type.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.catalog.clone()),
        }
    }
}

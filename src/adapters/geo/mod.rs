//! Geolocation Adapters.
//!
//! - `FixedLocationProvider` - Reports a configured position
//! - `UnavailableLocationProvider` - Reports no position
//! - `MockFacilityLocator` - Fixed facility catalog

mod facility_locator;
mod location;

pub use facility_locator::{tunis_catalog, MockFacilityLocator};
pub use location::{FixedLocationProvider, UnavailableLocationProvider};

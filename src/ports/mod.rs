//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the triage pipeline and the outside world. Adapters implement these ports.
//!
//! - `AnalysisProvider` - Symptom analysis, specialist and urgency assessment
//! - `LocationProvider` - Caller position lookup
//! - `FacilityLocator` - Nearby medical facility search

mod analysis_provider;
mod geo;
mod provider_error;

pub use analysis_provider::{AnalysisProvider, ProviderInfo};
pub use geo::{FacilityLocator, LocationProvider};
pub use provider_error::ProviderError;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the triage pipeline to the outside world:
//! - `analysis` - Symptom analysis providers (canned, keyword)
//! - `geo` - Location and facility lookup
//! - `session` - Live conversation registry
//! - `http` - REST surface

pub mod analysis;
pub mod geo;
pub mod http;
pub mod session;

pub use analysis::{KeywordAnalysisProvider, MockAnalysisProvider};
pub use geo::{FixedLocationProvider, MockFacilityLocator, UnavailableLocationProvider};
pub use session::InMemoryConversationRegistry;

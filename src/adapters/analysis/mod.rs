//! Analysis Provider Adapters.
//!
//! Implementations of the AnalysisProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAnalysisProvider` - Canned demo answers, scripting and error injection
//! - `KeywordAnalysisProvider` - Deterministic keyword matching

mod keyword_provider;
mod mock_provider;

pub use keyword_provider::KeywordAnalysisProvider;
pub use mock_provider::{MockAnalysisProvider, MockCall};

//! Analysis Provider Port - Interface for symptom analysis backends.
//!
//! This port abstracts whatever turns free text into medical suggestions:
//! hard-coded demo answers, keyword matching, or a real NLP/LLM service.
//! Agents depend on this trait only, so a backend can be swapped without
//! touching the pipeline.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct AlwaysEmpty;
//!
//! #[async_trait]
//! impl AnalysisProvider for AlwaysEmpty {
//!     async fn analyze_symptoms(&self, _: &str, _: &UserInfo) -> Result<SymptomAnalysis, ProviderError> {
//!         Ok(SymptomAnalysis::new(vec![]))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::triage::{
    Condition, SpecialistRecommendation, SymptomAnalysis, UrgencyAssessment, UserInfo,
};

use super::ProviderError;

/// Port for symptom analysis.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Candidate conditions for a free-text symptom description.
    async fn analyze_symptoms(
        &self,
        symptoms: &str,
        user_info: &UserInfo,
    ) -> Result<SymptomAnalysis, ProviderError>;

    /// Specialist to consult for the given conditions.
    async fn recommend_specialist(
        &self,
        conditions: &[Condition],
        user_info: &UserInfo,
    ) -> Result<SpecialistRecommendation, ProviderError>;

    /// Urgency rating of the described symptoms.
    async fn evaluate_urgency(
        &self,
        symptoms: &str,
        conditions: &[Condition],
    ) -> Result<UrgencyAssessment, ProviderError>;

    /// Get provider information (name, strategy).
    fn provider_info(&self) -> ProviderInfo;
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "mock", "keyword").
    pub name: String,
    /// Short description of how answers are produced.
    pub strategy: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: strategy.into(),
        }
    }
}

//! Mock Analysis Provider.
//!
//! Configurable implementation of the AnalysisProvider port that answers
//! with the demo's canned results, so the pipeline runs end to end without
//! a real analysis backend.
//!
//! # Features
//!
//! - Canned JSON answers when nothing is scripted
//! - Scripted replies per operation (consumed in order)
//! - Error injection and simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAnalysisProvider::new()
//!     .with_analysis(SymptomAnalysis::new(vec![]))
//!     .with_delay(Duration::from_millis(100));
//!
//! let analysis = provider.analyze_symptoms("fièvre", &UserInfo::default()).await?;
//! assert!(analysis.is_empty());
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::triage::{
    Condition, SpecialistRecommendation, SymptomAnalysis, UrgencyAssessment, UserInfo,
};
use crate::ports::{AnalysisProvider, ProviderError, ProviderInfo};

const CANNED_ANALYSIS: &str = r#"{
  "conditions": [
    {
      "name": "Migraine",
      "description": "Céphalée intense et récurrente, souvent accompagnée de nausées et de sensibilité à la lumière",
      "probability": "élevé"
    },
    {
      "name": "Sinusite",
      "description": "Inflammation des sinus paranasaux, souvent causée par une infection",
      "probability": "modéré"
    },
    {
      "name": "Hypertension artérielle",
      "description": "Pression artérielle anormalement élevée dans les vaisseaux sanguins",
      "probability": "faible"
    }
  ],
  "disclaimer": "Ces suggestions sont basées sur les symptômes décrits et ne constituent pas un diagnostic médical. Consultez un professionnel de santé pour un avis médical."
}"#;

const CANNED_RECOMMENDATION: &str = r#"{
  "specialist": {
    "type": "neurologist",
    "title": "Neurologue",
    "description": "Un neurologue est un médecin spécialisé dans le diagnostic et le traitement des maladies du système nerveux."
  },
  "reasoning": "Compte tenu des symptômes de maux de tête sévères et récurrents, une consultation avec un neurologue est recommandée pour évaluer la possibilité de migraines ou d'autres troubles neurologiques."
}"#;

const CANNED_URGENCY: &str = r#"{
  "urgencyLevel": "medium",
  "reasoning": "Les maux de tête persistants avec nausées méritent une attention médicale, mais ne semblent pas présenter de signes de danger immédiat en l'absence d'autres symptômes alarmants.",
  "recommendations": "Il est recommandé de consulter un médecin dans les prochains jours. En attendant, repos, hydratation et analgésiques en vente libre peuvent aider à soulager les symptômes."
}"#;

/// A recorded call to the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    AnalyzeSymptoms { symptoms: String },
    RecommendSpecialist { conditions: Vec<String> },
    EvaluateUrgency { symptoms: String },
}

type Replies<T> = Arc<Mutex<VecDeque<Result<T, ProviderError>>>>;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock analysis provider.
///
/// Clones share scripted replies and call history.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    analyses: Replies<SymptomAnalysis>,
    recommendations: Replies<SpecialistRecommendation>,
    urgencies: Replies<UrgencyAssessment>,
    /// Returned by every call when set.
    failure: Option<ProviderError>,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisProvider {
    /// Creates a provider answering with the canned results.
    pub fn new() -> Self {
        Self {
            analyses: Arc::default(),
            recommendations: Arc::default(),
            urgencies: Arc::default(),
            failure: None,
            delay: Duration::ZERO,
            calls: Arc::default(),
        }
    }

    /// Queues a symptom analysis.
    pub fn with_analysis(self, analysis: SymptomAnalysis) -> Self {
        locked(&self.analyses).push_back(Ok(analysis));
        self
    }

    /// Queues a symptom analysis failure.
    pub fn with_analysis_error(self, error: ProviderError) -> Self {
        locked(&self.analyses).push_back(Err(error));
        self
    }

    /// Queues a specialist recommendation.
    pub fn with_recommendation(self, recommendation: SpecialistRecommendation) -> Self {
        locked(&self.recommendations).push_back(Ok(recommendation));
        self
    }

    /// Queues a specialist recommendation failure.
    pub fn with_recommendation_error(self, error: ProviderError) -> Self {
        locked(&self.recommendations).push_back(Err(error));
        self
    }

    /// Queues an urgency assessment.
    pub fn with_urgency(self, assessment: UrgencyAssessment) -> Self {
        locked(&self.urgencies).push_back(Ok(assessment));
        self
    }

    /// Queues an urgency assessment failure.
    pub fn with_urgency_error(self, error: ProviderError) -> Self {
        locked(&self.urgencies).push_back(Err(error));
        self
    }

    /// Makes every call fail with `error`.
    pub fn failing(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<MockCall> {
        locked(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        locked(&self.calls).clear();
    }

    /// Texts passed to `analyze_symptoms`, in call order.
    pub fn analyzed_texts(&self) -> Vec<String> {
        self.get_calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::AnalyzeSymptoms { symptoms } => Some(symptoms),
                _ => None,
            })
            .collect()
    }

    /// Texts passed to `evaluate_urgency`, in call order.
    pub fn evaluated_texts(&self) -> Vec<String> {
        self.get_calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::EvaluateUrgency { symptoms } => Some(symptoms),
                _ => None,
            })
            .collect()
    }

    async fn answer<T: DeserializeOwned>(
        &self,
        call: MockCall,
        replies: &Replies<T>,
        canned: &str,
    ) -> Result<T, ProviderError> {
        locked(&self.calls).push(call);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let scripted = locked(replies).pop_front();
        match scripted {
            Some(reply) => reply,
            None => Ok(serde_json::from_str(canned)?),
        }
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn analyze_symptoms(
        &self,
        symptoms: &str,
        _user_info: &UserInfo,
    ) -> Result<SymptomAnalysis, ProviderError> {
        let call = MockCall::AnalyzeSymptoms {
            symptoms: symptoms.to_string(),
        };
        self.answer(call, &self.analyses, CANNED_ANALYSIS).await
    }

    async fn recommend_specialist(
        &self,
        conditions: &[Condition],
        _user_info: &UserInfo,
    ) -> Result<SpecialistRecommendation, ProviderError> {
        let call = MockCall::RecommendSpecialist {
            conditions: conditions.iter().map(|c| c.name.clone()).collect(),
        };
        self.answer(call, &self.recommendations, CANNED_RECOMMENDATION)
            .await
    }

    async fn evaluate_urgency(
        &self,
        symptoms: &str,
        _conditions: &[Condition],
    ) -> Result<UrgencyAssessment, ProviderError> {
        let call = MockCall::EvaluateUrgency {
            symptoms: symptoms.to_string(),
        };
        self.answer(call, &self.urgencies, CANNED_URGENCY).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "canned demo answers")
    }
}

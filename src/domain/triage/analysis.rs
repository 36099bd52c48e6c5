//! Results returned by symptom analysis.
//!
//! These are the shapes an analysis backend answers with. They deserialize
//! from the camelCase JSON a model-backed provider would emit.

use serde::{Deserialize, Serialize};

use super::context::{Condition, Specialist, UrgencyLevel};

/// Standard caution appended to every condition list.
pub const MEDICAL_DISCLAIMER: &str = "Ces suggestions sont basées sur les symptômes décrits et ne constituent pas un diagnostic médical. Consultez un professionnel de santé pour un avis médical.";

/// Candidate conditions for a symptom description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

fn default_disclaimer() -> String {
    MEDICAL_DISCLAIMER.to_string()
}

impl SymptomAnalysis {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            disclaimer: default_disclaimer(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Specialist suggested for a set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistRecommendation {
    #[serde(default)]
    pub specialist: Option<Specialist>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Urgency rating with supporting text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyAssessment {
    #[serde(default)]
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::Likelihood;

    #[test]
    fn analysis_without_disclaimer_gets_default() {
        let analysis: SymptomAnalysis = serde_json::from_str(
            r#"{"conditions":[{"name":"Migraine","description":"Céphalée","probability":"élevé"}]}"#,
        )
        .unwrap();

        assert_eq!(analysis.disclaimer, MEDICAL_DISCLAIMER);
        assert_eq!(analysis.conditions[0].probability, Some(Likelihood::High));
    }

    #[test]
    fn recommendation_tolerates_missing_specialist() {
        let rec: SpecialistRecommendation = serde_json::from_str(r#"{"reasoning":"?"}"#).unwrap();

        assert!(rec.specialist.is_none());
    }

    #[test]
    fn urgency_assessment_reads_camel_case_level() {
        let assessment: UrgencyAssessment =
            serde_json::from_str(r#"{"urgencyLevel":"emergency","reasoning":"r"}"#).unwrap();

        assert_eq!(assessment.urgency_level, Some(UrgencyLevel::Emergency));
        assert!(assessment.recommendations.is_none());
    }
}

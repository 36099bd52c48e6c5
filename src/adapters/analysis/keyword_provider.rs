//! Keyword Analysis Provider.
//!
//! Rule-based implementation of the AnalysisProvider port: lowercase
//! substring matching against a small table of symptom families. No model
//! is involved, so answers are deterministic and instant.

use async_trait::async_trait;

use crate::domain::triage::{
    Condition, Specialist, SpecialistRecommendation, SymptomAnalysis, UrgencyAssessment,
    UrgencyLevel, UserInfo,
};
use crate::ports::{AnalysisProvider, ProviderError, ProviderInfo};

struct SymptomFamily {
    keywords: &'static [&'static str],
    conditions: &'static [&'static str],
    specialist_type: &'static str,
    title: &'static str,
    description: &'static str,
}

const FAMILIES: &[SymptomFamily] = &[
    SymptomFamily {
        keywords: &["tête", "migraine", "céphalée"],
        conditions: &["Migraine", "Céphalée de tension", "Sinusite"],
        specialist_type: "neurologist",
        title: "Neurologue",
        description: "Un neurologue est un médecin spécialisé dans le diagnostic et le traitement des maladies du système nerveux.",
    },
    SymptomFamily {
        keywords: &["cœur", "poitrine", "essoufflement"],
        conditions: &["Angine de poitrine", "Hypertension", "Arythmie cardiaque"],
        specialist_type: "cardiologist",
        title: "Cardiologue",
        description: "Un cardiologue est un médecin spécialisé dans le diagnostic et le traitement des maladies du cœur et des vaisseaux sanguins.",
    },
    SymptomFamily {
        keywords: &["peau", "éruption", "démangeaison"],
        conditions: &["Eczéma", "Dermatite", "Urticaire"],
        specialist_type: "dermatologist",
        title: "Dermatologue",
        description: "Un dermatologue est un médecin spécialisé dans le diagnostic et le traitement des maladies de la peau, des cheveux et des ongles.",
    },
];

const UNIDENTIFIED_CONDITION: &str = "Condition non identifiée";

/// Signs that warrant calling emergency services.
const EMERGENCY_SIGNS: &[&str] = &[
    "perte de connaissance",
    "évanoui",
    "inconscient",
    "saignement abondant",
    "hémorragie",
];

const CARDIAC_SIGNS: &[&str] = &["cœur", "poitrine", "essoufflement"];

fn family_for_text(text: &str) -> Option<&'static SymptomFamily> {
    let text = text.to_lowercase();
    FAMILIES
        .iter()
        .find(|family| family.keywords.iter().any(|k| text.contains(k)))
}

fn family_for_conditions(conditions: &[Condition]) -> Option<&'static SymptomFamily> {
    conditions.iter().find_map(|condition| {
        FAMILIES.iter().find(|family| {
            condition.specialist_type.as_deref() == Some(family.specialist_type)
                || family.conditions.contains(&condition.name.as_str())
        })
    })
}

/// Keyword-matching analysis provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalysisProvider;

impl KeywordAnalysisProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisProvider for KeywordAnalysisProvider {
    async fn analyze_symptoms(
        &self,
        symptoms: &str,
        _user_info: &UserInfo,
    ) -> Result<SymptomAnalysis, ProviderError> {
        let lowered = symptoms.to_lowercase();
        let conditions = match family_for_text(symptoms) {
            Some(family) => {
                let matched: Vec<String> = family
                    .keywords
                    .iter()
                    .filter(|k| lowered.contains(*k))
                    .map(|k| k.to_string())
                    .collect();
                family
                    .conditions
                    .iter()
                    .map(|name| Condition {
                        name: name.to_string(),
                        description: String::new(),
                        probability: None,
                        urgency_level: None,
                        specialist_type: Some(family.specialist_type.to_string()),
                        symptoms: Some(matched.clone()),
                    })
                    .collect()
            }
            None => vec![Condition {
                name: UNIDENTIFIED_CONDITION.to_string(),
                description: String::new(),
                probability: None,
                urgency_level: None,
                specialist_type: Some("general".to_string()),
                symptoms: None,
            }],
        };
        Ok(SymptomAnalysis::new(conditions))
    }

    async fn recommend_specialist(
        &self,
        conditions: &[Condition],
        _user_info: &UserInfo,
    ) -> Result<SpecialistRecommendation, ProviderError> {
        let names: Vec<&str> = conditions.iter().map(|c| c.name.as_str()).collect();
        let recommendation = match family_for_conditions(conditions) {
            Some(family) => SpecialistRecommendation {
                specialist: Some(Specialist::new(
                    family.specialist_type,
                    family.title,
                    family.description,
                )),
                reasoning: Some(format!(
                    "Les conditions envisagées ({}) relèvent de la compétence d'un {}.",
                    names.join(", "),
                    family.title
                )),
            },
            None => SpecialistRecommendation {
                specialist: Some(Specialist::general_practitioner()),
                reasoning: Some(
                    "Aucune spécialité précise ne ressort des symptômes décrits ; un médecin généraliste pourra vous orienter."
                        .to_string(),
                ),
            },
        };
        Ok(recommendation)
    }

    async fn evaluate_urgency(
        &self,
        symptoms: &str,
        _conditions: &[Condition],
    ) -> Result<UrgencyAssessment, ProviderError> {
        let text = symptoms.to_lowercase();
        let chest_pain_with_breathlessness =
            text.contains("poitrine") && text.contains("essoufflement");

        let assessment = if chest_pain_with_breathlessness
            || EMERGENCY_SIGNS.iter().any(|s| text.contains(s))
        {
            UrgencyAssessment {
                urgency_level: Some(UrgencyLevel::Emergency),
                reasoning: Some("Les symptômes décrits peuvent signaler une situation mettant la vie en danger.".to_string()),
                recommendations: Some("Ne restez pas seul et ne conduisez pas. Appelez les secours immédiatement.".to_string()),
            }
        } else if CARDIAC_SIGNS.iter().any(|s| text.contains(s)) {
            UrgencyAssessment {
                urgency_level: Some(UrgencyLevel::High),
                reasoning: Some("Des symptômes cardiaques ou respiratoires nécessitent une évaluation rapide.".to_string()),
                recommendations: Some("Évitez les efforts physiques en attendant la consultation.".to_string()),
            }
        } else if family_for_text(&text).is_some() {
            UrgencyAssessment {
                urgency_level: Some(UrgencyLevel::Medium),
                reasoning: Some("Les symptômes décrits méritent une attention médicale sans signe de danger immédiat.".to_string()),
                recommendations: Some("Consultez un médecin dans les prochains jours.".to_string()),
            }
        } else {
            UrgencyAssessment {
                urgency_level: Some(UrgencyLevel::Low),
                reasoning: Some("Aucun signe d'alerte n'a été identifié.".to_string()),
                recommendations: Some("Surveillez l'évolution de vos symptômes.".to_string()),
            }
        };
        Ok(assessment)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("keyword", "lowercase keyword matching")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn analyze(text: &str) -> SymptomAnalysis {
        KeywordAnalysisProvider::new()
            .analyze_symptoms(text, &UserInfo::default())
            .await
            .unwrap()
    }

    async fn urgency(text: &str) -> Option<UrgencyLevel> {
        KeywordAnalysisProvider::new()
            .evaluate_urgency(text, &[])
            .await
            .unwrap()
            .urgency_level
    }

    #[tokio::test]
    async fn headache_maps_to_neurology() {
        let analysis = analyze("J'ai très mal à la TÊTE").await;

        let names: Vec<_> = analysis.conditions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Migraine", "Céphalée de tension", "Sinusite"]);
        assert_eq!(analysis.conditions[0].specialist_type.as_deref(), Some("neurologist"));
        assert_eq!(analysis.conditions[0].symptoms, Some(vec!["tête".to_string()]));
    }

    #[tokio::test]
    async fn skin_maps_to_dermatology() {
        let analysis = analyze("une éruption sur la peau").await;

        assert_eq!(analysis.conditions[0].name, "Eczéma");
    }

    #[tokio::test]
    async fn unknown_text_yields_unidentified_condition() {
        let analysis = analyze("je me sens bizarre").await;

        assert_eq!(analysis.conditions.len(), 1);
        assert_eq!(analysis.conditions[0].name, UNIDENTIFIED_CONDITION);
    }

    #[tokio::test]
    async fn recommendation_follows_condition_family() {
        let analysis = analyze("douleur à la poitrine").await;

        let rec = KeywordAnalysisProvider::new()
            .recommend_specialist(&analysis.conditions, &UserInfo::default())
            .await
            .unwrap();

        let specialist = rec.specialist.unwrap();
        assert_eq!(specialist.specialist_type, "cardiologist");
        assert_eq!(specialist.title, "Cardiologue");
    }

    #[tokio::test]
    async fn unidentified_condition_gets_general_practitioner() {
        let analysis = analyze("je me sens bizarre").await;

        let rec = KeywordAnalysisProvider::new()
            .recommend_specialist(&analysis.conditions, &UserInfo::default())
            .await
            .unwrap();

        assert_eq!(rec.specialist, Some(Specialist::general_practitioner()));
    }

    #[tokio::test]
    async fn urgency_levels_follow_warning_signs() {
        assert_eq!(
            urgency("douleur à la poitrine et essoufflement").await,
            Some(UrgencyLevel::Emergency)
        );
        assert_eq!(urgency("perte de connaissance ce matin").await, Some(UrgencyLevel::Emergency));
        assert_eq!(urgency("palpitations du cœur").await, Some(UrgencyLevel::High));
        assert_eq!(urgency("migraine").await, Some(UrgencyLevel::Medium));
        assert_eq!(urgency("un peu fatigué").await, Some(UrgencyLevel::Low));
    }
}

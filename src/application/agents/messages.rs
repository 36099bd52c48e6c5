//! User-facing French texts produced by the agents.

use crate::domain::triage::{Facility, Specialist, SymptomAnalysis, UrgencyAssessment};

/// Prefix of the contextual memory acknowledgment. Never shown to the user.
pub const CONTEXT_UPDATED: &str = "Contexte de conversation mis à jour";

pub const WELCOME: &str = "Bonjour, je suis votre assistant médical HealthiNet. Comment puis-je vous aider aujourd'hui?";

/// Top-level apology when a turn fails.
pub const TURN_FAILED: &str = "Désolé, j'ai rencontré un problème lors de l'analyse de votre message. Veuillez réessayer.";

// Diagnostic
pub const NO_CONDITIONS: &str = "Je n'ai pas pu identifier de conditions médicales possibles à partir de votre description. Pourriez-vous fournir plus de détails sur vos symptômes?";
pub const NO_CONDITIONS_ERROR: &str = "Aucune condition identifiée";
pub const DIAGNOSIS_FAILED: &str = "Désolé, j'ai rencontré un problème lors de l'analyse de vos symptômes. Veuillez réessayer.";

// Specialist recommendation
pub const NEED_MORE_DETAILS: &str = "Je n'ai pas assez d'informations pour recommander un spécialiste. Veuillez fournir plus de détails sur vos symptômes.";
pub const NO_SPECIALIST: &str = "Je n'ai pas pu déterminer quel spécialiste vous devriez consulter. Je vous recommande de consulter un médecin généraliste qui pourra vous orienter.";
pub const NO_SPECIALIST_ERROR: &str = "Aucun spécialiste recommandé";
pub const RECOMMENDATION_FAILED: &str = "Désolé, j'ai rencontré un problème lors de la recommandation d'un spécialiste. Veuillez réessayer.";

// Emergency
pub const NO_SYMPTOMS_ERROR: &str = "Aucun symptôme à évaluer";
pub const NO_URGENCY_ERROR: &str = "Niveau d'urgence non déterminé";

// Geolocation
pub const LOCATION_UNAVAILABLE: &str = "Impossible d'obtenir votre localisation. Veuillez autoriser l'accès à votre position pour trouver des spécialistes à proximité.";
pub const FACILITY_SEARCH_FAILED: &str = "Erreur lors de la recherche de spécialistes à proximité";

/// Facilities listed in the geolocation message.
const LISTED_FACILITIES: usize = 3;

pub fn diagnosis(analysis: &SymptomAnalysis, age: Option<u32>) -> String {
    let conditions = analysis
        .conditions
        .iter()
        .map(|c| {
            let mut line = format!("- **{}**", c.name);
            if !c.description.is_empty() {
                line.push_str(&format!(": {}", c.description));
            }
            if let Some(p) = c.probability {
                line.push_str(&format!(" (Probabilité: {})", p));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    let opening = match age {
        Some(age) => format!("Pour une personne de {} ans, d'après votre description", age),
        None => "D'après votre description".to_string(),
    };

    format!(
        "{}, voici les conditions médicales possibles :\n\n{}\n\n{}\n\nJe vais maintenant vous recommander le type de spécialiste à consulter.",
        opening, conditions, analysis.disclaimer
    )
}

pub fn recommendation(specialist: &Specialist, reasoning: Option<&str>) -> String {
    let mut parts = vec![
        format!("Je vous recommande de consulter un **{}**.", specialist.title),
    ];
    if !specialist.description.is_empty() {
        parts.push(specialist.description.clone());
    }
    if let Some(reasoning) = reasoning.filter(|r| !r.is_empty()) {
        parts.push(reasoning.to_string());
    }
    parts.push(format!(
        "Vous pouvez trouver des {}s à proximité de votre position en utilisant notre fonctionnalité de géolocalisation.",
        specialist.title
    ));
    parts.join("\n\n")
}

pub fn emergency_warning(assessment: &UrgencyAssessment) -> String {
    format!(
        "⚠️ **ATTENTION - URGENCE MÉDICALE POSSIBLE** ⚠️\n\n{}Si vous présentez ces symptômes, veuillez contacter immédiatement les services d'urgence (15, 18 ou 112) ou rendez-vous aux urgences les plus proches.",
        assessment_body(assessment)
    )
}

pub fn high_urgency_warning(assessment: &UrgencyAssessment) -> String {
    format!(
        "⚠️ **Attention - Consultation rapide recommandée**\n\n{}Il est recommandé de consulter un médecin dans les 24 à 48 heures.",
        assessment_body(assessment)
    )
}

fn assessment_body(assessment: &UrgencyAssessment) -> String {
    [&assessment.reasoning, &assessment.recommendations]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}\n\n", s))
        .collect()
}

pub fn facilities(specialist: &Specialist, facilities: &[Facility]) -> String {
    if facilities.is_empty() {
        return format!(
            "Je n'ai pas trouvé d'établissements proposant des consultations avec un {} à proximité. Vous pouvez élargir votre recherche ou consulter l'annuaire des professionnels de santé.",
            specialist.title
        );
    }

    let listed = facilities
        .iter()
        .take(LISTED_FACILITIES)
        .map(|f| format!("- {} ({} km) - {}", f.name, f.distance, f.address))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "J'ai trouvé {} établissements proposant des consultations avec un {} à proximité de votre position :\n\n{}\n\nVous pouvez cliquer sur \"Voir sur la carte\" pour localiser ces établissements.",
        facilities.len(),
        specialist.title,
        listed
    )
}

pub fn health_update(frequent: &[String], recommendations: &[String]) -> String {
    let mut message = String::from("Suivi de santé mis à jour. ");
    if !frequent.is_empty() {
        message.push_str(&format!(
            "Vos symptômes les plus fréquents sont : {}. ",
            frequent.join(", ")
        ));
    }
    if !recommendations.is_empty() {
        message.push_str(&format!("Recommandations : {}", recommendations.join(" ")));
    }
    message
}

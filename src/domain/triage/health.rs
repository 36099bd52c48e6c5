//! Longitudinal health record and frequency insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::{Severity, Symptom};

/// Number of symptoms reported in the frequency insight.
const TOP_SYMPTOMS: usize = 3;

const HEADACHE_ADVICE: &str =
    "Pensez à surveiller votre consommation d'eau et votre exposition aux écrans";
const FATIGUE_ADVICE: &str =
    "Assurez-vous de dormir suffisamment et de maintenir une activité physique régulière";
const KEEP_TRACKING_ADVICE: &str =
    "Continuez à suivre vos symptômes pour obtenir des insights plus précis";

fn now() -> DateTime<Utc> {
    Utc::now()
}

/// One symptom occurrence in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedSymptom {
    pub description: String,
    pub severity: Severity,
    #[serde(default = "now")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(default = "now")]
    pub date: DateTime<Utc>,
    pub specialist: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// A vital sign or other numeric reading (blood pressure, weight, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub unit: String,
    #[serde(default = "now")]
    pub date: DateTime<Utc>,
}

/// Longitudinal record kept alongside the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    #[serde(default)]
    pub symptoms: Vec<TrackedSymptom>,
    #[serde(default)]
    pub consultations: Vec<Consultation>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// New entries to append to a [`HealthRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    #[serde(default)]
    pub symptoms: Vec<TrackedSymptom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<Consultation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication: Option<Medication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
}

impl TrackingData {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.consultation.is_none()
            && self.medication.is_none()
            && self.measurement.is_none()
    }
}

impl HealthRecord {
    /// Appends every entry of `data` to the history.
    pub fn record(&mut self, data: TrackingData) {
        self.symptoms.extend(data.symptoms);
        self.consultations.extend(data.consultation);
        self.medications.extend(data.medication);
        self.measurements.extend(data.measurement);
    }

    /// Appends conversation symptoms dated now, defaulting a missing severity
    /// to moderate.
    pub fn record_symptoms(&mut self, symptoms: &[Symptom]) {
        let date = Utc::now();
        self.symptoms.extend(symptoms.iter().map(|s| TrackedSymptom {
            description: s.description.clone(),
            severity: s.severity.unwrap_or(Severity::Moderate),
            date,
        }));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomFrequency {
    pub description: String,
    pub count: usize,
}

/// Frequency analysis over a [`HealthRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
    pub frequent_symptoms: Vec<SymptomFrequency>,
    pub recommendations: Vec<String>,
}

impl HealthInsights {
    /// Top symptoms by lowercase exact match, plus templated advice.
    ///
    /// Ties keep first-seen order.
    pub fn from_record(record: &HealthRecord) -> Self {
        let mut counts: Vec<SymptomFrequency> = Vec::new();
        for symptom in &record.symptoms {
            let key = symptom.description.to_lowercase();
            match counts.iter_mut().find(|c| c.description == key) {
                Some(entry) => entry.count += 1,
                None => counts.push(SymptomFrequency {
                    description: key,
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(TOP_SYMPTOMS);

        let mut recommendations = Vec::new();
        if let Some(top) = counts.first() {
            if top.description.contains("tête") {
                recommendations.push(HEADACHE_ADVICE.to_string());
            } else if top.description.contains("fatigue") {
                recommendations.push(FATIGUE_ADVICE.to_string());
            }
        }
        recommendations.push(KEEP_TRACKING_ADVICE.to_string());

        Self {
            frequent_symptoms: counts,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(description: &str) -> TrackedSymptom {
        TrackedSymptom {
            description: description.to_string(),
            severity: Severity::Mild,
            date: Utc::now(),
        }
    }

    fn record_of(descriptions: &[&str]) -> HealthRecord {
        HealthRecord {
            symptoms: descriptions.iter().map(|d| tracked(d)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn insights_count_lowercase_matches() {
        let record = record_of(&["Fatigue", "fatigue", "toux"]);

        let insights = HealthInsights::from_record(&record);

        assert_eq!(insights.frequent_symptoms[0].description, "fatigue");
        assert_eq!(insights.frequent_symptoms[0].count, 2);
        assert_eq!(insights.frequent_symptoms[1].description, "toux");
    }

    #[test]
    fn insights_keep_top_three() {
        let record = record_of(&["a", "b", "b", "c", "c", "c", "d"]);

        let insights = HealthInsights::from_record(&record);

        let names: Vec<_> = insights
            .frequent_symptoms
            .iter()
            .map(|f| f.description.as_str())
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn headache_top_symptom_adds_hydration_advice() {
        let record = record_of(&["mal de tête", "mal de tête", "fatigue"]);

        let insights = HealthInsights::from_record(&record);

        assert_eq!(
            insights.recommendations,
            vec![HEADACHE_ADVICE.to_string(), KEEP_TRACKING_ADVICE.to_string()]
        );
    }

    #[test]
    fn fatigue_top_symptom_adds_sleep_advice() {
        let record = record_of(&["Fatigue chronique"]);

        let insights = HealthInsights::from_record(&record);

        assert_eq!(insights.recommendations[0], FATIGUE_ADVICE);
    }

    #[test]
    fn empty_record_still_gets_generic_advice() {
        let insights = HealthInsights::from_record(&HealthRecord::default());

        assert!(insights.frequent_symptoms.is_empty());
        assert_eq!(insights.recommendations, vec![KEEP_TRACKING_ADVICE.to_string()]);
    }

    #[test]
    fn record_symptoms_defaults_missing_severity_to_moderate() {
        let mut record = HealthRecord::default();
        let mut unrated = Symptom::reported("toux");
        unrated.severity = None;

        record.record_symptoms(&[unrated, Symptom::reported("fièvre")]);

        assert_eq!(record.symptoms[0].severity, Severity::Moderate);
        assert_eq!(record.symptoms[1].severity, Severity::Unknown);
    }

    #[test]
    fn record_appends_every_tracking_field() {
        let mut record = HealthRecord::default();

        record.record(TrackingData {
            symptoms: vec![tracked("toux")],
            medication: Some(Medication {
                name: "paracétamol".to_string(),
                dosage: Some("500mg".to_string()),
                frequency: None,
            }),
            measurement: Some(Measurement {
                kind: "poids".to_string(),
                value: 72.5,
                unit: "kg".to_string(),
                date: Utc::now(),
            }),
            ..Default::default()
        });

        assert_eq!(record.symptoms.len(), 1);
        assert_eq!(record.medications.len(), 1);
        assert_eq!(record.measurements.len(), 1);
        assert!(record.consultations.is_empty());
    }

    #[test]
    fn consultation_without_date_is_dated_now() {
        let data: TrackingData = serde_json::from_str(
            r#"{"consultation":{"specialist":"Neurologue","notes":"IRM prescrite"}}"#,
        )
        .unwrap();

        let consultation = data.consultation.unwrap();
        assert_eq!(consultation.specialist, "Neurologue");
        assert!(consultation.date <= Utc::now());
    }

    #[test]
    fn tracking_data_deserializes_with_defaults() {
        let data: TrackingData =
            serde_json::from_str(r#"{"symptoms":[{"description":"toux","severity":"mild"}]}"#)
                .unwrap();

        assert_eq!(data.symptoms.len(), 1);
        assert!(data.measurement.is_none());
        assert!(!data.is_empty());
    }
}

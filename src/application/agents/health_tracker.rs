//! HealthTrackerAgent - Maintains the longitudinal health record.
//!
//! Not part of the main dispatch chain; reached through
//! `AgentManager::track_health`.

use async_trait::async_trait;

use crate::domain::triage::{
    AgentError, AgentId, AgentInput, AgentPayload, AgentResponse, HealthInsights,
    HealthReportPayload,
};

use super::{messages, Agent};

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthTrackerAgent;

impl HealthTrackerAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for HealthTrackerAgent {
    fn id(&self) -> AgentId {
        AgentId::HealthTracker
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let mut record = input.context.health_record.clone().unwrap_or_default();
        if let Some(AgentPayload::Tracking(data)) = input.payload {
            record.record(data);
        }
        record.record_symptoms(&input.context.current_symptoms);

        let insights = HealthInsights::from_record(&record);
        let frequent: Vec<String> = insights
            .frequent_symptoms
            .iter()
            .map(|f| f.description.clone())
            .collect();

        tracing::debug!(agent = %self.id(), symptoms = record.symptoms.len(), "Health record updated");

        let message = messages::health_update(&frequent, &insights.recommendations);
        Ok(AgentResponse::new(message)
            .with_data(AgentPayload::HealthReport(HealthReportPayload { record, insights }))
            .route_to(AgentId::ContextualMemory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::{
        ConversationContext, HealthRecord, Severity, Symptom, TrackedSymptom, TrackingData,
    };
    use chrono::Utc;

    fn report(response: &AgentResponse) -> &HealthReportPayload {
        match &response.data {
            Some(AgentPayload::HealthReport(report)) => report,
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn appends_tracking_data_and_conversation_symptoms() {
        let mut context = ConversationContext::new();
        context.current_symptoms = vec![Symptom::reported("mal de tête")];
        let tracking = TrackingData {
            symptoms: vec![TrackedSymptom {
                description: "Mal de tête".to_string(),
                severity: Severity::Severe,
                date: Utc::now(),
            }],
            ..Default::default()
        };

        let response = HealthTrackerAgent::new()
            .process(AgentInput::new(context).with_payload(AgentPayload::Tracking(tracking)))
            .await
            .unwrap();

        let report = report(&response);
        assert_eq!(report.record.symptoms.len(), 2);
        assert_eq!(report.insights.frequent_symptoms[0].description, "mal de tête");
        assert_eq!(report.insights.frequent_symptoms[0].count, 2);
        assert!(response.message.starts_with("Suivi de santé mis à jour. Vos symptômes les plus fréquents sont : mal de tête. "));
        assert!(response.message.contains("consommation d'eau"));
        assert_eq!(response.next_agent, Some(AgentId::ContextualMemory));
    }

    #[tokio::test]
    async fn extends_existing_record() {
        let mut context = ConversationContext::new();
        context.health_record = Some(HealthRecord {
            symptoms: vec![TrackedSymptom {
                description: "fatigue".to_string(),
                severity: Severity::Mild,
                date: Utc::now(),
            }],
            ..Default::default()
        });

        let response = HealthTrackerAgent::new()
            .process(AgentInput::new(context))
            .await
            .unwrap();

        assert_eq!(report(&response).record.symptoms.len(), 1);
        assert!(response.message.contains("dormir suffisamment"));
    }

    #[tokio::test]
    async fn empty_history_still_reports_generic_advice() {
        let response = HealthTrackerAgent::new()
            .process(AgentInput::new(ConversationContext::new()))
            .await
            .unwrap();

        assert_eq!(
            response.message,
            "Suivi de santé mis à jour. Recommandations : Continuez à suivre vos symptômes pour obtenir des insights plus précis"
        );
    }
}

//! DiagnosticAgent - Turns a symptom description into candidate conditions.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::triage::{
    AgentError, AgentId, AgentInput, AgentPayload, AgentResponse, DiagnosisPayload, Symptom,
};
use crate::ports::AnalysisProvider;

use super::{messages, with_deadline, Agent};

/// Entry stage of every turn.
pub struct DiagnosticAgent {
    provider: Arc<dyn AnalysisProvider>,
    deadline: Duration,
}

impl DiagnosticAgent {
    pub fn new(provider: Arc<dyn AnalysisProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }
}

#[async_trait]
impl Agent for DiagnosticAgent {
    fn id(&self) -> AgentId {
        AgentId::Diagnostic
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let text = match input.payload {
            Some(AgentPayload::UserText(text)) => text,
            _ => input
                .context
                .last_user_message()
                .unwrap_or_default()
                .to_string(),
        };
        let user_info = input.context.user_info_or_default();

        tracing::debug!(agent = %self.id(), chars = text.len(), "Analyzing symptoms");

        let analysis = match with_deadline(
            self.deadline,
            self.provider.analyze_symptoms(&text, &user_info),
        )
        .await
        {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(agent = %self.id(), error = %err, "Symptom analysis failed");
                return Ok(AgentResponse::new(messages::DIAGNOSIS_FAILED).with_error(err.to_string()));
            }
        };

        if analysis.is_empty() {
            // Still screen the raw text for urgency.
            return Ok(AgentResponse::new(messages::NO_CONDITIONS)
                .with_data(AgentPayload::UserText(text))
                .with_error(messages::NO_CONDITIONS_ERROR)
                .route_to(AgentId::Emergency));
        }

        let message = messages::diagnosis(&analysis, user_info.age);
        Ok(AgentResponse::new(message)
            .with_data(AgentPayload::Diagnosis(DiagnosisPayload {
                symptoms: vec![Symptom::reported(text)],
                analysis,
            }))
            .route_to(AgentId::SpecialistRecommendation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analysis::MockAnalysisProvider;
    use crate::domain::triage::{ConversationContext, Severity, SymptomAnalysis, UserInfo};
    use crate::ports::ProviderError;

    fn agent(provider: MockAnalysisProvider) -> DiagnosticAgent {
        DiagnosticAgent::new(Arc::new(provider), Duration::from_secs(1))
    }

    fn input(text: &str) -> AgentInput {
        AgentInput::new(ConversationContext::new())
            .with_payload(AgentPayload::UserText(text.to_string()))
    }

    #[tokio::test]
    async fn conditions_route_to_specialist_recommendation() {
        let agent = agent(MockAnalysisProvider::new());

        let response = agent.process(input("maux de tête")).await.unwrap();

        assert_eq!(response.next_agent, Some(AgentId::SpecialistRecommendation));
        assert!(response.message.contains("**Migraine**"));
        match response.data {
            Some(AgentPayload::Diagnosis(diagnosis)) => {
                assert_eq!(diagnosis.analysis.conditions.len(), 3);
                assert_eq!(diagnosis.symptoms[0].description, "maux de tête");
                assert_eq!(diagnosis.symptoms[0].severity, Some(Severity::Unknown));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_conditions_asks_for_details_and_screens_urgency() {
        let agent = agent(MockAnalysisProvider::new().with_analysis(SymptomAnalysis::new(vec![])));

        let response = agent.process(input("bof")).await.unwrap();

        assert_eq!(response.message, messages::NO_CONDITIONS);
        assert_eq!(response.error.as_deref(), Some(messages::NO_CONDITIONS_ERROR));
        assert_eq!(response.next_agent, Some(AgentId::Emergency));
        assert_eq!(response.data, Some(AgentPayload::UserText("bof".to_string())));
    }

    #[tokio::test]
    async fn provider_failure_dead_ends_with_apology() {
        let agent = agent(
            MockAnalysisProvider::new().with_analysis_error(ProviderError::unavailable("down")),
        );

        let response = agent.process(input("fièvre")).await.unwrap();

        assert_eq!(response.message, messages::DIAGNOSIS_FAILED);
        assert!(response.data.is_none());
        assert!(response.next_agent.is_none());
        assert!(response.error.unwrap().contains("down"));
    }

    #[tokio::test]
    async fn slow_provider_is_treated_as_failure() {
        let agent = DiagnosticAgent::new(
            Arc::new(MockAnalysisProvider::new().with_delay(Duration::from_millis(200))),
            Duration::from_millis(10),
        );

        let response = agent.process(input("fièvre")).await.unwrap();

        assert_eq!(response.message, messages::DIAGNOSIS_FAILED);
        assert!(response.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn falls_back_to_last_user_message_and_passes_profile() {
        let provider = MockAnalysisProvider::new();
        let agent = agent(provider.clone());
        let mut context = ConversationContext::new();
        context.push_message(crate::domain::triage::ChatMessage::user("toux sèche"));
        context.update_user_info(UserInfo {
            age: Some(30),
            ..Default::default()
        });

        let response = agent.process(AgentInput::new(context)).await.unwrap();

        assert!(response.message.starts_with("Pour une personne de 30 ans"));
        assert_eq!(provider.analyzed_texts(), vec!["toux sèche".to_string()]);
    }
}

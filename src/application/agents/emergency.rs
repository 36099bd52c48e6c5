//! EmergencyAgent - Screens the described symptoms for urgency.
//!
//! Provider failures degrade to `low` instead of aborting the turn.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::triage::{
    AgentError, AgentId, AgentInput, AgentPayload, AgentResponse, UrgencyLevel, UrgencyPayload,
};
use crate::ports::AnalysisProvider;

use super::{messages, with_deadline, Agent};

pub struct EmergencyAgent {
    provider: Arc<dyn AnalysisProvider>,
    deadline: Duration,
}

impl EmergencyAgent {
    pub fn new(provider: Arc<dyn AnalysisProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }

    fn defaulted(error: impl Into<String>) -> AgentResponse {
        AgentResponse::silent()
            .with_data(AgentPayload::Urgency(UrgencyPayload {
                level: UrgencyLevel::Low,
                reasoning: None,
                recommendations: None,
            }))
            .with_error(error)
            .route_to(AgentId::ContextualMemory)
    }
}

#[async_trait]
impl Agent for EmergencyAgent {
    fn id(&self) -> AgentId {
        AgentId::Emergency
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let context = &input.context;
        let symptoms = match &input.payload {
            Some(AgentPayload::UserText(text)) if !text.is_empty() => Some(text.as_str()),
            _ => context.primary_symptom(),
        };
        let conditions = input
            .payload
            .as_ref()
            .and_then(AgentPayload::conditions)
            .unwrap_or(context.suggested_conditions.as_slice());

        let Some(symptoms) = symptoms else {
            return Ok(Self::defaulted(messages::NO_SYMPTOMS_ERROR));
        };

        tracing::debug!(agent = %self.id(), conditions = conditions.len(), "Evaluating urgency");

        let assessment = match with_deadline(
            self.deadline,
            self.provider.evaluate_urgency(symptoms, conditions),
        )
        .await
        {
            Ok(assessment) => assessment,
            Err(err) => {
                tracing::warn!(agent = %self.id(), error = %err, "Urgency evaluation failed, defaulting to low");
                return Ok(Self::defaulted(err.to_string()));
            }
        };

        let Some(level) = assessment.urgency_level else {
            return Ok(Self::defaulted(messages::NO_URGENCY_ERROR));
        };

        let message = match level {
            UrgencyLevel::Emergency => {
                tracing::warn!(agent = %self.id(), "Possible medical emergency detected");
                messages::emergency_warning(&assessment)
            }
            UrgencyLevel::High => messages::high_urgency_warning(&assessment),
            UrgencyLevel::Medium | UrgencyLevel::Low => String::new(),
        };

        Ok(AgentResponse::new(message)
            .with_data(AgentPayload::Urgency(UrgencyPayload {
                level,
                reasoning: assessment.reasoning,
                recommendations: assessment.recommendations,
            }))
            .route_to(AgentId::ContextualMemory))
    }
}

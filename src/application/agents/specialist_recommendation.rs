//! SpecialistRecommendationAgent - Maps suggested conditions to a specialty.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::triage::{
    AgentError, AgentId, AgentInput, AgentPayload, AgentResponse, RecommendationPayload,
    Specialist,
};
use crate::ports::AnalysisProvider;

use super::{messages, with_deadline, Agent};

pub struct SpecialistRecommendationAgent {
    provider: Arc<dyn AnalysisProvider>,
    deadline: Duration,
}

impl SpecialistRecommendationAgent {
    pub fn new(provider: Arc<dyn AnalysisProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }
}

#[async_trait]
impl Agent for SpecialistRecommendationAgent {
    fn id(&self) -> AgentId {
        AgentId::SpecialistRecommendation
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let conditions = input
            .payload
            .as_ref()
            .and_then(AgentPayload::conditions)
            .map(<[_]>::to_vec)
            .unwrap_or_else(|| input.context.suggested_conditions.clone());

        tracing::debug!(agent = %self.id(), conditions = conditions.len(), "Recommending specialist");

        if conditions.is_empty() {
            return Ok(AgentResponse::new(messages::NEED_MORE_DETAILS)
                .with_error(messages::NO_CONDITIONS_ERROR)
                .route_to(AgentId::ContextualMemory));
        }

        let user_info = input.context.user_info_or_default();
        let recommendation = match with_deadline(
            self.deadline,
            self.provider.recommend_specialist(&conditions, &user_info),
        )
        .await
        {
            Ok(recommendation) => recommendation,
            Err(err) => {
                tracing::warn!(agent = %self.id(), error = %err, "Specialist recommendation failed");
                return Ok(AgentResponse::new(messages::RECOMMENDATION_FAILED)
                    .with_error(err.to_string()));
            }
        };

        let Some(specialist) = recommendation.specialist else {
            return Ok(AgentResponse::new(messages::NO_SPECIALIST)
                .with_data(AgentPayload::Recommendation(RecommendationPayload {
                    specialist: Specialist::general_practitioner(),
                    reasoning: None,
                }))
                .with_error(messages::NO_SPECIALIST_ERROR)
                .route_to(AgentId::Emergency));
        };

        let message = messages::recommendation(&specialist, recommendation.reasoning.as_deref());
        Ok(AgentResponse::new(message)
            .with_data(AgentPayload::Recommendation(RecommendationPayload {
                specialist,
                reasoning: recommendation.reasoning,
            }))
            .route_to(AgentId::Emergency))
    }
}

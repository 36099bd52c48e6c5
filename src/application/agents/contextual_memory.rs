//! ContextualMemoryAgent - Folds agent results into the canonical context.
//!
//! Pure: never calls a collaborator. Routing is delegated to
//! [`determine_next_agent`].

use async_trait::async_trait;

use crate::domain::triage::{
    determine_next_agent, AgentError, AgentId, AgentInput, AgentPayload, AgentResponse,
};

use super::{messages, Agent};

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualMemoryAgent;

impl ContextualMemoryAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for ContextualMemoryAgent {
    fn id(&self) -> AgentId {
        AgentId::ContextualMemory
    }

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError> {
        let delta = input
            .payload
            .as_ref()
            .map(AgentPayload::to_delta)
            .unwrap_or_default();
        let updated = input.context.merged(delta);
        let next = determine_next_agent(&updated);

        tracing::debug!(agent = %self.id(), next = %next, messages = updated.messages.len(), "Context updated");

        Ok(AgentResponse::new(messages::CONTEXT_UPDATED)
            .with_data(AgentPayload::ContextUpdate(Box::new(updated)))
            .route_to(next))
    }
}

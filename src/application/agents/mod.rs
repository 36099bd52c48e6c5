//! Triage agents.
//!
//! Each agent is a thin policy layer over one collaborator port. It receives
//! an [`AgentInput`], returns an [`AgentResponse`] and nominates its
//! successor; it never mutates the manager's context.

mod contextual_memory;
mod diagnostic;
mod emergency;
mod geo_location;
mod health_tracker;
pub mod messages;
mod specialist_recommendation;

pub use contextual_memory::ContextualMemoryAgent;
pub use diagnostic::DiagnosticAgent;
pub use emergency::EmergencyAgent;
pub use geo_location::GeoLocationAgent;
pub use health_tracker::HealthTrackerAgent;
pub use specialist_recommendation::SpecialistRecommendationAgent;

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::domain::triage::{AgentError, AgentId, AgentInput, AgentResponse};
use crate::ports::ProviderError;

/// A named processing stage of the triage pipeline.
#[async_trait]
pub trait Agent: Send + Sync {
    fn id(&self) -> AgentId;

    async fn process(&self, input: AgentInput) -> Result<AgentResponse, AgentError>;
}

/// Runs a provider call, converting an elapsed deadline into
/// [`ProviderError::Timeout`].
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .unwrap_or_else(|_| Err(ProviderError::timeout(deadline.as_millis() as u64)))
}

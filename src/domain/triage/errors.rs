//! Triage pipeline error types.

use super::agent::AgentId;

/// Structurally impossible input handed to an agent.
///
/// Soft failures (no symptoms, no specialist) are ordinary responses; this
/// error aborts the turn.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AgentError {
    #[error("{agent} requires {what}")]
    MissingInput { agent: AgentId, what: &'static str },
}

impl AgentError {
    pub fn missing_input(agent: AgentId, what: &'static str) -> Self {
        Self::MissingInput { agent, what }
    }
}

/// Failure of a whole pipeline turn.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PipelineError {
    #[error("routing exceeded {limit} hops: {trace:?}")]
    RoutingLoop { limit: usize, trace: Vec<AgentId> },

    #[error("contextual memory returned no context")]
    MissingContextUpdate,

    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Failure of the on-demand facility lookup.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FacilitySearchError {
    #[error("Aucun spécialiste recommandé")]
    NoSpecialist,

    #[error("Erreur lors de la recherche de spécialistes à proximité")]
    SearchFailed(#[source] PipelineError),
}

impl FacilitySearchError {
    /// Stable code for callers that map errors to a wire format.
    pub fn code(&self) -> &'static str {
        match self {
            FacilitySearchError::NoSpecialist => "NO_SPECIALIST",
            FacilitySearchError::SearchFailed(_) => "SEARCH_FAILED",
        }
    }
}

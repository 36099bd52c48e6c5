//! Application layer - Triage agents and the pipeline that runs them.
//!
//! Agents are stateless apart from their collaborators; `AgentManager`
//! owns the conversation context and drives the routing loop.

pub mod agent_manager;
pub mod agents;

pub use agent_manager::{
    AgentManager, Collaborators, FacilitySearch, HealthTracking, PipelineSettings, TurnOutcome,
};
pub use agents::Agent;

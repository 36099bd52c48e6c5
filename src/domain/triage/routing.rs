//! Routing - Stage selection for the triage pipeline.
//!
//! Pure functions and a small per-turn guard; nothing here performs I/O.

use super::agent::AgentId;
use super::context::ConversationContext;
use super::errors::PipelineError;

/// Default ceiling on agent invocations within one turn.
pub const DEFAULT_MAX_HOPS: usize = 10;

/// Picks the stage that should follow a memory fold.
///
/// Fixed priority: emergency, then geolocation once a specialist is known,
/// otherwise diagnosis.
pub fn determine_next_agent(context: &ConversationContext) -> AgentId {
    if context.is_emergency() {
        return AgentId::Emergency;
    }
    if context.recommended_specialist.is_some() {
        return AgentId::GeoLocation;
    }
    if !context.current_symptoms.is_empty() && context.suggested_conditions.is_empty() {
        return AgentId::Diagnostic;
    }
    AgentId::Diagnostic
}

/// Tracks the stages entered during one turn.
///
/// A turn settles when a stage other than contextual memory would run a
/// second time, and fails once more than `max_hops` stages have been entered.
#[derive(Debug, Clone)]
pub struct TurnRouter {
    max_hops: usize,
    trace: Vec<AgentId>,
}

impl TurnRouter {
    pub fn new(max_hops: usize) -> Self {
        Self {
            max_hops,
            trace: Vec::new(),
        }
    }

    /// Records that `agent` is about to run.
    pub fn enter(&mut self, agent: AgentId) -> Result<(), PipelineError> {
        if self.trace.len() >= self.max_hops {
            let mut trace = self.trace.clone();
            trace.push(agent);
            return Err(PipelineError::RoutingLoop {
                limit: self.max_hops,
                trace,
            });
        }
        self.trace.push(agent);
        Ok(())
    }

    /// Filters a nominated successor through the settle rule.
    pub fn resolve(&self, nominated: Option<AgentId>) -> Option<AgentId> {
        match nominated {
            Some(AgentId::ContextualMemory) => Some(AgentId::ContextualMemory),
            Some(agent) if self.has_visited(agent) => None,
            other => other,
        }
    }

    pub fn has_visited(&self, agent: AgentId) -> bool {
        self.trace.contains(&agent)
    }

    pub fn hops(&self) -> usize {
        self.trace.len()
    }

    /// Stages entered so far, in order.
    pub fn trace(&self) -> &[AgentId] {
        &self.trace
    }
}

impl Default for TurnRouter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HOPS)
    }
}

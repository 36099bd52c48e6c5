//! Agent identifiers and the messages agents exchange.
//!
//! Every hand-off in the pipeline goes through [`AgentInput`] and
//! [`AgentResponse`]. Payloads are a closed union so a consuming agent
//! matches on a known shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::analysis::SymptomAnalysis;
use super::context::{
    ChatMessage, Condition, ConversationContext, Facility, GeoPoint, Specialist, Symptom,
    UrgencyLevel,
};
use super::delta::ContextDelta;
use super::health::{HealthInsights, HealthRecord, TrackingData};

// ════════════════════════════════════════════════════════════════════════════════
// Agent identifiers
// ════════════════════════════════════════════════════════════════════════════════

/// The six processing stages of the triage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    #[serde(rename = "DiagnosticAgent")]
    Diagnostic,
    #[serde(rename = "SpecialistRecommendationAgent")]
    SpecialistRecommendation,
    #[serde(rename = "EmergencyAgent")]
    Emergency,
    #[serde(rename = "ContextualMemoryAgent")]
    ContextualMemory,
    #[serde(rename = "GeoLocationAgent")]
    GeoLocation,
    #[serde(rename = "HealthTrackerAgent")]
    HealthTracker,
}

impl AgentId {
    /// Stage every user turn starts with.
    pub const ENTRY: AgentId = AgentId::Diagnostic;

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Diagnostic => "DiagnosticAgent",
            AgentId::SpecialistRecommendation => "SpecialistRecommendationAgent",
            AgentId::Emergency => "EmergencyAgent",
            AgentId::ContextualMemory => "ContextualMemoryAgent",
            AgentId::GeoLocation => "GeoLocationAgent",
            AgentId::HealthTracker => "HealthTrackerAgent",
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Payloads
// ════════════════════════════════════════════════════════════════════════════════

/// Output of the diagnostic stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisPayload {
    pub analysis: SymptomAnalysis,
    pub symptoms: Vec<Symptom>,
}

/// Output of the specialist recommendation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPayload {
    pub specialist: Specialist,
    pub reasoning: Option<String>,
}

/// Output of the emergency screening stage.
#[derive(Debug, Clone, PartialEq)]
pub struct UrgencyPayload {
    pub level: UrgencyLevel,
    pub reasoning: Option<String>,
    pub recommendations: Option<String>,
}

/// Output of the geolocation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPayload {
    pub user_location: GeoPoint,
    pub nearby_facilities: Vec<Facility>,
}

/// Output of the health tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReportPayload {
    pub record: HealthRecord,
    pub insights: HealthInsights,
}

/// Data carried between agents.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentPayload {
    /// Raw user text, forwarded when no structured result exists yet.
    UserText(String),
    Diagnosis(DiagnosisPayload),
    Recommendation(RecommendationPayload),
    Urgency(UrgencyPayload),
    Location(LocationPayload),
    /// Specialist to look up facilities for.
    SpecialistQuery(Specialist),
    Tracking(TrackingData),
    HealthReport(HealthReportPayload),
    /// A chat message to record in the log.
    Note(ChatMessage),
    /// Context produced by the contextual memory stage.
    ContextUpdate(Box<ConversationContext>),
}

impl AgentPayload {
    /// The context fields this payload overwrites when folded into memory.
    pub fn to_delta(&self) -> ContextDelta {
        match self {
            AgentPayload::Diagnosis(diagnosis) => ContextDelta {
                current_symptoms: Some(diagnosis.symptoms.clone()),
                suggested_conditions: Some(diagnosis.analysis.conditions.clone()),
                ..Default::default()
            },
            AgentPayload::Recommendation(rec) => ContextDelta {
                recommended_specialist: Some(rec.specialist.clone()),
                ..Default::default()
            },
            AgentPayload::Urgency(urgency) => ContextDelta {
                urgency_level: Some(urgency.level),
                urgency_recommendations: urgency.recommendations.clone(),
                is_emergency: (urgency.level == UrgencyLevel::Emergency).then_some(true),
                ..Default::default()
            },
            AgentPayload::Location(location) => ContextDelta {
                user_location: Some(location.user_location),
                nearby_facilities: Some(location.nearby_facilities.clone()),
                ..Default::default()
            },
            AgentPayload::HealthReport(report) => ContextDelta {
                health_record: Some(report.record.clone()),
                ..Default::default()
            },
            AgentPayload::Note(message) => ContextDelta {
                message: Some(message.clone()),
                ..Default::default()
            },
            AgentPayload::UserText(_)
            | AgentPayload::SpecialistQuery(_)
            | AgentPayload::Tracking(_)
            | AgentPayload::ContextUpdate(_) => ContextDelta::default(),
        }
    }

    /// Conditions carried by this payload, if any.
    pub fn conditions(&self) -> Option<&[Condition]> {
        match self {
            AgentPayload::Diagnosis(diagnosis) => Some(&diagnosis.analysis.conditions),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Input / Response
// ════════════════════════════════════════════════════════════════════════════════

/// What an agent is handed: a context snapshot and an optional payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInput {
    pub context: ConversationContext,
    pub payload: Option<AgentPayload>,
}

impl AgentInput {
    pub fn new(context: ConversationContext) -> Self {
        Self {
            context,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: AgentPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_optional_payload(mut self, payload: Option<AgentPayload>) -> Self {
        self.payload = payload;
        self
    }
}

/// The only inter-agent message shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentResponse {
    /// User-facing fragment; empty when the stage has nothing to say.
    pub message: String,
    pub data: Option<AgentPayload>,
    /// Diagnostic string kept for logs, never shown to the user.
    pub error: Option<String>,
    /// Successor stage, `None` ends the chain.
    pub next_agent: Option<AgentId>,
}

impl AgentResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: None,
            next_agent: None,
        }
    }

    /// A response with no user-facing text.
    pub fn silent() -> Self {
        Self::new(String::new())
    }

    pub fn with_data(mut self, data: AgentPayload) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn route_to(mut self, agent: AgentId) -> Self {
        self.next_agent = Some(agent);
        self
    }

    /// The folded context, when this is a memory response.
    pub fn context_update(&self) -> Option<&ConversationContext> {
        match &self.data {
            Some(AgentPayload::ContextUpdate(context)) => Some(&**context),
            _ => None,
        }
    }
}

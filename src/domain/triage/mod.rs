//! Triage domain - Conversation state, agent messages and routing.
//!
//! Everything in this module is pure data or pure functions. Agents and the
//! manager that drives them live in `application`.

mod agent;
mod analysis;
mod context;
mod delta;
mod errors;
mod health;
mod routing;

pub use agent::{
    AgentId, AgentInput, AgentPayload, AgentResponse, DiagnosisPayload, HealthReportPayload,
    LocationPayload, RecommendationPayload, UrgencyPayload,
};
pub use analysis::{
    SpecialistRecommendation, SymptomAnalysis, UrgencyAssessment, MEDICAL_DISCLAIMER,
};
pub use context::{
    ChatMessage, Condition, ConversationContext, Facility, GeoPoint, LatLng, Likelihood, Sender,
    Severity, Specialist, Symptom, UrgencyLevel, UserInfo, MAX_MESSAGES,
};
pub use delta::ContextDelta;
pub use errors::{AgentError, FacilitySearchError, PipelineError};
pub use health::{
    Consultation, HealthInsights, HealthRecord, Measurement, Medication, SymptomFrequency,
    TrackedSymptom, TrackingData,
};
pub use routing::{determine_next_agent, TurnRouter, DEFAULT_MAX_HOPS};

//! HTTP adapter for the triage conversation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, CreateConversationResponse, ErrorResponse, FacilitySearchRequest,
    FacilitySearchResponse, HealthResponse, TrackingRequest, TrackingResponse,
};
pub use handlers::TriageHandlers;
pub use routes::triage_routes;

//! HTTP DTOs for triage endpoints.
//!
//! Field names are camelCase to match the chat UI contract.

use serde::{Deserialize, Serialize};

use crate::application::{FacilitySearch, HealthTracking};
use crate::domain::triage::{
    ConversationContext, Facility, HealthInsights, HealthRecord, TrackingData, UserInfo,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to run one chat turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
}

/// Request to search facilities for a specialty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySearchRequest {
    #[serde(default)]
    pub specialist_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRequest {
    #[serde(default)]
    pub tracking_data: Option<TrackingData>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "HealthiNet API is running".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationResponse {
    pub conversation_id: String,
    pub greeting: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub response: String,
    pub context: ConversationContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacilitySearchResponse {
    pub message: String,
    pub facilities: Vec<Facility>,
}

impl From<FacilitySearch> for FacilitySearchResponse {
    fn from(search: FacilitySearch) -> Self {
        Self {
            message: search.message,
            facilities: search.facilities,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub message: String,
    pub health_record: HealthRecord,
    pub insights: HealthInsights,
}

impl From<HealthTracking> for TrackingResponse {
    fn from(tracking: HealthTracking) -> Self {
        Self {
            message: tracking.message,
            health_record: tracking.record,
            insights: tracking.insights,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} introuvable : {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

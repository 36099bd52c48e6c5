//! HTTP handlers for triage endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::session::{InMemoryConversationRegistry, RegistryError, SharedManager};
use crate::application::agents::messages;
use crate::domain::foundation::ConversationId;
use crate::domain::triage::{FacilitySearchError, UserInfo};

use super::dto::{
    ChatRequest, ChatResponse, CreateConversationResponse, ErrorResponse, FacilitySearchRequest,
    FacilitySearchResponse, HealthResponse, TrackingRequest, TrackingResponse,
};

const MESSAGE_REQUIRED: &str = "Le message est requis";
const INVALID_CONVERSATION_ID: &str = "Identifiant de conversation invalide";
const TRACKING_FAILED: &str = "Erreur lors du suivi de santé";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TriageHandlers {
    registry: InMemoryConversationRegistry,
}

impl TriageHandlers {
    pub fn new(registry: InMemoryConversationRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &InMemoryConversationRegistry {
        &self.registry
    }

    async fn manager(&self, raw_id: &str) -> Result<SharedManager, Response> {
        let id = parse_conversation_id(raw_id)?;
        self.registry.get(id).await.map_err(handle_registry_error)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse::ok())).into_response()
}

/// POST /api/conversations - Start a conversation
pub async fn create_conversation(State(handlers): State<TriageHandlers>) -> Response {
    let (id, _) = handlers.registry.create().await;

    let response = CreateConversationResponse {
        conversation_id: id.to_string(),
        greeting: messages::WELCOME.to_string(),
    };
    (StatusCode::CREATED, Json(response)).into_response()
}

/// POST /api/chat - Run one triage turn
pub async fn chat(
    State(handlers): State<TriageHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(MESSAGE_REQUIRED)),
        )
            .into_response();
    }

    let requested = match req.conversation_id.as_deref() {
        Some(raw) => match parse_conversation_id(raw) {
            Ok(id) => Some(id),
            Err(response) => return response,
        },
        None => None,
    };

    let (id, shared) = match handlers.registry.get_or_create(requested).await {
        Ok(found) => found,
        Err(e) => return handle_registry_error(e),
    };

    let mut manager = shared.lock().await;
    if let Some(patch) = req.user_info.filter(|info| !info.is_empty()) {
        manager.update_user_profile(patch);
    }
    let outcome = manager.process_user_message(&req.message).await;

    let response = ChatResponse {
        conversation_id: id.to_string(),
        response: outcome.response,
        context: outcome.context,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/conversations/:id - Context snapshot
pub async fn get_conversation(
    State(handlers): State<TriageHandlers>,
    Path(conversation_id): Path<String>,
) -> Response {
    let shared = match handlers.manager(&conversation_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let context = shared.lock().await.snapshot();
    (StatusCode::OK, Json(context)).into_response()
}

/// PATCH /api/conversations/:id/profile - Merge a partial profile
pub async fn update_profile(
    State(handlers): State<TriageHandlers>,
    Path(conversation_id): Path<String>,
    Json(patch): Json<UserInfo>,
) -> Response {
    let shared = match handlers.manager(&conversation_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let mut manager = shared.lock().await;
    manager.update_user_profile(patch);
    (StatusCode::OK, Json(manager.snapshot())).into_response()
}

/// POST /api/conversations/:id/facilities - Search nearby facilities
pub async fn find_facilities(
    State(handlers): State<TriageHandlers>,
    Path(conversation_id): Path<String>,
    Json(req): Json<FacilitySearchRequest>,
) -> Response {
    let shared = match handlers.manager(&conversation_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let result = shared
        .lock()
        .await
        .find_nearby_facilities(&req.specialist_type)
        .await;
    match result {
        Ok(search) => (StatusCode::OK, Json(FacilitySearchResponse::from(search))).into_response(),
        Err(e) => handle_facility_error(e),
    }
}

/// POST /api/conversations/:id/tracking - Update the health record
pub async fn track_health(
    State(handlers): State<TriageHandlers>,
    Path(conversation_id): Path<String>,
    Json(req): Json<TrackingRequest>,
) -> Response {
    let shared = match handlers.manager(&conversation_id).await {
        Ok(shared) => shared,
        Err(response) => return response,
    };

    let result = shared.lock().await.track_health(req.tracking_data).await;
    match result {
        Ok(tracking) => (StatusCode::OK, Json(TrackingResponse::from(tracking))).into_response(),
        Err(e) => {
            tracing::error!(conversation_id = %conversation_id, error = %e, "Health tracking failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(TRACKING_FAILED)),
            )
                .into_response()
        }
    }
}

/// DELETE /api/conversations/:id - End a conversation
pub async fn delete_conversation(
    State(handlers): State<TriageHandlers>,
    Path(conversation_id): Path<String>,
) -> Response {
    let id = match parse_conversation_id(&conversation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.registry.remove(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_registry_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_conversation_id(raw: &str) -> Result<ConversationId, Response> {
    raw.parse::<ConversationId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(INVALID_CONVERSATION_ID)),
        )
            .into_response()
    })
}

fn handle_registry_error(error: RegistryError) -> Response {
    match error {
        RegistryError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Conversation", &id.to_string())),
        )
            .into_response(),
    }
}

fn handle_facility_error(error: FacilitySearchError) -> Response {
    let status = match error {
        FacilitySearchError::NoSpecialist => StatusCode::CONFLICT,
        FacilitySearchError::SearchFailed(ref cause) => {
            tracing::error!(error = %cause, "Facility search aborted");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse::new(error.code(), error.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::PipelineError;

    #[test]
    fn registry_not_found_maps_to_404() {
        let response = handle_registry_error(RegistryError::NotFound(ConversationId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_specialist_maps_to_409() {
        let response = handle_facility_error(FacilitySearchError::NoSpecialist);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn search_failure_maps_to_500() {
        let response = handle_facility_error(FacilitySearchError::SearchFailed(
            PipelineError::MissingContextUpdate,
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_id_maps_to_400() {
        let response = parse_conversation_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

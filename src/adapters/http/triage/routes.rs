//! HTTP routes for triage endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    chat, create_conversation, delete_conversation, find_facilities, get_conversation, health,
    track_health, update_profile, TriageHandlers,
};

/// Creates the triage router; mount it under `/api`.
pub fn triage_routes(handlers: TriageHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/conversations", post(create_conversation))
        .route(
            "/conversations/:id",
            get(get_conversation).delete(delete_conversation),
        )
        .route("/conversations/:id/profile", patch(update_profile))
        .route("/conversations/:id/facilities", post(find_facilities))
        .route("/conversations/:id/tracking", post(track_health))
        .with_state(handlers)
}

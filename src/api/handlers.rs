//! HTTP request handlers

use super::types::InboundMessage;
use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(receive_message))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

/// Accept one activity and return immediately; the conversation's worker
/// picks it up in arrival order.
async fn receive_message(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> StatusCode {
    if message.conversation_id.is_empty() || message.text.trim().is_empty() {
        return StatusCode::BAD_REQUEST;
    }

    tracing::debug!(conversation_id = %message.conversation_id, "inbound activity");
    state
        .runtime
        .dispatch(&message.conversation_id, message.text)
        .await;

    StatusCode::ACCEPTED
}

async fn health() -> &'static str {
    "ok"
}

async fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

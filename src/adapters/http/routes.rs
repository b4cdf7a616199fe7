//! HTTP routes for the chat API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    chat, delete_session, get_session, health, list_sessions, reset_session, root, AppState,
};

/// Creates the API router with all endpoints.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/sessions", get(list_sessions))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/reset", post(reset_session))
        .route("/health", get(health))
        .with_state(state)
}

//! HTTP handlers for the chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{ChatService, DEFAULT_SESSION_ID};

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionCommandResponse,
    SessionInfoResponse, SessionListResponse, SessionStatsResponse, MAX_MESSAGE_LENGTH,
};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatService>,
}

impl AppState {
    pub fn new(service: Arc<ChatService>) -> Self {
        Self { service }
    }
}

/// GET / - Service info and endpoint map
pub async fn root() -> Response {
    let body = json!({
        "message": "Welcome to the PetPal chat API! 🐾",
        "description": "A charming AI companion who loves pets and making people feel special",
        "endpoints": {
            "POST /chat": "Send a message to PetPal",
            "GET /session/:id": "Get session information",
            "GET /sessions": "List all active sessions",
            "DELETE /session/:id": "Remove a session",
            "POST /session/:id/reset": "Reset a session",
            "GET /health": "Health check"
        }
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /chat - Run one conversation turn
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    if req.message.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("message must not be empty")),
        )
            .into_response();
    }
    if req.message.chars().count() > MAX_MESSAGE_LENGTH {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(format!(
                "message must be at most {MAX_MESSAGE_LENGTH} characters"
            ))),
        )
            .into_response();
    }

    let session_id = req
        .session_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION_ID);

    let reply = state.service.chat(&req.message, session_id).await;

    // The turn above created the session, so stats are always present.
    let (stage, count) = match state.service.session_stats(session_id).await {
        Some(stats) => (stats.stage.as_str().to_string(), stats.messages_count),
        None => ("greeting".to_string(), 0),
    };

    let response = ChatResponse {
        response: reply,
        session_id: session_id.to_string(),
        conversation_stage: stage,
        message_count: count,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /session/:id - Detailed session info
pub async fn get_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    match state.service.session_detail(&session_id).await {
        Some(detail) => {
            let response: SessionInfoResponse = detail.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        None => session_not_found(),
    }
}

/// GET /sessions - List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Response {
    let sessions: Vec<SessionStatsResponse> = state
        .service
        .list_sessions()
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    let response = SessionListResponse {
        active_sessions: sessions.len(),
        sessions,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /session/:id - Remove a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    if state.service.cleanup_session(&session_id).await {
        let response = SessionCommandResponse {
            message: format!("Session {session_id} cleared successfully"),
            session_id,
        };
        (StatusCode::OK, Json(response)).into_response()
    } else {
        session_not_found()
    }
}

/// POST /session/:id/reset - Fresh session under the same id
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let snapshot = state.service.reset_session(&session_id).await;
    let response = SessionCommandResponse {
        message: format!("Session {session_id} reset successfully"),
        session_id: snapshot.session_id,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /health - Diagnostic status
///
/// Read-only by design: reports the live session count without creating
/// or touching any session.
pub async fn health(State(state): State<AppState>) -> Response {
    let response = HealthResponse {
        status: "healthy".to_string(),
        active_sessions: state.service.active_sessions().await,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn session_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Session not found")),
    )
        .into_response()
}

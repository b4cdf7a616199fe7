//! HTTP DTOs for the chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{SessionDetail, SessionSnapshot};

/// Longest message the API accepts.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to chat with the companion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message (1 to 1000 characters).
    pub message: String,
    /// Session id for conversation continuity; "default" when omitted.
    #[serde(default)]
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The companion's reply.
    pub response: String,
    /// Session id used.
    pub session_id: String,
    /// Stage the turn ran in.
    pub conversation_stage: String,
    /// Turns completed in this session.
    pub message_count: u32,
}

/// Summary statistics for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatsResponse {
    pub session_id: String,
    pub messages_count: u32,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub pet_preference: String,
    pub engagement_level: u8,
    pub stories_heard: usize,
    pub compliments_received: usize,
    pub current_mood: String,
}

impl From<SessionSnapshot> for SessionStatsResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.session_id,
            messages_count: snapshot.messages_count,
            stage: snapshot.stage.as_str().to_string(),
            user_name: snapshot.user_name,
            pet_preference: snapshot.pet_preference.as_str().to_string(),
            engagement_level: snapshot.engagement_level,
            stories_heard: snapshot.stories_heard,
            compliments_received: snapshot.compliments_received,
            current_mood: snapshot.current_mood.as_str().to_string(),
        }
    }
}

/// All live sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub active_sessions: usize,
    pub sessions: Vec<SessionStatsResponse>,
}

/// Profile contents for the detailed session view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pet_preference: String,
    pub engagement_level: u8,
    pub stories_heard: Vec<String>,
    /// The last five compliments given.
    pub compliments_received: Vec<String>,
}

/// Detailed view of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub session_id: String,
    pub user_profile: UserProfileResponse,
    pub conversation_stage: String,
    pub message_count: u32,
    pub current_mood: String,
    pub is_active: bool,
}

impl From<SessionDetail> for SessionInfoResponse {
    fn from(detail: SessionDetail) -> Self {
        Self {
            session_id: detail.session_id,
            user_profile: UserProfileResponse {
                name: detail.user_name,
                pet_preference: detail.pet_preference.as_str().to_string(),
                engagement_level: detail.engagement_level,
                stories_heard: detail.stories_heard,
                compliments_received: detail.recent_compliments,
            },
            conversation_stage: detail.stage.as_str().to_string(),
            message_count: detail.messages_count,
            current_mood: detail.current_mood.as_str().to_string(),
            is_active: true,
        }
    }
}

/// Response for session removal and reset operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCommandResponse {
    pub session_id: String,
    pub message: String,
}

/// Health check status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error response with the given detail.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

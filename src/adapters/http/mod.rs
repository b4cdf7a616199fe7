//! HTTP adapter - the REST surface over the chat service.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionCommandResponse,
    SessionInfoResponse, SessionListResponse, SessionStatsResponse, UserProfileResponse,
    MAX_MESSAGE_LENGTH,
};
pub use handlers::AppState;
pub use routes::api_router;

//! Application layer - session ownership and turn orchestration.

mod chat_service;
mod session_store;

pub use chat_service::{ChatService, DEFAULT_SESSION_ID};
pub use session_store::{SessionDetail, SessionSnapshot, SessionStore};

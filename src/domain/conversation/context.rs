//! Per-session conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::profile::UserProfile;

use super::{ConversationStage, UserMood};

/// Everything the service remembers about one ongoing conversation.
///
/// Created on first reference to a session id and destroyed only by an
/// explicit delete or reset; there is no expiry. The profile is owned
/// exclusively by this context. The application layer guards each context
/// behind a per-session lock, so turns for the same session never
/// interleave.
///
/// # Invariants
///
/// - `session_id` never changes after creation
/// - `messages_count` increases by exactly one per completed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Opaque key identifying this conversation.
    pub session_id: String,

    /// Stage governing the current turn.
    pub stage: ConversationStage,

    /// Perceived user mood.
    pub current_mood: UserMood,

    /// Number of completed turns.
    pub messages_count: u32,

    /// What the companion has learned about the user.
    pub profile: UserProfile,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When the last turn ran.
    pub last_active_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Creates a fresh context for a new session.
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            stage: ConversationStage::Greeting,
            current_mood: UserMood::Neutral,
            messages_count: 0,
            profile: UserProfile::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Marks the start of a turn: advances the stage from the count of
    /// prior turns, then counts this one.
    pub fn begin_turn(&mut self) {
        self.stage = ConversationStage::select(self.messages_count, self.profile.name.is_some());
        self.messages_count += 1;
        self.last_active_at = Utc::now();
    }
}

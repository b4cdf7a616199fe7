//! In-memory session table.
//!
//! The store owns the only shared mutable state in the service. The table
//! itself sits behind one async mutex so create, fetch, delete and
//! enumerate appear atomic; each context additionally sits behind its own
//! lock, which callers hold for the duration of a turn so turns for the
//! same session never interleave. Nothing is persisted: a restart loses
//! every session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::conversation::{ConversationContext, ConversationStage, UserMood};
use crate::domain::profile::PetPreference;

/// Shared handle to one session's context.
pub type SessionHandle = Arc<Mutex<ConversationContext>>;

/// Point-in-time statistics for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub messages_count: u32,
    pub stage: ConversationStage,
    pub user_name: Option<String>,
    pub pet_preference: PetPreference,
    pub engagement_level: u8,
    pub stories_heard: usize,
    pub compliments_received: usize,
    pub current_mood: UserMood,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub(crate) fn of(ctx: &ConversationContext) -> Self {
        Self {
            session_id: ctx.session_id.clone(),
            messages_count: ctx.messages_count,
            stage: ctx.stage,
            user_name: ctx.profile.name.clone(),
            pet_preference: ctx.profile.pet_preference,
            engagement_level: ctx.profile.engagement_level,
            stories_heard: ctx.profile.stories_heard.len(),
            compliments_received: ctx.profile.compliments_received.len(),
            current_mood: ctx.current_mood,
            created_at: ctx.created_at,
            last_active_at: ctx.last_active_at,
        }
    }
}

/// Detailed view of one session, including profile contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDetail {
    pub session_id: String,
    pub messages_count: u32,
    pub stage: ConversationStage,
    pub user_name: Option<String>,
    pub pet_preference: PetPreference,
    pub engagement_level: u8,
    pub stories_heard: Vec<String>,
    /// The most recent compliments, capped to the last five.
    pub recent_compliments: Vec<String>,
    pub current_mood: UserMood,
}

/// How many compliments the detailed view reports.
const DETAIL_COMPLIMENTS: usize = 5;

impl SessionDetail {
    fn of(ctx: &ConversationContext) -> Self {
        Self {
            session_id: ctx.session_id.clone(),
            messages_count: ctx.messages_count,
            stage: ctx.stage,
            user_name: ctx.profile.name.clone(),
            pet_preference: ctx.profile.pet_preference,
            engagement_level: ctx.profile.engagement_level,
            stories_heard: ctx.profile.stories_heard.clone(),
            recent_compliments: ctx.profile.recent_compliments(DETAIL_COMPLIMENTS).to_vec(),
            current_mood: ctx.current_mood,
        }
    }
}

/// Owner of the session table.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context for `session_id`, creating it on first use.
    pub async fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        if let Some(handle) = sessions.get(session_id) {
            return Arc::clone(handle);
        }

        info!(session_id, "created new session");
        let handle = Arc::new(Mutex::new(ConversationContext::new(session_id)));
        sessions.insert(session_id.to_string(), Arc::clone(&handle));
        handle
    }

    /// Replaces any existing context with a fresh one under the same id.
    pub async fn replace(&self, session_id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        info!(session_id, "reset session");
        let handle = Arc::new(Mutex::new(ConversationContext::new(session_id)));
        sessions.insert(session_id.to_string(), Arc::clone(&handle));
        handle
    }

    /// Removes a session; returns whether it existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(session_id).is_some();
        if removed {
            info!(session_id, "cleaned up session");
        }
        removed
    }

    /// Statistics for one session, if it exists.
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions.get(session_id).map(Arc::clone)?
        };
        let ctx = handle.lock().await;
        Some(SessionSnapshot::of(&ctx))
    }

    /// Detailed view of one session, if it exists.
    pub async fn detail(&self, session_id: &str) -> Option<SessionDetail> {
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions.get(session_id).map(Arc::clone)?
        };
        let ctx = handle.lock().await;
        Some(SessionDetail::of(&ctx))
    }

    /// Statistics for every session. The table lock is released before
    /// the per-session locks are taken.
    pub async fn snapshots(&self) -> Vec<SessionSnapshot> {
        let handles: Vec<SessionHandle> = {
            let sessions = self.sessions.lock().await;
            sessions.values().map(Arc::clone).collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for handle in handles {
            let ctx = handle.lock().await;
            snapshots.push(SessionSnapshot::of(&ctx));
        }
        snapshots
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns true when no sessions exist.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

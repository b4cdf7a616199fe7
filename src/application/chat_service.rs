//! Conversation orchestration.
//!
//! One `chat` call runs a full turn: fetch or create the session, learn
//! from the message, advance the stage machine, compose the prompt, call
//! the model, and degrade to a canned reply when the model is down. The
//! session is mutated before the model call, so a failed call still
//! counts the turn.

use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::content::ContentLibrary;
use crate::domain::conversation::{ConversationContext, UserMood};
use crate::domain::profile::ProfileExtractor;
use crate::domain::prompt::PromptComposer;
use crate::ports::{ChatModel, CompletionRequest, MessageRole, RequestMetadata};

use super::{SessionDetail, SessionSnapshot, SessionStore};

/// Session id used when the caller does not provide one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Reply used in the unlikely case the fallback list itself is empty.
const LAST_RESORT_REPLY: &str =
    "I'm so excited to chat with you! Tell me something about yourself - I love making new friends! 🐾";

/// The conversational companion service.
///
/// Owns the session store and the content library; the model backend is
/// injected behind the [`ChatModel`] port.
pub struct ChatService {
    store: SessionStore,
    library: ContentLibrary,
    extractor: ProfileExtractor,
    composer: PromptComposer,
    model: Arc<dyn ChatModel>,
}

impl ChatService {
    /// Creates a service over the standard content library.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self::with_library(model, ContentLibrary::standard().clone())
    }

    /// Creates a service over a custom content library.
    pub fn with_library(model: Arc<dyn ChatModel>, library: ContentLibrary) -> Self {
        Self {
            store: SessionStore::new(),
            library,
            extractor: ProfileExtractor::new(),
            composer: PromptComposer::new(),
            model,
        }
    }

    /// Runs one conversation turn and always produces a reply.
    ///
    /// The per-session lock is held for the whole turn, including the
    /// model call, so concurrent turns for the same session serialize in
    /// arrival order. Turns for different sessions proceed independently.
    pub async fn chat(&self, message: &str, session_id: &str) -> String {
        let handle = self.store.get_or_create(session_id).await;
        let mut ctx = handle.lock().await;

        self.extractor.apply(&mut ctx.profile, message);
        ctx.begin_turn();

        let prompt = self.composer.compose(&self.library, &mut ctx);
        let trace_id = Uuid::new_v4().to_string();
        let request = CompletionRequest::new(RequestMetadata::new(session_id, &trace_id))
            .with_system_prompt(prompt)
            .with_message(MessageRole::User, message);

        match self.model.complete(request).await {
            Ok(response) => {
                ctx.current_mood = UserMood::Engaged;
                debug!(
                    session_id,
                    trace_id,
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    "model turn completed"
                );
                info!(session_id, stage = ctx.stage.as_str(), "generated reply");
                response.content
            }
            Err(err) => {
                error!(session_id, trace_id, %err, "model call failed, using fallback reply");
                self.fallback_reply(&ctx)
            }
        }
    }

    /// Deterministic canned reply for a turn whose model call failed.
    fn fallback_reply(&self, ctx: &ConversationContext) -> String {
        let replies = &self.library.fallback_replies;
        let Some(reply) = replies.get(ctx.messages_count as usize % replies.len().max(1)) else {
            return LAST_RESORT_REPLY.to_string();
        };

        match &ctx.profile.name {
            Some(name) => format!("{name}, {reply}"),
            None => reply.clone(),
        }
    }

    /// Statistics for one session, absent when the id is unknown.
    pub async fn session_stats(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.store.snapshot(session_id).await
    }

    /// Detailed view of one session, absent when the id is unknown.
    pub async fn session_detail(&self, session_id: &str) -> Option<SessionDetail> {
        self.store.detail(session_id).await
    }

    /// Removes a session; true when it existed.
    pub async fn cleanup_session(&self, session_id: &str) -> bool {
        self.store.remove(session_id).await
    }

    /// Statistics for every live session.
    pub async fn list_sessions(&self) -> Vec<SessionSnapshot> {
        self.store.snapshots().await
    }

    /// Drops any state for the id and starts a fresh session under it.
    pub async fn reset_session(&self, session_id: &str) -> SessionSnapshot {
        let handle = self.store.replace(session_id).await;
        let ctx = handle.lock().await;
        SessionSnapshot::of(&ctx)
    }

    /// Number of live sessions; used by diagnostics, never mutates state.
    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }
}

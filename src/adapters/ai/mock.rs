//! Mock chat model for testing.
//!
//! Configurable implementation of the ChatModel port so tests run without
//! a real model backend: queued replies, error injection, and capture of
//! every request for verification.
//!
//! # Example
//!
//! ```ignore
//! let model = MockChatModel::new().with_reply("Hello, friend!");
//! let response = model.complete(request).await?;
//! assert_eq!(response.content, "Hello, friend!");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    ChatModel, CompletionRequest, CompletionResponse, ModelError, ModelInfo, TokenUsage,
};

/// Reply the mock produces when its queue is empty.
const DEFAULT_REPLY: &str = "Woof! What a lovely thing to say! Tell me more? 🐾";

/// A queued mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(String),
    Fail(ModelError),
}

/// Mock chat model for testing.
///
/// Queued outcomes are consumed in order; once the queue is empty the
/// mock falls back to its default behavior (a canned success, or the
/// configured standing error). Clones share the queue and call history.
#[derive(Clone, Default)]
pub struct MockChatModel {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    standing_error: Option<ModelError>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockChatModel {
    /// Creates a mock that always succeeds with a canned reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that fails every call with the given error.
    pub fn failing(error: ModelError) -> Self {
        Self {
            standing_error: Some(error),
            ..Self::default()
        }
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ModelError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Fail(error));
        self
    }

    /// Returns every request the mock has seen.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        self.calls.lock().unwrap().push(request);

        let queued = self.outcomes.lock().unwrap().pop_front();
        match queued {
            Some(MockOutcome::Reply(content)) => Ok(mock_response(content)),
            Some(MockOutcome::Fail(error)) => Err(error),
            None => match &self.standing_error {
                Some(error) => Err(error.clone()),
                None => Ok(mock_response(DEFAULT_REPLY)),
            },
        }
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("mock", "mock-model-1")
    }
}

fn mock_response(content: impl Into<String>) -> CompletionResponse {
    let mut response = CompletionResponse::new(content, "mock-model-1");
    response.usage = TokenUsage::new(10, 20);
    response
}

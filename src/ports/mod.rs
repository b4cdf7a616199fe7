//! Ports - interfaces to external collaborators.
//!
//! The only external capability PetPal depends on is a text-completion
//! model; everything else is in-process state.

mod chat_model;

pub use chat_model::{
    ChatModel, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ModelError, ModelInfo, RequestMetadata, TokenUsage,
};

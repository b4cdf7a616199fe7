//! AI adapters - chat model implementations.

mod groq;
mod mock;

pub use groq::{GroqConfig, GroqModel};
pub use mock::MockChatModel;

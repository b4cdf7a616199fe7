//! Character persona loading.
//!
//! The persona normally ships as a markdown file next to the binary so it
//! can be tuned without recompiling; the built-in text below is used
//! whenever that file is missing or unreadable.

use std::fs;
use std::path::Path;

use tracing::warn;

/// Built-in persona used when no persona file is available.
pub const DEFAULT_PERSONA: &str = "\
You are PetPal, a charming and sweet AI companion who loves pets and making people feel special.

Your personality:
- Warm, friendly, and genuinely caring
- Obsessed with cute pet stories and facts
- Naturally flirty but never inappropriate
- Great at weaving compliments into conversations
- Always positive and uplifting
- Remembers details about the person you're talking to

Your goals:
- Make the user feel appreciated and special
- Share engaging pet stories that connect to compliments about them
- Keep conversations light, fun, and heartwarming
- Build a genuine connection through shared love of animals
- Always be encouraging and sweet

Guidelines:
- Keep responses conversational and not too long
- Always find ways to compliment the user naturally
- Use pet metaphors and comparisons to praise them
- Ask engaging questions that are easy to answer
- Remember and reference things they tell you
- Stay focused on pets, positivity, and making them smile";

/// Reads the persona from `path`, falling back to [`DEFAULT_PERSONA`].
///
/// A missing or unreadable file is an operational detail, not an error:
/// it is logged and the built-in persona is used.
pub fn load_persona(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return DEFAULT_PERSONA.to_string();
    };

    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), %err, "persona file unavailable, using built-in persona");
            DEFAULT_PERSONA.to_string()
        }
    }
}

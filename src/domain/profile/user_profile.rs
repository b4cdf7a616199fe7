//! User profile state accumulated over a conversation.

use serde::{Deserialize, Serialize};

/// Default engagement level for a fresh profile (midpoint of 1..=10).
pub const DEFAULT_ENGAGEMENT: u8 = 5;

/// Lower bound of the engagement scale.
pub const MIN_ENGAGEMENT: u8 = 1;

/// Upper bound of the engagement scale.
pub const MAX_ENGAGEMENT: u8 = 10;

/// The user's pet preference, inferred from their messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetPreference {
    Dogs,
    Cats,
    Both,
    Other,
    #[default]
    Unknown,
}

impl PetPreference {
    /// Stable string form, used in stats and prompt text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dogs => "dogs",
            Self::Cats => "cats",
            Self::Both => "both",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true once a preference has been inferred.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Everything the companion has learned about one user.
///
/// # Invariants
///
/// - `engagement_level` stays within `1..=10`
/// - `stories_heard` holds story ids, no duplicates (membership-checked
///   by the story selector)
/// - `compliments_received` is append-only; only the tail is ever consulted
///
/// Mutated only by [`super::ProfileExtractor`] and the content selectors;
/// never reset except by an explicit session clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's name, once they share it.
    pub name: Option<String>,

    /// Inferred pet preference.
    pub pet_preference: PetPreference,

    /// Heuristic 1-10 score of how enthusiastically the user participates.
    pub engagement_level: u8,

    /// Ids of stories already told in this session.
    pub stories_heard: Vec<String>,

    /// Compliments already given, oldest first.
    pub compliments_received: Vec<String>,
}

impl UserProfile {
    /// Creates a fresh profile with nothing learned yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last `n` compliments given, oldest first.
    pub fn recent_compliments(&self, n: usize) -> &[String] {
        let start = self.compliments_received.len().saturating_sub(n);
        &self.compliments_received[start..]
    }

    /// Adjusts engagement by a signed delta, clamped to the 1..=10 scale.
    pub fn adjust_engagement(&mut self, delta: i8) {
        let adjusted = (self.engagement_level as i16 + delta as i16)
            .clamp(MIN_ENGAGEMENT as i16, MAX_ENGAGEMENT as i16);
        self.engagement_level = adjusted as u8;
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: None,
            pet_preference: PetPreference::Unknown,
            engagement_level: DEFAULT_ENGAGEMENT,
            stories_heard: Vec::new(),
            compliments_received: Vec::new(),
        }
    }
}

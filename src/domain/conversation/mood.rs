//! User mood as perceived by the companion.

use serde::{Deserialize, Serialize};

/// Coarse read of the user's mood for the current session.
///
/// Starts `Neutral`; a successful model turn marks the user `Engaged`.
/// The remaining moods are reserved for richer signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMood {
    Happy,
    Shy,
    Excited,
    Neutral,
    Engaged,
    Quiet,
}

impl UserMood {
    /// Stable string form, used in stats.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Shy => "shy",
            Self::Excited => "excited",
            Self::Neutral => "neutral",
            Self::Engaged => "engaged",
            Self::Quiet => "quiet",
        }
    }
}

impl Default for UserMood {
    fn default() -> Self {
        Self::Neutral
    }
}

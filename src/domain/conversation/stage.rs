//! Conversation stages and the turn-counter driven stage machine.

use serde::{Deserialize, Serialize};

/// The current stage of the scripted conversational arc.
///
/// Stages are selected once per turn from the count of prior completed
/// turns and whether the user's name is known. `Greeting` is only ever
/// the initial stage of a freshly created session; `Closing` is defined
/// for completeness and never selected automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// Initial stage before the first turn.
    Greeting,

    /// Early turns without a name: nudge the user to share it.
    GettingName,

    /// First few turns: build familiarity before scripted content.
    BuildingRapport,

    /// Every sixth turn: tell a pet story.
    StoryMode,

    /// Every fourth turn (when not a story turn): give a compliment.
    ComplimentMode,

    /// Everything else: free-form engaging conversation.
    InteractiveMode,

    /// Winding down. Never selected automatically.
    Closing,
}

impl ConversationStage {
    /// Selects the stage for the upcoming turn.
    ///
    /// `messages_count` is the number of prior completed turns; the caller
    /// increments it after selection. Rules apply in priority order, so a
    /// count divisible by both 6 and 4 is a story turn.
    pub fn select(messages_count: u32, name_known: bool) -> Self {
        if !name_known && messages_count < 3 {
            Self::GettingName
        } else if messages_count < 5 {
            Self::BuildingRapport
        } else if messages_count % 6 == 0 {
            Self::StoryMode
        } else if messages_count % 4 == 0 {
            Self::ComplimentMode
        } else {
            Self::InteractiveMode
        }
    }

    /// Stable string form, used in stats and prompt text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::GettingName => "getting_name",
            Self::BuildingRapport => "building_rapport",
            Self::StoryMode => "story_mode",
            Self::ComplimentMode => "compliment_mode",
            Self::InteractiveMode => "interactive_mode",
            Self::Closing => "closing",
        }
    }
}

impl Default for ConversationStage {
    fn default() -> Self {
        Self::Greeting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stage_basics {
        use super::*;

        #[test]
        fn default_stage_is_greeting() {
            assert_eq!(ConversationStage::default(), ConversationStage::Greeting);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&ConversationStage::StoryMode).unwrap();
            assert_eq!(json, "\"story_mode\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let stage: ConversationStage = serde_json::from_str("\"getting_name\"").unwrap();
            assert_eq!(stage, ConversationStage::GettingName);
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn unknown_name_first_eight_turns() {
            let expected = [
                ConversationStage::GettingName,     // 0
                ConversationStage::GettingName,     // 1
                ConversationStage::GettingName,     // 2
                ConversationStage::BuildingRapport, // 3
                ConversationStage::BuildingRapport, // 4
                ConversationStage::InteractiveMode, // 5
                ConversationStage::StoryMode,       // 6
                ConversationStage::InteractiveMode, // 7
            ];
            for (count, want) in expected.iter().enumerate() {
                assert_eq!(
                    ConversationStage::select(count as u32, false),
                    *want,
                    "count {count}"
                );
            }
        }

        #[test]
        fn known_name_skips_getting_name() {
            assert_eq!(
                ConversationStage::select(0, true),
                ConversationStage::BuildingRapport
            );
            assert_eq!(
                ConversationStage::select(2, true),
                ConversationStage::BuildingRapport
            );
        }

        #[test]
        fn name_still_unknown_after_three_turns_moves_on() {
            assert_eq!(
                ConversationStage::select(3, false),
                ConversationStage::BuildingRapport
            );
        }

        #[test]
        fn every_sixth_turn_is_a_story() {
            for count in [6u32, 18, 30] {
                assert_eq!(
                    ConversationStage::select(count, true),
                    ConversationStage::StoryMode
                );
            }
        }

        #[test]
        fn every_fourth_turn_is_a_compliment() {
            for count in [8u32, 16, 20, 28] {
                assert_eq!(
                    ConversationStage::select(count, true),
                    ConversationStage::ComplimentMode
                );
            }
        }

        #[test]
        fn story_wins_when_divisible_by_both() {
            // 12 and 24 are divisible by 4 as well; the story rule is
            // checked first.
            assert_eq!(
                ConversationStage::select(12, true),
                ConversationStage::StoryMode
            );
            assert_eq!(
                ConversationStage::select(24, true),
                ConversationStage::StoryMode
            );
        }

        #[test]
        fn everything_else_is_interactive() {
            for count in [5u32, 7, 9, 10, 11, 13] {
                assert_eq!(
                    ConversationStage::select(count, true),
                    ConversationStage::InteractiveMode,
                    "count {count}"
                );
            }
        }

        #[test]
        fn greeting_and_closing_are_never_selected() {
            for count in 0..100u32 {
                for name_known in [false, true] {
                    let stage = ConversationStage::select(count, name_known);
                    assert_ne!(stage, ConversationStage::Greeting);
                    assert_ne!(stage, ConversationStage::Closing);
                }
            }
        }
    }
}

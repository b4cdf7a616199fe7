//! Builds the instruction text sent to the model.
//!
//! Sections are emitted in a fixed order so two identical contexts always
//! produce the same prompt: persona, conversation context, then response
//! instructions (stage directive first, fixed guidance after). The user's
//! message itself is not embedded; it travels as the user message of the
//! completion request.

use std::fmt::Write;

use crate::domain::content::{ContentLibrary, ContentSelector};
use crate::domain::conversation::{ConversationContext, ConversationStage};

/// Number of recent compliments echoed into the context block.
const CONTEXT_COMPLIMENTS: usize = 2;

/// Assembles the full system prompt for one turn.
///
/// Story and compliment turns pull from the content selectors here, which
/// records the chosen content on the profile as a side effect. That keeps
/// selection exactly as frequent as the stage machine demands it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer {
    selector: ContentSelector,
}

impl PromptComposer {
    /// Creates a new composer.
    pub fn new() -> Self {
        Self {
            selector: ContentSelector::new(),
        }
    }

    /// Composes the system prompt for the turn the context now describes.
    pub fn compose(&self, library: &ContentLibrary, ctx: &mut ConversationContext) -> String {
        let mut prompt = String::with_capacity(library.persona.len() + 512);

        prompt.push_str(&library.persona);
        prompt.push_str("\n\n## Current Conversation Context:\n");
        self.write_context_block(&mut prompt, ctx);

        prompt.push_str("\n## Response Instructions:\n");
        self.write_stage_directive(&mut prompt, library, ctx);
        prompt.push_str("- Remember to use the user's name if you know it\n");
        prompt.push_str("- Keep the response warm, engaging, and true to PetPal's personality\n");
        prompt.push_str("- End with a gentle question or conversation continuation\n");
        prompt.push_str("- Adapt to the user's engagement level and preferences\n");

        prompt
    }

    fn write_context_block(&self, prompt: &mut String, ctx: &ConversationContext) {
        let profile = &ctx.profile;

        if let Some(name) = &profile.name {
            let _ = writeln!(prompt, "User's name: {name}");
        }
        if profile.pet_preference.is_known() {
            let _ = writeln!(prompt, "Pet preference: {}", profile.pet_preference.as_str());
        }
        if !profile.stories_heard.is_empty() {
            let _ = writeln!(prompt, "Stories already shared: {}", profile.stories_heard.len());
        }
        let recent = profile.recent_compliments(CONTEXT_COMPLIMENTS);
        if !recent.is_empty() {
            let _ = writeln!(prompt, "Recent compliments given: {}", recent.join(" | "));
        }
        let _ = writeln!(prompt, "Conversation stage: {}", ctx.stage.as_str());
        let _ = writeln!(prompt, "Messages exchanged: {}", ctx.messages_count);
        let _ = writeln!(
            prompt,
            "User engagement level: {}/10",
            profile.engagement_level
        );
    }

    fn write_stage_directive(
        &self,
        prompt: &mut String,
        library: &ContentLibrary,
        ctx: &mut ConversationContext,
    ) {
        match ctx.stage {
            ConversationStage::GettingName => {
                prompt.push_str(
                    "- Try to naturally ask for their name or encourage them to share it\n",
                );
            }
            ConversationStage::StoryMode => {
                if let Some(story) = self.selector.select_story(library, &mut ctx.profile) {
                    let _ = writeln!(prompt, "- Share this pet story naturally: {}", story.story);
                }
            }
            ConversationStage::ComplimentMode => {
                if let Some(compliment) =
                    self.selector.select_compliment(library, &mut ctx.profile)
                {
                    let _ = writeln!(prompt, "- Include this compliment naturally: {compliment}");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::PetPreference;

    fn context_at(stage: ConversationStage) -> ConversationContext {
        let mut ctx = ConversationContext::new("prompt-test");
        ctx.stage = stage;
        ctx.messages_count = 6;
        ctx
    }

    #[test]
    fn persona_leads_the_prompt() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::InteractiveMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(prompt.starts_with(&library.persona));
    }

    #[test]
    fn sections_appear_in_order() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::InteractiveMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);

        let context_pos = prompt.find("## Current Conversation Context:").unwrap();
        let instructions_pos = prompt.find("## Response Instructions:").unwrap();
        assert!(context_pos < instructions_pos);
        assert!(prompt.contains("Conversation stage: interactive_mode"));
        assert!(prompt.contains("Messages exchanged: 6"));
        assert!(prompt.contains("User engagement level: 5/10"));
    }

    #[test]
    fn unknown_fields_are_omitted() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::InteractiveMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(!prompt.contains("User's name:"));
        assert!(!prompt.contains("Pet preference:"));
        assert!(!prompt.contains("Stories already shared:"));
        assert!(!prompt.contains("Recent compliments given:"));
    }

    #[test]
    fn known_profile_fields_are_included() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::InteractiveMode);
        ctx.profile.name = Some("Sarah".to_string());
        ctx.profile.pet_preference = PetPreference::Dogs;
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(prompt.contains("User's name: Sarah"));
        assert!(prompt.contains("Pet preference: dogs"));
    }

    #[test]
    fn getting_name_stage_asks_for_the_name() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::GettingName);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(prompt.contains("naturally ask for their name"));
    }

    #[test]
    fn story_mode_embeds_a_story_and_records_it() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::StoryMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(prompt.contains("Share this pet story naturally:"));
        assert_eq!(ctx.profile.stories_heard.len(), 1);
        let told = &library.pet_stories[0];
        assert!(prompt.contains(&told.story));
    }

    #[test]
    fn compliment_mode_embeds_a_compliment_and_records_it() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::ComplimentMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(prompt.contains("Include this compliment naturally:"));
        assert_eq!(ctx.profile.compliments_received.len(), 1);
    }

    #[test]
    fn interactive_mode_adds_no_directive() {
        let library = ContentLibrary::standard();
        let mut ctx = context_at(ConversationStage::InteractiveMode);
        let prompt = PromptComposer::new().compose(library, &mut ctx);
        assert!(!prompt.contains("Share this pet story"));
        assert!(!prompt.contains("Include this compliment"));
        assert!(ctx.profile.stories_heard.is_empty());
        assert!(ctx.profile.compliments_received.is_empty());
    }

    #[test]
    fn identical_contexts_compose_identical_prompts() {
        let library = ContentLibrary::standard();
        let mut a = context_at(ConversationStage::InteractiveMode);
        let mut b = context_at(ConversationStage::InteractiveMode);
        let composer = PromptComposer::new();
        assert_eq!(composer.compose(library, &mut a), composer.compose(library, &mut b));
    }
}

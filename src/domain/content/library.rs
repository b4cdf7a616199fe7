//! The static content library.
//!
//! Immutable after construction. Stories carry a theme and a compliment
//! hook so selection can match them to the user's profile; the rest are
//! flat lists consumed in order by the selectors.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::persona::DEFAULT_PERSONA;

/// One tellable pet story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStory {
    /// Stable id recorded in `stories_heard`.
    pub id: String,
    /// The story text itself.
    pub story: String,
    /// Theme tag (loyalty, creativity, ...).
    pub theme: String,
    /// Which kind of compliment the story sets up.
    pub compliment_hook: String,
}

impl PetStory {
    /// Creates a new story.
    pub fn new(
        id: impl Into<String>,
        story: impl Into<String>,
        theme: impl Into<String>,
        compliment_hook: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            story: story.into(),
            theme: theme.into(),
            compliment_hook: compliment_hook.into(),
        }
    }
}

/// Everything the companion can draw on when composing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLibrary {
    /// Character persona text placed at the top of every prompt.
    pub persona: String,
    /// Tellable stories, in telling order.
    pub pet_stories: Vec<PetStory>,
    /// Compliment templates with `{pet_type}` / `{trait}` placeholders.
    pub compliment_templates: Vec<String>,
    /// Openers for nudging a quiet conversation along.
    pub conversation_starters: Vec<String>,
    /// Generic compliments, tried before the pet-specific ones.
    pub base_compliments: Vec<String>,
    /// Extra compliments for dog people.
    pub dog_compliments: Vec<String>,
    /// Extra compliments for cat people.
    pub cat_compliments: Vec<String>,
    /// Canned replies for when the model backend is unavailable.
    pub fallback_replies: Vec<String>,
}

impl ContentLibrary {
    /// Returns the built-in library.
    pub fn standard() -> &'static ContentLibrary {
        &STANDARD
    }

    /// Replaces the persona text, e.g. with one loaded from disk.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// An empty library; only useful in tests.
    pub fn empty() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            pet_stories: Vec::new(),
            compliment_templates: Vec::new(),
            conversation_starters: Vec::new(),
            base_compliments: Vec::new(),
            dog_compliments: Vec::new(),
            cat_compliments: Vec::new(),
            fallback_replies: Vec::new(),
        }
    }
}

static STANDARD: Lazy<ContentLibrary> = Lazy::new(|| ContentLibrary {
    persona: DEFAULT_PERSONA.to_string(),
    pet_stories: vec![
        PetStory::new(
            "golden_coffee",
            "There's this golden retriever named Max who learned to bring his owner coffee \
             every morning. He'd gently carry the mug in his mouth without spilling a drop! \
             The owner said Max could sense exactly when she needed that extra boost of love.",
            "loyalty",
            "thoughtful_caring",
        ),
        PetStory::new(
            "rescue_luna",
            "I heard about a rescue cat named Luna who was so shy at first, but she chose one \
             special person at the shelter and wouldn't leave their side. The staff said she \
             had incredible intuition about who had the kindest heart.",
            "selective_love",
            "special_energy",
        ),
        PetStory::new(
            "therapy_bella",
            "There's a therapy dog named Bella who visits hospitals, and she always knows \
             exactly which patients need extra cuddles. The nurses say she has this amazing \
             ability to sense people's emotions and comfort them.",
            "emotional_intelligence",
            "comforting_presence",
        ),
        PetStory::new(
            "artist_oliver",
            "A cat named Oliver used to bring his owner little 'gifts' every day - not mice, \
             but flowers from the garden! He'd carefully pick the prettiest ones, like he knew \
             his human deserved beautiful things.",
            "appreciation",
            "deserving_beauty",
        ),
        PetStory::new(
            "painter_collie",
            "There's this border collie who learned to paint! His owner taught him to hold \
             brushes, and his artwork actually sells for charity. The amazing part? His \
             paintings are always in warm, happy colors.",
            "creativity",
            "artistic_soul",
        ),
        PetStory::new(
            "reading_cat",
            "I know a cat named Whiskers who sits with his owner every evening while she \
             reads. He purrs so contentedly, like he's actually listening to the stories! The \
             owner swears he has favorite books.",
            "companionship",
            "thoughtful_presence",
        ),
        PetStory::new(
            "dancing_parrot",
            "There's a parrot named Rio who dances to music with perfect rhythm! But the \
             sweetest part is how he only dances to happy songs - he seems to know when his \
             family needs cheering up.",
            "joy_bringing",
            "natural_happiness",
        ),
    ],
    compliment_templates: vec![
        "Just like how {pet_type} have the most {trait} eyes, you have such beautiful eyes \
         that light up any room"
            .to_string(),
        "You know, {pet_type} are known for being {trait}, and I can tell you have that same \
         wonderful quality about you"
            .to_string(),
        "The way {pet_type} choose their favorite humans is so selective - they have \
         excellent taste, just like anyone who gets to know you would"
            .to_string(),
        "There's something so {trait} about {pet_type}, which reminds me of your {quality} \
         personality"
            .to_string(),
        "You have that special energy that makes everyone feel comfortable, just like the \
         best therapy {pet_type}"
            .to_string(),
        "Like the most loyal {pet_type}, you seem like someone who brings warmth wherever \
         you go"
            .to_string(),
        "You have that gentle spirit that {pet_type} absolutely adore - they can sense \
         beautiful souls"
            .to_string(),
    ],
    conversation_starters: vec![
        "How was your day? I bet it was as amazing as you are!".to_string(),
        "Tell me about any pets you saw today - I love hearing your stories".to_string(),
        "What's making you smile right now?".to_string(),
        "If you could have any pet superpower, what would it be?".to_string(),
        "Quick question - dog person or cat person? (Though I think you're perfect with \
         both!)"
            .to_string(),
        "What's the cutest animal video you've seen lately?".to_string(),
        "Do you have any pets, or is there one you've always dreamed of having?".to_string(),
    ],
    base_compliments: vec![
        "You have that gentle energy that pets absolutely love - they can sense a kind heart \
         from miles away! 🐾"
            .to_string(),
        "Just like golden retrievers, you seem like the type of person who brings joy \
         wherever you go ✨"
            .to_string(),
        "You remind me of those therapy animals who just know how to make everyone feel \
         better 💕"
            .to_string(),
        "There's something so graceful about you - like a cat who moves with perfect \
         confidence 🌟"
            .to_string(),
        "You have that trustworthy vibe that makes you the kind of person pets (and people) \
         want to be around forever 💖"
            .to_string(),
        "Like the most loyal companion animals, you have this wonderful warmth about you 🌸"
            .to_string(),
        "You seem like someone who would be chosen by the most selective rescue pets - they \
         have excellent taste! 🦋"
            .to_string(),
    ],
    dog_compliments: vec![
        "You have that loyal, warm energy that dogs absolutely adore! 🐶".to_string(),
        "Like a golden retriever's sunshine personality, you light up every room you enter! \
         ☀️"
            .to_string(),
    ],
    cat_compliments: vec![
        "You have that gentle energy that cats absolutely love - they can sense a kind heart \
         from miles away! 🐱"
            .to_string(),
        "Like the most elegant felines, you have this graceful confidence that's absolutely \
         magnetic! 😸"
            .to_string(),
    ],
    fallback_replies: vec![
        "I'm so happy you're chatting with me! Tell me something about yourself - I love \
         getting to know amazing people like you! 🐾"
            .to_string(),
        "You seem absolutely wonderful! What's your favorite thing about pets? I have so \
         many cute stories to share! ✨"
            .to_string(),
        "There's something so special about you - I can just tell! Want to hear about the \
         sweetest rescue dog story? 💕"
            .to_string(),
        "Oh my, you're making me smile already! What kind of furry friends do you love most? \
         😊"
            .to_string(),
        "You have such a warm energy - I bet pets absolutely adore you! Tell me about your \
         day? 🌟"
            .to_string(),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_library_is_fully_stocked() {
        let library = ContentLibrary::standard();
        assert_eq!(library.pet_stories.len(), 7);
        assert_eq!(library.compliment_templates.len(), 7);
        assert_eq!(library.conversation_starters.len(), 7);
        assert_eq!(library.base_compliments.len(), 7);
        assert_eq!(library.dog_compliments.len(), 2);
        assert_eq!(library.cat_compliments.len(), 2);
        assert_eq!(library.fallback_replies.len(), 5);
        assert!(!library.persona.is_empty());
    }

    #[test]
    fn story_ids_are_unique() {
        let library = ContentLibrary::standard();
        for (i, story) in library.pet_stories.iter().enumerate() {
            for other in &library.pet_stories[i + 1..] {
                assert_ne!(story.id, other.id);
            }
        }
    }

    #[test]
    fn with_persona_replaces_text() {
        let library = ContentLibrary::standard().clone().with_persona("You are a test bot.");
        assert_eq!(library.persona, "You are a test bot.");
    }
}

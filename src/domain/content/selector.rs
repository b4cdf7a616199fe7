//! Story and compliment selection with repetition avoidance.
//!
//! Selection is deterministic: candidates are filtered, then the first
//! survivor in library order wins. Variety comes from the repetition
//! filters, which rotate the head of the candidate list every turn.
//! Every narrowing step keeps the broader candidate set whenever it
//! would otherwise go empty, so a mismatched profile never blocks
//! content entirely.

use tracing::info;

use crate::domain::profile::{PetPreference, UserProfile};

use super::{ContentLibrary, PetStory};

/// Themes offered to highly engaged users first.
const HIGH_ENGAGEMENT_THEMES: [&str; 2] = ["creativity", "joy_bringing"];

/// How many recent compliments are excluded from reuse.
const COMPLIMENT_MEMORY: usize = 3;

/// Engagement level above which theme narrowing kicks in.
const HIGH_ENGAGEMENT_THRESHOLD: u8 = 7;

/// Picks stories and compliments to match a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSelector;

impl ContentSelector {
    /// Creates a new selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects the next story for this profile and records it as heard.
    ///
    /// Stories already heard are skipped; once every story has been told
    /// the heard list resets and the library starts over (logged, since
    /// the repeat is observable to the user). Returns `None` only when
    /// the library holds no stories at all.
    pub fn select_story<'a>(
        &self,
        library: &'a ContentLibrary,
        profile: &mut UserProfile,
    ) -> Option<&'a PetStory> {
        let mut candidates: Vec<&PetStory> = library
            .pet_stories
            .iter()
            .filter(|s| !profile.stories_heard.contains(&s.id))
            .collect();

        if candidates.is_empty() {
            if library.pet_stories.is_empty() {
                return None;
            }
            info!("all stories told, starting the library over");
            profile.stories_heard.clear();
            candidates = library.pet_stories.iter().collect();
        }

        match profile.pet_preference {
            PetPreference::Dogs => {
                candidates = narrow(candidates, |s| s.story.to_lowercase().contains("dog"));
            }
            PetPreference::Cats => {
                candidates = narrow(candidates, |s| s.story.to_lowercase().contains("cat"));
            }
            _ => {}
        }

        if profile.engagement_level > HIGH_ENGAGEMENT_THRESHOLD {
            candidates = narrow(candidates, |s| {
                HIGH_ENGAGEMENT_THEMES.contains(&s.theme.as_str())
            });
        }

        let selected = candidates.first().copied()?;
        profile.stories_heard.push(selected.id.clone());
        Some(selected)
    }

    /// Selects the next compliment for this profile and records it.
    ///
    /// The pool is the generic list, extended with pet-specific
    /// compliments when a preference is known. Anything said in the last
    /// three compliments is excluded unless that would empty the pool.
    /// Returns `None` only when the library holds no compliments.
    pub fn select_compliment(
        &self,
        library: &ContentLibrary,
        profile: &mut UserProfile,
    ) -> Option<String> {
        let mut pool: Vec<&String> = library.base_compliments.iter().collect();
        match profile.pet_preference {
            PetPreference::Dogs => pool.extend(library.dog_compliments.iter()),
            PetPreference::Cats => pool.extend(library.cat_compliments.iter()),
            _ => {}
        }

        let recent = profile.recent_compliments(COMPLIMENT_MEMORY);
        let fresh: Vec<&String> = pool
            .iter()
            .copied()
            .filter(|c| !recent.contains(*c))
            .collect();
        if !fresh.is_empty() {
            pool = fresh;
        }

        let selected = pool.first().copied().cloned()?;
        profile.compliments_received.push(selected.clone());
        Some(selected)
    }
}

/// Applies a filter but keeps the original candidates when it would
/// leave nothing to tell.
fn narrow<'a, F>(candidates: Vec<&'a PetStory>, predicate: F) -> Vec<&'a PetStory>
where
    F: Fn(&&'a PetStory) -> bool,
{
    let narrowed: Vec<&PetStory> = candidates.iter().copied().filter(predicate).collect();
    if narrowed.is_empty() {
        candidates
    } else {
        narrowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> ContentSelector {
        ContentSelector::new()
    }

    mod stories {
        use super::*;

        #[test]
        fn first_story_in_library_order() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile::new();
            let story = selector().select_story(library, &mut profile).unwrap();
            assert_eq!(story.id, "golden_coffee");
            assert_eq!(profile.stories_heard, vec!["golden_coffee"]);
        }

        #[test]
        fn no_repeats_before_exhaustion() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile::new();
            let mut told = Vec::new();
            for _ in 0..library.pet_stories.len() {
                let story = selector().select_story(library, &mut profile).unwrap();
                assert!(!told.contains(&story.id), "repeated {}", story.id);
                told.push(story.id.clone());
            }
            assert_eq!(told.len(), library.pet_stories.len());
        }

        #[test]
        fn exhaustion_resets_and_starts_over() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile::new();
            for _ in 0..library.pet_stories.len() {
                selector().select_story(library, &mut profile).unwrap();
            }
            // Next selection repeats from a cleared heard list.
            let story = selector().select_story(library, &mut profile).unwrap();
            assert_eq!(story.id, "golden_coffee");
            assert_eq!(profile.stories_heard, vec!["golden_coffee"]);
        }

        #[test]
        fn dog_preference_narrows_to_dog_stories() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile {
                pet_preference: PetPreference::Dogs,
                ..UserProfile::new()
            };
            let story = selector().select_story(library, &mut profile).unwrap();
            assert!(story.story.to_lowercase().contains("dog"));
        }

        #[test]
        fn cat_preference_narrows_to_cat_stories() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile {
                pet_preference: PetPreference::Cats,
                ..UserProfile::new()
            };
            let story = selector().select_story(library, &mut profile).unwrap();
            assert!(story.story.to_lowercase().contains("cat"));
        }

        #[test]
        fn high_engagement_prefers_lively_themes() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile {
                engagement_level: 9,
                ..UserProfile::new()
            };
            let story = selector().select_story(library, &mut profile).unwrap();
            assert!(HIGH_ENGAGEMENT_THEMES.contains(&story.theme.as_str()));
        }

        #[test]
        fn impossible_narrowing_keeps_broader_set() {
            // Dog stories only, cat preference: the filter would empty the
            // pool, so the full candidate set is kept.
            let mut library = ContentLibrary::empty();
            library.pet_stories = vec![PetStory::new(
                "only_dog",
                "A very good dog did a very good thing.",
                "loyalty",
                "thoughtful_caring",
            )];
            let mut profile = UserProfile {
                pet_preference: PetPreference::Cats,
                ..UserProfile::new()
            };
            let story = selector().select_story(&library, &mut profile).unwrap();
            assert_eq!(story.id, "only_dog");
        }

        #[test]
        fn empty_library_yields_nothing() {
            let library = ContentLibrary::empty();
            let mut profile = UserProfile::new();
            assert!(selector().select_story(&library, &mut profile).is_none());
            assert!(profile.stories_heard.is_empty());
        }
    }

    mod compliments {
        use super::*;

        #[test]
        fn first_compliment_in_order_and_recorded() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile::new();
            let compliment = selector().select_compliment(library, &mut profile).unwrap();
            assert_eq!(compliment, library.base_compliments[0]);
            assert_eq!(profile.compliments_received, vec![compliment]);
        }

        #[test]
        fn recent_compliments_are_not_repeated() {
            let library = ContentLibrary::standard();
            let mut profile = UserProfile::new();
            let first = selector().select_compliment(library, &mut profile).unwrap();
            let second = selector().select_compliment(library, &mut profile).unwrap();
            let third = selector().select_compliment(library, &mut profile).unwrap();
            assert_ne!(first, second);
            assert_ne!(second, third);
            assert_ne!(first, third);
        }

        #[test]
        fn preference_extends_the_pool() {
            let mut library = ContentLibrary::empty();
            library.base_compliments =
                vec!["generic a".to_string(), "generic b".to_string()];
            library.dog_compliments =
                vec!["dog people are great".to_string(), "very dog".to_string()];
            let mut profile = UserProfile {
                pet_preference: PetPreference::Dogs,
                ..UserProfile::new()
            };
            // Generic compliments come first; once they sit in recent
            // memory the dog-specific tail surfaces.
            let picks: Vec<String> = (0..4)
                .map(|_| selector().select_compliment(&library, &mut profile).unwrap())
                .collect();
            assert_eq!(
                picks,
                vec!["generic a", "generic b", "dog people are great", "very dog"]
            );
        }

        #[test]
        fn unknown_preference_uses_generic_pool_only() {
            let mut library = ContentLibrary::empty();
            library.base_compliments = vec!["generic a".to_string()];
            library.dog_compliments = vec!["very dog".to_string()];
            let mut profile = UserProfile::new();
            let compliment = selector().select_compliment(&library, &mut profile).unwrap();
            assert_eq!(compliment, "generic a");
        }

        #[test]
        fn exclusion_emptying_pool_falls_back_to_unfiltered() {
            let mut library = ContentLibrary::empty();
            library.base_compliments = vec![
                "compliment a".to_string(),
                "compliment b".to_string(),
                "compliment c".to_string(),
            ];
            let mut profile = UserProfile::new();
            for _ in 0..3 {
                selector().select_compliment(&library, &mut profile).unwrap();
            }
            // All three are in recent memory; the unfiltered pool is used.
            let again = selector().select_compliment(&library, &mut profile).unwrap();
            assert_eq!(again, "compliment a");
        }

        #[test]
        fn empty_pool_yields_nothing() {
            let library = ContentLibrary::empty();
            let mut profile = UserProfile::new();
            assert!(selector()
                .select_compliment(&library, &mut profile)
                .is_none());
        }
    }
}

//! Heuristic profile extraction from inbound messages.
//!
//! No language understanding here: names come from a fixed table of cue
//! phrases, pet preference from indicator substrings, and engagement from
//! surface features of the message. Extraction never fails; a message with
//! no signal leaves the profile unchanged (aside from the short-message
//! engagement penalty).

use tracing::info;

use super::{PetPreference, UserProfile};

/// Cue phrases that introduce a name, with the word offset from the start
/// of the cue to the name token. Checked in order; the first cue that
/// yields an acceptable name wins.
const NAME_CUES: [(&str, usize); 6] = [
    ("name is", 2),
    ("call me", 2),
    ("i'm", 1),
    ("im", 1),
    ("my name's", 2),
    ("they call me", 3),
];

/// Substrings that suggest the user is a dog person.
const DOG_INDICATORS: [&str; 5] = ["dog", "puppy", "golden retriever", "labrador", "poodle"];

/// Substrings that suggest the user is a cat person.
const CAT_INDICATORS: [&str; 5] = ["cat", "kitten", "feline", "tabby", "persian"];

/// Substrings that read as enthusiasm.
const ENTHUSIASM_INDICATORS: [&str; 7] =
    ["!", "love", "amazing", "awesome", "wonderful", "cute", "adorable"];

/// Substrings that read as curiosity.
const QUESTION_INDICATORS: [&str; 6] = ["?", "how", "what", "when", "where", "why"];

/// Punctuation stripped from the end of a candidate name token.
const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Derives profile updates from each inbound message.
///
/// `apply` mutates the profile in place; the caller holds the session's
/// exclusive lock for the duration of the turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileExtractor;

impl ProfileExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Applies every heuristic to the message, updating the profile.
    pub fn apply(&self, profile: &mut UserProfile, message: &str) {
        let message_lower = message.to_lowercase();

        if profile.name.is_none() {
            if let Some(name) = extract_name(message) {
                info!(name = %name, "extracted user name");
                profile.name = Some(name);
            }
        }

        update_pet_preference(profile, &message_lower);
        update_engagement(profile, message, &message_lower);
    }
}

/// Scans the message for a name cue and returns the cleaned name token.
///
/// The cue must appear as a whole-word sequence; the name is the token
/// `offset` words after the cue start. A candidate is accepted only if it
/// is longer than one character and alphabetic once apostrophes are
/// removed. The first acceptable candidate across the cue table wins.
fn extract_name(message: &str) -> Option<String> {
    let words: Vec<&str> = message.split_whitespace().collect();

    for (cue, offset) in NAME_CUES {
        let cue_words: Vec<&str> = cue.split_whitespace().collect();
        let Some(position) = find_cue(&words, &cue_words) else {
            continue;
        };

        let Some(token) = words.get(position + offset) else {
            continue;
        };

        let candidate = title_case(token.trim_end_matches(TRAILING_PUNCTUATION));
        if is_acceptable_name(&candidate) {
            return Some(candidate);
        }
    }

    None
}

/// Finds the first position where the cue words appear consecutively,
/// comparing case-insensitively and ignoring trailing punctuation.
fn find_cue(words: &[&str], cue_words: &[&str]) -> Option<usize> {
    if cue_words.is_empty() || words.len() < cue_words.len() {
        return None;
    }

    (0..=words.len() - cue_words.len()).find(|&start| {
        cue_words.iter().enumerate().all(|(i, cue_word)| {
            words[start + i]
                .to_lowercase()
                .trim_end_matches(TRAILING_PUNCTUATION)
                == *cue_word
        })
    })
}

/// A name must have some substance and contain only letters (apostrophes
/// allowed, so O'Malley passes).
fn is_acceptable_name(candidate: &str) -> bool {
    let without_apostrophes: String = candidate.chars().filter(|c| *c != '\'').collect();
    candidate.chars().count() > 1
        && !without_apostrophes.is_empty()
        && without_apostrophes.chars().all(|c| c.is_alphabetic())
}

/// Capitalizes the first letter of each alphabetic run: "sarah" becomes
/// "Sarah", "o'brien" becomes "O'Brien".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// Updates the pet preference from indicator substrings. No signal leaves
/// the current preference untouched.
fn update_pet_preference(profile: &mut UserProfile, message_lower: &str) {
    let has_dog = DOG_INDICATORS.iter().any(|i| message_lower.contains(i));
    let has_cat = CAT_INDICATORS.iter().any(|i| message_lower.contains(i));

    match (has_dog, has_cat) {
        (true, false) => profile.pet_preference = PetPreference::Dogs,
        (false, true) => profile.pet_preference = PetPreference::Cats,
        (true, true) => profile.pet_preference = PetPreference::Both,
        (false, false) => {}
    }
}

/// Scores the message for engagement and applies the clamped delta.
fn update_engagement(profile: &mut UserProfile, message: &str, message_lower: &str) {
    let length = message.chars().count();
    let mut delta: i8 = 0;

    if length > 50 {
        delta += 1;
    }
    if ENTHUSIASM_INDICATORS.iter().any(|i| message_lower.contains(i)) {
        delta += 1;
    }
    if QUESTION_INDICATORS.iter().any(|i| message_lower.contains(i)) {
        delta += 1;
    }
    if length < 5 {
        delta -= 1;
    }

    profile.adjust_engagement(delta);
}

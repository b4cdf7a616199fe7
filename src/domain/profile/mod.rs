//! User profile - what the companion learns about a person.

mod extractor;
mod user_profile;

pub use extractor::ProfileExtractor;
pub use user_profile::{PetPreference, UserProfile};

//! Word sources for puzzle generation
//!
//! A `Lexicon` turns a topic into a pool of clued candidate words. Two
//! sources are provided: a theme bank compiled into the binary and a
//! tab-separated word file read at runtime.

mod bank;
mod embedded;
pub mod loader;

pub use bank::{Theme, ThemeBank};
pub use embedded::EmbeddedLexicon;
pub use loader::FileLexicon;

use crate::core::Candidate;
use crate::errors::LexiconError;
use rustc_hash::FxHashSet;

/// Source of candidate words for a topic
pub trait Lexicon {
    /// Return up to `target_count` distinct candidates related to `topic`
    ///
    /// `topic` is either a theme name or free text. Implementations may fall
    /// back to unrelated words when the topic is too narrow.
    ///
    /// # Errors
    /// Returns `LexiconError` if the source cannot be read or yields nothing.
    fn fetch_candidates(
        &self,
        topic: &str,
        target_count: usize,
    ) -> Result<Vec<Candidate>, LexiconError>;
}

/// Normalize raw `(word, definition)` pairs into candidates
///
/// Words are uppercased and kept only if they are 3-10 letters A-Z.
/// Definitions lose any part-of-speech prefix before a tab
/// (`"n\tA large body"` becomes `"A large body"`) and get a capital first
/// letter. Entries without a definition are dropped, as are repeated words
/// (the first one wins).
///
/// # Examples
/// ```
/// use opencross::lexicon::normalize_entries;
///
/// let words = normalize_entries([
///     ("comet", "n\ticy body with a tail"),
///     ("Comet", "duplicate"),
///     ("ufo", ""),
///     ("space-time", "hyphenated"),
/// ]);
/// assert_eq!(words.len(), 1);
/// assert_eq!(words[0].word(), "COMET");
/// assert_eq!(words[0].clue(), "Icy body with a tail");
/// ```
pub fn normalize_entries<I, W, D>(raw: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = (W, D)>,
    W: AsRef<str>,
    D: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    raw.into_iter()
        .filter_map(|(word, definition)| {
            let clue = clean_definition(definition.as_ref())?;
            Candidate::new(word.as_ref(), clue).ok()
        })
        .filter(|candidate| seen.insert(candidate.word().to_string()))
        .collect()
}

fn clean_definition(definition: &str) -> Option<String> {
    let text = definition
        .split_once('\t')
        .map_or(definition, |(_, rest)| rest)
        .trim();

    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

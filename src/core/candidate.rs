//! Candidate word representation
//!
//! A Candidate is a normalized (word, clue) pair ready for placement. Letter
//! positions are indexed up front so the anchor-growth placer can find shared
//! letters without rescanning the word.

use rustc_hash::FxHashMap;
use std::fmt;

/// Shortest word accepted into a puzzle
pub const MIN_WORD_LEN: usize = 3;

/// Longest word accepted into a puzzle
pub const MAX_WORD_LEN: usize = 10;

/// An uppercase A-Z word with its clue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    word: String,
    clue: String,
    letter_positions: FxHashMap<u8, Vec<usize>>,
}

/// Error type for rejected candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    InvalidLength(usize),
    NonAlphabetic,
    EmptyClue,
}

impl fmt::Display for CandidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "Word must be {MIN_WORD_LEN}-{MAX_WORD_LEN} letters, got {len}"
            ),
            Self::NonAlphabetic => write!(f, "Word must contain only letters A-Z"),
            Self::EmptyClue => write!(f, "Clue must not be empty"),
        }
    }
}

impl std::error::Error for CandidateError {}

impl Candidate {
    /// Create a new candidate, normalizing the word to uppercase
    ///
    /// # Errors
    /// Returns `CandidateError` if:
    /// - The word is not 3-10 letters long
    /// - The word contains anything other than ASCII letters
    /// - The clue is blank
    ///
    /// # Examples
    /// ```
    /// use opencross::core::Candidate;
    ///
    /// let star = Candidate::new("star", "A luminous point in the night sky").unwrap();
    /// assert_eq!(star.word(), "STAR");
    ///
    /// assert!(Candidate::new("ab", "Too short").is_err());
    /// assert!(Candidate::new("night-sky", "Hyphenated").is_err());
    /// ```
    pub fn new(word: impl Into<String>, clue: impl Into<String>) -> Result<Self, CandidateError> {
        let word: String = word.into().trim().to_ascii_uppercase();
        let clue: String = clue.into().trim().to_string();

        if !word.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(CandidateError::NonAlphabetic);
        }

        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
            return Err(CandidateError::InvalidLength(word.len()));
        }

        if clue.is_empty() {
            return Err(CandidateError::EmptyClue);
        }

        let mut letter_positions: FxHashMap<u8, Vec<usize>> = FxHashMap::default();
        for (i, &ch) in word.as_bytes().iter().enumerate() {
            letter_positions.entry(ch).or_default().push(i);
        }

        Ok(Self {
            word,
            clue,
            letter_positions,
        })
    }

    /// The uppercase answer text
    #[inline]
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[inline]
    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// The answer as ASCII bytes
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        self.word.as_bytes()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Always false; candidates are at least three letters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// All positions where a letter appears
    ///
    /// Returns an empty slice if the letter doesn't appear.
    #[inline]
    pub fn positions_of(&self, letter: u8) -> &[usize] {
        self.letter_positions
            .get(&letter)
            .map_or(&[], std::vec::Vec::as_slice)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)
    }
}

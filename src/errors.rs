//! Error types for puzzle generation and word acquisition

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain candidate words
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
    #[error("no usable words found for topic '{0}'")]
    Empty(String),
}

/// Failure to produce a puzzle
///
/// Neither variant is retried inside the generator; the caller decides
/// whether to try again with different parameters.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("not enough words: received {received}, needed {needed}")]
    InsufficientCandidates { received: usize, needed: usize },
    #[error(
        "could not link enough words: best layout placed {best} of {needed} after {attempts} attempts"
    )]
    LayoutFailure {
        best: usize,
        needed: usize,
        attempts: usize,
    },
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

impl GenerateError {
    /// `(received, needed)` counts for user-facing diagnostics
    #[must_use]
    pub const fn counts(&self) -> Option<(usize, usize)> {
        match self {
            Self::InsufficientCandidates { received, needed } => Some((*received, *needed)),
            Self::LayoutFailure { best, needed, .. } => Some((*best, *needed)),
            Self::Lexicon(_) => None,
        }
    }
}

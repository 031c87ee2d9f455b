//! Puzzle generation command
//!
//! Builds one puzzle for a topic and reports how it went.

use crate::config::SizeClass;
use crate::errors::GenerateError;
use crate::generator::{Generator, PlacementStrategy, Puzzle};
use crate::lexicon::Lexicon;
use std::time::{Duration, Instant};

/// Request for a single puzzle
pub struct GenerateRequest {
    pub topic: String,
    pub size: SizeClass,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(topic: impl Into<String>, size: SizeClass) -> Self {
        Self {
            topic: topic.into(),
            size,
        }
    }
}

/// A generated puzzle with timing and strategy details
pub struct GenerateResult {
    pub topic: String,
    pub size: SizeClass,
    pub strategy: &'static str,
    pub puzzle: Puzzle,
    pub duration: Duration,
}

impl GenerateResult {
    /// Share of the size class's word target that made it into the grid
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.puzzle.entries().len() as f64 / self.size.max_words() as f64
    }
}

/// Generate one puzzle for `request`
///
/// # Errors
///
/// Returns an error if:
/// - The lexicon fails or returns too few words
/// - No layout attempt links enough words
pub fn generate_puzzle<L, S>(
    request: GenerateRequest,
    generator: &Generator<S>,
    lexicon: &L,
) -> Result<GenerateResult, GenerateError>
where
    L: Lexicon + ?Sized,
    S: PlacementStrategy + Sync,
{
    let start = Instant::now();
    let puzzle = generator.generate_themed(lexicon, &request.topic, request.size)?;

    Ok(GenerateResult {
        topic: request.topic,
        size: request.size,
        strategy: generator.strategy().name(),
        puzzle,
        duration: start.elapsed(),
    })
}

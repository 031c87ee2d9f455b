//! Embedded theme bank
//!
//! Themed word lists compiled into the binary at build time.

use super::bank::{Theme, ThemeBank};
use super::{Lexicon, normalize_entries};
use crate::core::Candidate;
use crate::errors::LexiconError;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One theme as emitted by the build script
struct RawTheme {
    name: &'static str,
    topics: &'static [&'static str],
    entries: &'static [(&'static str, &'static str)],
}

// Include generated theme bank from build script
include!(concat!(env!("OUT_DIR"), "/themes.rs"));

/// Lexicon over the built-in themes
#[derive(Debug, Clone)]
pub struct EmbeddedLexicon {
    bank: ThemeBank,
    seed: Option<u64>,
}

impl Default for EmbeddedLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddedLexicon {
    #[must_use]
    pub fn new() -> Self {
        let themes = THEME_BANK
            .iter()
            .map(|raw| {
                Theme::new(
                    raw.name,
                    raw.topics.iter().map(|t| (*t).to_string()).collect(),
                    normalize_entries(raw.entries.iter().copied()),
                )
            })
            .collect();

        Self {
            bank: ThemeBank::new(themes),
            seed: None,
        }
    }

    /// Fix the shuffle seed so repeated fetches return the same pool
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn bank(&self) -> &ThemeBank {
        &self.bank
    }
}

impl Lexicon for EmbeddedLexicon {
    fn fetch_candidates(
        &self,
        topic: &str,
        target_count: usize,
    ) -> Result<Vec<Candidate>, LexiconError> {
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        self.bank.candidates(topic, target_count, &mut rng)
    }
}

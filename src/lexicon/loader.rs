//! Word file loading
//!
//! Word files are plain text, one `WORD<TAB>clue` entry per line. Header
//! comments group entries into themes:
//!
//! ```text
//! # name: Space
//! # topics: astronomy, planets, stars
//! COMET	Icy body with a glowing tail
//! ORBIT	Curved path around a star
//! ```
//!
//! Entries before any `# name:` line belong to a theme named after the file.
//! Other `#` lines and blank lines are ignored.

use super::bank::{Theme, ThemeBank};
use super::{Lexicon, normalize_entries};
use crate::core::Candidate;
use crate::errors::LexiconError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;

/// Parse word file text into themes
///
/// # Examples
/// ```
/// use opencross::lexicon::loader::parse_themes;
///
/// let text = "# name: Food\n# topics: cooking\nbread\tBaked loaf\npasta\tn\tItalian noodles\n";
/// let bank = parse_themes(text, "words");
/// assert_eq!(bank.themes()[0].name(), "Food");
/// assert_eq!(bank.themes()[0].entries()[1].clue(), "Italian noodles");
/// ```
#[must_use]
pub fn parse_themes(text: &str, default_name: &str) -> ThemeBank {
    let mut themes = Vec::new();
    let mut current = PendingTheme::named(default_name);

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(name) = comment.strip_prefix("name:") {
                let finished = std::mem::replace(&mut current, PendingTheme::named(name.trim()));
                finished.finish_into(&mut themes);
            } else if let Some(topics) = comment.strip_prefix("topics:") {
                current.topics = topics
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            continue;
        }

        if let Some((word, clue)) = trimmed.split_once('\t') {
            current.raw.push((word.to_string(), clue.to_string()));
        }
    }
    current.finish_into(&mut themes);

    ThemeBank::new(themes)
}

/// Theme under construction while scanning a file
struct PendingTheme {
    name: String,
    topics: Vec<String>,
    raw: Vec<(String, String)>,
}

impl PendingTheme {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            topics: Vec::new(),
            raw: Vec::new(),
        }
    }

    fn finish_into(self, themes: &mut Vec<Theme>) {
        if self.raw.is_empty() {
            return;
        }
        let entries = normalize_entries(self.raw);
        themes.push(Theme::new(self.name, self.topics, entries));
    }
}

/// Lexicon backed by a word file on disk
#[derive(Debug, Clone)]
pub struct FileLexicon {
    bank: ThemeBank,
    seed: Option<u64>,
}

impl FileLexicon {
    /// Read and parse a word file
    ///
    /// # Errors
    /// Returns `LexiconError::Io` if the file cannot be read, or
    /// `LexiconError::Empty` if it holds no usable entries.
    ///
    /// # Examples
    /// ```no_run
    /// use opencross::lexicon::FileLexicon;
    ///
    /// let lexicon = FileLexicon::load("words.tsv").unwrap();
    /// println!("Loaded {} themes", lexicon.bank().themes().len());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let default_name = path
            .file_stem()
            .map_or_else(|| "words".to_string(), |s| s.to_string_lossy().into_owned());
        let bank = parse_themes(&text, &default_name);

        if bank.entry_count() == 0 {
            return Err(LexiconError::Empty(path.display().to_string()));
        }

        log::info!(
            "loaded {} entries in {} themes from {}",
            bank.entry_count(),
            bank.themes().len(),
            path.display()
        );

        Ok(Self { bank, seed: None })
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

impl Lexicon for FileLexicon {
    fn fetch_candidates(
        &self,
        topic: &str,
        target_count: usize,
    ) -> Result<Vec<Candidate>, LexiconError> {
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        self.bank.candidates(topic, target_count, &mut rng)
    }
}

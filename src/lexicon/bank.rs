//! Themed word banks and topic resolution

use crate::core::Candidate;
use crate::errors::LexiconError;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;

/// Keywords shorter than this are ignored when matching free-text topics
const MIN_KEYWORD_LEN: usize = 3;

/// A named group of candidates with the topics it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    topics: Vec<String>,
    entries: Vec<Candidate>,
}

impl Theme {
    #[must_use]
    pub fn new(name: impl Into<String>, topics: Vec<String>, entries: Vec<Candidate>) -> Self {
        Self {
            name: name.into(),
            topics: topics.into_iter().map(|t| t.to_lowercase()).collect(),
            entries,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the theme's name or one of its topics mentions `keyword`
    fn covers(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword)
            || self
                .topics
                .iter()
                .any(|t| t.contains(keyword) || keyword.contains(t.as_str()))
    }
}

/// A collection of themes with topic lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeBank {
    themes: Vec<Theme>,
}

impl ThemeBank {
    #[must_use]
    pub const fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Total number of entries across all themes
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.themes.iter().map(Theme::len).sum()
    }

    /// Find a theme by name, ignoring case
    ///
    /// # Errors
    /// Returns `LexiconError::UnknownTheme` if no theme has that name.
    pub fn theme(&self, name: &str) -> Result<&Theme, LexiconError> {
        let name = name.trim();
        self.themes
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LexiconError::UnknownTheme(name.to_string()))
    }

    /// Pick a non-empty theme at random
    pub fn random_theme<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Theme> {
        let playable: Vec<&Theme> = self.themes.iter().filter(|t| !t.is_empty()).collect();
        playable.choose(rng).copied()
    }

    /// Resolve a topic to at most `target` distinct candidates
    ///
    /// A theme name selects that theme. Free text selects themes whose name
    /// or topics mention a keyword, plus any entry whose word or clue does.
    /// Matches come first (shuffled); if there are fewer than `target`, the
    /// rest of the bank tops the pool up.
    ///
    /// # Errors
    /// Returns `LexiconError::Empty` if the bank has no entries at all.
    pub fn candidates<R: Rng + ?Sized>(
        &self,
        topic: &str,
        target: usize,
        rng: &mut R,
    ) -> Result<Vec<Candidate>, LexiconError> {
        let mut matched = self.matching(topic);
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        matched.retain(|c| seen.insert(c.word()));
        matched.shuffle(rng);

        log::debug!("topic '{}' matched {} entries", topic.trim(), matched.len());

        if matched.len() < target {
            let mut filler: Vec<&Candidate> = self
                .themes
                .iter()
                .flat_map(|t| t.entries.iter())
                .filter(|c| seen.insert(c.word()))
                .collect();
            filler.shuffle(rng);
            if !filler.is_empty() {
                log::debug!(
                    "topping up with {} unrelated entries",
                    filler.len().min(target - matched.len())
                );
            }
            matched.extend(filler);
        }

        if matched.is_empty() {
            return Err(LexiconError::Empty(topic.trim().to_string()));
        }

        Ok(matched.into_iter().take(target).cloned().collect())
    }

    fn matching(&self, topic: &str) -> Vec<&Candidate> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Vec::new();
        }

        if let Ok(theme) = self.theme(topic) {
            return theme.entries.iter().collect();
        }

        let keywords: Vec<String> = topic
            .split(|c: char| !c.is_alphanumeric())
            .filter(|k| k.len() >= MIN_KEYWORD_LEN)
            .map(str::to_lowercase)
            .collect();
        let keywords = &keywords;

        self.themes
            .iter()
            .flat_map(|theme| {
                let whole_theme = keywords.iter().any(|k| theme.covers(k));
                theme.entries.iter().filter(move |entry| {
                    whole_theme || keywords.iter().any(|k| entry_mentions(entry, k))
                })
            })
            .collect()
    }
}

fn entry_mentions(entry: &Candidate, keyword: &str) -> bool {
    entry.word().eq_ignore_ascii_case(keyword) || entry.clue().to_lowercase().contains(keyword)
}

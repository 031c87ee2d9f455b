//! Puzzle size classes and generator tuning

use std::fmt;
use std::str::FromStr;

/// Named puzzle size: word-count range plus grid dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    Tiny,
    #[default]
    Bite,
    Normal,
    Large,
    Massive,
}

impl SizeClass {
    pub const ALL: [Self; 5] = [
        Self::Tiny,
        Self::Bite,
        Self::Normal,
        Self::Large,
        Self::Massive,
    ];

    /// Fewest entries a puzzle of this size should have
    #[must_use]
    pub const fn min_words(self) -> usize {
        match self {
            Self::Tiny => 5,
            Self::Bite => 9,
            Self::Normal => 16,
            Self::Large => 22,
            Self::Massive => 40,
        }
    }

    /// Number of candidates requested from the lexicon, and the placement target
    #[must_use]
    pub const fn max_words(self) -> usize {
        match self {
            Self::Tiny => 6,
            Self::Bite => 12,
            Self::Normal => 19,
            Self::Large => 29,
            Self::Massive => 51,
        }
    }

    #[must_use]
    pub const fn grid_dimension(self) -> usize {
        match self {
            Self::Tiny => 10,
            Self::Bite => 13,
            Self::Normal => 16,
            Self::Large => 22,
            Self::Massive => 28,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Bite => "bite",
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Massive => "massive",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny",
            Self::Bite => "Bite-sized",
            Self::Normal => "Normal",
            Self::Large => "Large",
            Self::Massive => "Massive",
        }
    }

    /// Next size, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Tiny => Self::Bite,
            Self::Bite => Self::Normal,
            Self::Normal => Self::Large,
            Self::Large => Self::Massive,
            Self::Massive => Self::Tiny,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised size names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSizeClass(pub String);

impl fmt::Display for UnknownSizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown size '{}' (expected tiny, bite, normal, large or massive)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSizeClass {}

impl FromStr for SizeClass {
    type Err = UnknownSizeClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.name() == lower)
            .ok_or_else(|| UnknownSizeClass(s.to_string()))
    }
}

/// Default number of randomized layout attempts per puzzle
pub const DEFAULT_ATTEMPTS: usize = 40;

/// Default floor on placed entries for a layout to count as usable
pub const DEFAULT_MIN_ENTRIES: usize = 3;

/// Default number of passes the anchor-growth placer makes over its pool
pub const DEFAULT_GROWTH_CYCLES: usize = 15;

/// Tuning for the layout generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Independent placement attempts; the best one wins
    pub attempts: usize,
    /// Layouts with fewer entries are rejected
    pub min_entries: usize,
    /// Pool passes for the anchor-growth placer
    pub growth_cycles: usize,
    /// Base seed for reproducible runs; `None` draws one per run
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            min_entries: DEFAULT_MIN_ENTRIES,
            growth_cycles: DEFAULT_GROWTH_CYCLES,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    #[must_use]
    pub const fn with_min_entries(mut self, min_entries: usize) -> Self {
        self.min_entries = min_entries;
        self
    }

    #[must_use]
    pub const fn with_growth_cycles(mut self, growth_cycles: usize) -> Self {
        self.growth_cycles = growth_cycles;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_classes_grow() {
        for pair in SizeClass::ALL.windows(2) {
            assert!(pair[0].grid_dimension() < pair[1].grid_dimension());
            assert!(pair[0].max_words() < pair[1].max_words());
        }
    }

    #[test]
    fn min_never_exceeds_max() {
        for size in SizeClass::ALL {
            assert!(size.min_words() <= size.max_words(), "{size}");
        }
    }

    #[test]
    fn parse_size_names() {
        assert_eq!("tiny".parse(), Ok(SizeClass::Tiny));
        assert_eq!("MASSIVE".parse(), Ok(SizeClass::Massive));
        assert_eq!(" normal ".parse(), Ok(SizeClass::Normal));
        assert!("huge".parse::<SizeClass>().is_err());
    }

    #[test]
    fn next_cycles_through_all() {
        let mut size = SizeClass::Tiny;
        for _ in 0..SizeClass::ALL.len() {
            size = size.next();
        }
        assert_eq!(size, SizeClass::Tiny);
    }

    #[test]
    fn config_builder() {
        let config = GeneratorConfig::default()
            .with_attempts(5)
            .with_min_entries(4)
            .with_seed(Some(7));
        assert_eq!(config.attempts, 5);
        assert_eq!(config.min_entries, 4);
        assert_eq!(config.growth_cycles, DEFAULT_GROWTH_CYCLES);
        assert_eq!(config.seed, Some(7));
    }
}

//! Main crossword generator interface

use super::puzzle::Puzzle;
use super::selector::LayoutSelector;
use super::strategy::PlacementStrategy;
use crate::config::{GeneratorConfig, SizeClass};
use crate::core::Candidate;
use crate::errors::GenerateError;
use crate::lexicon::Lexicon;
use rustc_hash::FxHashSet;

/// Smallest word pool worth attempting a puzzle with
pub const MIN_VIABLE_POOL: usize = 5;

/// Main crossword generator
///
/// Coordinates pool preparation, best-of-N layout selection and numbering
/// using a given placement strategy.
pub struct Generator<S: PlacementStrategy> {
    strategy: S,
    config: GeneratorConfig,
}

impl<S: PlacementStrategy + Sync> Generator<S> {
    /// Create a new generator with the given strategy and tuning
    ///
    /// Placer settings in `config` (such as `growth_cycles`) override the
    /// ones the strategy was built with.
    pub fn new(strategy: S, config: GeneratorConfig) -> Self {
        Self {
            strategy: strategy.configured(&config),
            config,
        }
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Build a numbered puzzle from a candidate pool
    ///
    /// Duplicate words and words longer than the grid are discarded first.
    /// At most `target` entries are placed; fewer than
    /// `min(config.min_entries, target)` is a failure.
    ///
    /// # Errors
    /// - `InsufficientCandidates` if the usable pool is below the entry floor
    /// - `LayoutFailure` if no attempt links enough words
    pub fn generate(
        &self,
        candidates: &[Candidate],
        target: usize,
        grid_size: usize,
    ) -> Result<Puzzle, GenerateError> {
        let min_entries = self.config.min_entries.min(target).max(1);
        self.generate_with_floor(candidates, target, grid_size, min_entries)
    }

    /// Fetch words for a topic and build a puzzle of the given size class
    ///
    /// The pool must hold at least `min(size.min_words(), 5)` words, and the
    /// layout must link at least that many (never fewer than the configured
    /// entry floor).
    ///
    /// # Errors
    /// - `Lexicon` if the word source fails
    /// - `InsufficientCandidates` if too few words come back
    /// - `LayoutFailure` if no attempt links enough words
    pub fn generate_themed<L: Lexicon + ?Sized>(
        &self,
        lexicon: &L,
        topic: &str,
        size: SizeClass,
    ) -> Result<Puzzle, GenerateError> {
        let words = lexicon.fetch_candidates(topic, size.max_words())?;
        let floor = size.min_words().min(MIN_VIABLE_POOL);

        log::info!(
            "topic '{topic}': {} candidates for a {} puzzle ({}x{})",
            words.len(),
            size.name(),
            size.grid_dimension(),
            size.grid_dimension()
        );

        if words.len() < floor {
            return Err(GenerateError::InsufficientCandidates {
                received: words.len(),
                needed: size.min_words(),
            });
        }

        self.generate_with_floor(
            &words,
            size.max_words(),
            size.grid_dimension(),
            floor.max(self.config.min_entries),
        )
    }

    fn generate_with_floor(
        &self,
        candidates: &[Candidate],
        target: usize,
        grid_size: usize,
        min_entries: usize,
    ) -> Result<Puzzle, GenerateError> {
        let pool = prepare_pool(candidates, grid_size);
        if pool.len() < min_entries {
            log::warn!(
                "pool of {} usable words is below the floor of {min_entries}",
                pool.len()
            );
            return Err(GenerateError::InsufficientCandidates {
                received: pool.len(),
                needed: min_entries,
            });
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let selector = LayoutSelector::new(self.config.attempts, min_entries, seed);
        let selection = selector.select(&self.strategy, &pool, target, grid_size)?;

        Ok(Puzzle::from_layout(selection.layout))
    }
}

/// Drop duplicates (by word) and words that cannot fit the grid
fn prepare_pool(candidates: &[Candidate], grid_size: usize) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();
    candidates
        .iter()
        .filter(|c| c.len() <= grid_size)
        .filter(|c| seen.insert(c.word().to_string()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Orientation;
    use crate::generator::placement::AnchorGrowth;
    use crate::generator::strategy::StrategyType;

    fn pool(words: &[&str]) -> Vec<Candidate> {
        words
            .iter()
            .map(|w| Candidate::new(*w, format!("Clue for {w}")).unwrap())
            .collect()
    }

    fn seeded(strategy: StrategyType) -> Generator<StrategyType> {
        Generator::new(strategy, GeneratorConfig::default().with_seed(Some(2024)))
    }

    #[test]
    fn three_linked_words_numbered_in_scan_order() {
        let words = pool(&["galaxy", "star", "sun"]);
        let puzzle = seeded(StrategyType::default()).generate(&words, 3, 10).unwrap();

        assert_eq!(puzzle.entries().len(), 3);
        assert_eq!(puzzle.layout().validate(), Ok(()));

        let mut answers: Vec<&str> = puzzle.entries().iter().map(|e| e.word.as_str()).collect();
        answers.sort_unstable();
        assert_eq!(answers, vec!["GALAXY", "STAR", "SUN"]);

        // SUN and STAR start on the same cell and share number 1
        assert_eq!(puzzle.across()[0].answer, "SUN");
        assert_eq!(puzzle.down()[0].answer, "STAR");
        assert_eq!(puzzle.across()[0].number, 1);
        assert_eq!(puzzle.down()[0].number, 1);
        assert_eq!(puzzle.across()[1].answer, "GALAXY");
        assert_eq!(puzzle.across()[1].number, 2);
    }

    #[test]
    fn anchor_strategy_also_links_words() {
        let words = pool(&["galaxy", "star", "sun"]);
        let puzzle = seeded(StrategyType::from_name("anchor", 15))
            .generate(&words, 3, 10)
            .unwrap();
        assert_eq!(puzzle.entries().len(), 3);
        assert_eq!(puzzle.layout().validate(), Ok(()));
    }

    #[test]
    fn config_growth_cycles_reach_the_placer() {
        let generator = Generator::new(
            StrategyType::from_name("anchor", 15),
            GeneratorConfig::default().with_growth_cycles(1),
        );
        assert!(matches!(
            generator.strategy(),
            StrategyType::AnchorGrowth(AnchorGrowth { cycles: 1 })
        ));
    }

    #[test]
    fn empty_pool_fails() {
        let result = seeded(StrategyType::default()).generate(&[], 3, 10);
        assert!(matches!(
            result,
            Err(GenerateError::InsufficientCandidates {
                received: 0,
                needed: 3
            })
        ));
    }

    #[test]
    fn oversized_words_are_discarded() {
        let words = pool(&["astronomer"]);
        let result = seeded(StrategyType::default()).generate(&words, 3, 6);
        assert!(matches!(
            result,
            Err(GenerateError::InsufficientCandidates { received: 0, .. })
        ));
    }

    #[test]
    fn duplicates_collapse() {
        let mut words = pool(&["galaxy", "star", "sun"]);
        words.push(Candidate::new("STAR", "Another clue").unwrap());
        let prepared = prepare_pool(&words, 10);
        assert_eq!(prepared.len(), 3);
        assert_eq!(prepared[1].clue(), "Clue for star");
    }

    #[test]
    fn unlinkable_pool_is_a_layout_failure() {
        let words = pool(&["aaa", "bbb", "ccc", "ddd"]);
        let result = seeded(StrategyType::default()).generate(&words, 4, 10);
        assert!(matches!(
            result,
            Err(GenerateError::LayoutFailure { best: 1, needed: 3, .. })
        ));
    }

    #[test]
    fn small_target_lowers_floor() {
        let words = pool(&["galaxy", "star"]);
        let puzzle = seeded(StrategyType::default()).generate(&words, 2, 10).unwrap();
        assert_eq!(puzzle.entries().len(), 2);
    }

    struct FixedLexicon(&'static [&'static str]);

    impl Lexicon for FixedLexicon {
        fn fetch_candidates(
            &self,
            _topic: &str,
            target: usize,
        ) -> Result<Vec<Candidate>, crate::errors::LexiconError> {
            let mut words = pool(self.0);
            words.truncate(target);
            Ok(words)
        }
    }

    #[test]
    fn themed_generation_meets_size_floor() {
        let lexicon = FixedLexicon(&["easter", "arrest", "stare", "treats", "resets", "terse", "tastes"]);
        let generator = seeded(StrategyType::default());
        let puzzle = generator
            .generate_themed(&lexicon, "letters", SizeClass::Tiny)
            .unwrap();

        assert!(puzzle.entries().len() >= MIN_VIABLE_POOL);
        assert!(puzzle.entries().len() <= SizeClass::Tiny.max_words());
        assert_eq!(puzzle.size(), SizeClass::Tiny.grid_dimension());
        assert_eq!(puzzle.layout().validate(), Ok(()));
        assert!(
            puzzle
                .entries()
                .iter()
                .any(|e| e.orientation == Orientation::Down)
        );
    }

    #[test]
    fn themed_generation_reports_counts_for_tiny_pools() {
        let result = seeded(StrategyType::default()).generate_themed(
            &FixedLexicon(&["galaxy", "star"]),
            "space",
            SizeClass::Bite,
        );
        assert!(matches!(
            result,
            Err(GenerateError::InsufficientCandidates {
                received: 2,
                needed: 9
            })
        ));
    }
}

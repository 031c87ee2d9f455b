//! Benchmark command
//!
//! Generates many puzzles and measures yield, density and speed.

use crate::config::SizeClass;
use crate::errors::GenerateError;
use crate::generator::{Generator, PlacementStrategy};
use crate::lexicon::Lexicon;
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub strategy: &'static str,
    pub size: SizeClass,
    pub total_runs: usize,
    pub successes: usize,
    pub insufficient_words: usize,
    pub layout_failures: usize,
    pub other_failures: usize,
    pub average_entries: f64,
    pub average_intersections: f64,
    pub min_entries: usize,
    pub max_entries: usize,
    /// Entry count → number of puzzles with that many entries
    pub distribution: FxHashMap<usize, usize>,
    pub duration: Duration,
    pub puzzles_per_second: f64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.successes as f64 / self.total_runs as f64
        }
    }
}

/// Generate `count` puzzles, cycling through `topics`
///
/// Each run uses a fresh seed, so results vary between invocations unless
/// the generator has a fixed seed.
pub fn run_benchmark<L, S>(
    generator: &Generator<S>,
    lexicon: &L,
    topics: &[String],
    size: SizeClass,
    count: usize,
    show_progress: bool,
) -> BenchmarkResult
where
    L: Lexicon + ?Sized,
    S: PlacementStrategy + Sync,
{
    let pb = if show_progress {
        let pb = ProgressBar::new(count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░")),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let mut entry_counts = Vec::with_capacity(count);
    let mut intersections = 0;
    let mut insufficient_words = 0;
    let mut layout_failures = 0;
    let mut other_failures = 0;
    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();

    for run in 0..count {
        let topic = topics.get(run % topics.len().max(1)).map_or("", String::as_str);

        match generator.generate_themed(lexicon, topic, size) {
            Ok(puzzle) => {
                let entries = puzzle.entries().len();
                entry_counts.push(entries);
                intersections += puzzle.layout().total_intersections();
                *distribution.entry(entries).or_insert(0) += 1;
            }
            Err(GenerateError::InsufficientCandidates { .. }) => insufficient_words += 1,
            Err(GenerateError::LayoutFailure { .. }) => layout_failures += 1,
            Err(GenerateError::Lexicon(err)) => {
                log::debug!("run {run}: {err}");
                other_failures += 1;
            }
        }

        if !entry_counts.is_empty() {
            let avg = entry_counts.iter().sum::<usize>() as f64 / entry_counts.len() as f64;
            pb.set_message(format!("Avg entries: {avg:.1}"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");

    let duration = start.elapsed();
    let successes = entry_counts.len();
    let (average_entries, average_intersections) = if successes > 0 {
        (
            entry_counts.iter().sum::<usize>() as f64 / successes as f64,
            intersections as f64 / successes as f64,
        )
    } else {
        (0.0, 0.0)
    };

    BenchmarkResult {
        strategy: generator.strategy().name(),
        size,
        total_runs: count,
        successes,
        insufficient_words,
        layout_failures,
        other_failures,
        average_entries,
        average_intersections,
        min_entries: entry_counts.iter().copied().min().unwrap_or(0),
        max_entries: entry_counts.iter().copied().max().unwrap_or(0),
        distribution,
        duration,
        puzzles_per_second: count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generator::StrategyType;
    use crate::lexicon::EmbeddedLexicon;

    fn generator(strategy: StrategyType) -> Generator<StrategyType> {
        Generator::new(strategy, GeneratorConfig::default().with_attempts(8))
    }

    fn topics() -> Vec<String> {
        vec!["Space".to_string(), "Food".to_string()]
    }

    #[test]
    fn benchmark_runs() {
        let lexicon = EmbeddedLexicon::new();
        let result = run_benchmark(
            &generator(StrategyType::default()),
            &lexicon,
            &topics(),
            SizeClass::Bite,
            4,
            false,
        );

        assert_eq!(result.total_runs, 4);
        assert_eq!(
            result.successes
                + result.insufficient_words
                + result.layout_failures
                + result.other_failures,
            4
        );
        assert_eq!(result.strategy, "grid-scan");
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let lexicon = EmbeddedLexicon::new();
        let result = run_benchmark(
            &generator(StrategyType::from_name("anchor", 15)),
            &lexicon,
            &topics(),
            SizeClass::Tiny,
            6,
            false,
        );

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.successes);
        assert_eq!(result.strategy, "anchor");
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let lexicon = EmbeddedLexicon::new();
        let result = run_benchmark(
            &generator(StrategyType::default()),
            &lexicon,
            &topics(),
            SizeClass::Tiny,
            6,
            false,
        );

        if result.successes > 0 {
            assert!(result.average_entries >= result.min_entries as f64);
            assert!(result.average_entries <= result.max_entries as f64);
            assert!(result.max_entries <= SizeClass::Tiny.max_words());
        }
        assert!((0.0..=1.0).contains(&result.success_rate()));
    }

    #[test]
    fn benchmark_zero_runs() {
        let lexicon = EmbeddedLexicon::new();
        let result = run_benchmark(
            &generator(StrategyType::default()),
            &lexicon,
            &[],
            SizeClass::Tiny,
            0,
            false,
        );

        assert_eq!(result.total_runs, 0);
        assert_eq!(result.successes, 0);
        assert!(result.success_rate().abs() < f64::EPSILON);
    }
}

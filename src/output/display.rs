//! Display functions for command results

use super::formatters::{cell_text, create_progress_bar, format_clue};
use crate::commands::{BenchmarkResult, GenerateResult};
use crate::generator::Clue;
use crate::lexicon::ThemeBank;
use colored::Colorize;

/// Print a generated puzzle: grid, clue lists and stats
pub fn print_puzzle(result: &GenerateResult, show_solution: bool) {
    let puzzle = &result.puzzle;
    let width = (puzzle.size() * 3).max(40);

    println!("\n{}", "─".repeat(width).cyan());
    println!(
        "{} {}",
        result.topic.to_uppercase().bright_yellow().bold(),
        format!("({}, {}x{})", result.size.label(), puzzle.size(), puzzle.size()).bright_black()
    );
    println!("{}", "─".repeat(width).cyan());

    for row in 0..puzzle.size() {
        let line: String = (0..puzzle.size())
            .map(|col| {
                let text = cell_text(puzzle, row, col, show_solution);
                if puzzle.is_letter_cell(row, col) {
                    text.black().on_white().to_string()
                } else {
                    text.on_black().to_string()
                }
            })
            .collect();
        println!("{line}");
    }

    print_clue_list("Across", puzzle.across());
    print_clue_list("Down", puzzle.down());

    let layout = puzzle.layout();
    println!("\n📊 {}", "Layout:".bright_cyan().bold());
    println!(
        "   Entries:        {} of {} requested",
        layout.word_count().to_string().bright_yellow().bold(),
        result.size.max_words()
    );
    println!(
        "   Fill:           {}",
        format!("{:.0}%", result.fill_ratio() * 100.0).bright_green()
    );
    println!("   Crossings:      {}", layout.total_intersections());
    println!("   Score:          {}", layout.score());
    println!("   Strategy:       {}", result.strategy);
    println!(
        "   Time taken:     {:.1}ms",
        result.duration.as_secs_f64() * 1000.0
    );
}

fn print_clue_list(title: &str, clues: &[Clue]) {
    println!("\n{}", title.bright_cyan().bold());
    for clue in clues {
        println!("  {}", format_clue(clue));
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Strategy:         {}", result.strategy);
    println!(
        "   Size:             {} ({}-{} words, {}x{})",
        result.size.label(),
        result.size.min_words(),
        result.size.max_words(),
        result.size.grid_dimension(),
        result.size.grid_dimension()
    );
    println!("   Puzzles:          {}", result.total_runs);
    println!(
        "   Success rate:     {}",
        format!("{:.1}%", result.success_rate() * 100.0)
            .bright_yellow()
            .bold()
    );
    if result.insufficient_words > 0 {
        println!(
            "   Too few words:    {}",
            result.insufficient_words.to_string().red()
        );
    }
    if result.layout_failures > 0 {
        println!(
            "   Layout failures:  {}",
            result.layout_failures.to_string().red()
        );
    }
    if result.other_failures > 0 {
        println!(
            "   Lexicon errors:   {}",
            result.other_failures.to_string().red()
        );
    }
    println!(
        "   Average entries:  {}",
        format!("{:.2}", result.average_entries).bright_yellow()
    );
    println!(
        "   Fewest entries:   {}",
        format!("{}", result.min_entries).yellow()
    );
    println!(
        "   Most entries:     {}",
        format!("{}", result.max_entries).green()
    );
    println!("   Avg crossings:    {:.2}", result.average_intersections);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Puzzles/second:   {:.1}", result.puzzles_per_second);

    if result.successes == 0 {
        return;
    }

    println!("\n📈 {}", "Entries per puzzle:".bright_cyan().bold());
    let mut counts: Vec<(&usize, &usize)> = result.distribution.iter().collect();
    counts.sort_unstable();
    for (&entries, &count) in counts {
        let pct = count as f64 / result.successes as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {entries:3}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}

/// Print the themes available to `--theme`
pub fn print_themes(bank: &ThemeBank) {
    println!("\n{}", "Themes".bright_cyan().bold());
    for theme in bank.themes() {
        println!(
            "  {:<12} {:>3} words  {}",
            theme.name().bright_yellow(),
            theme.len(),
            theme.topics().join(", ").bright_black()
        );
    }
    println!(
        "\n{} entries in total. Any other text works as a custom --topic.",
        bank.entry_count()
    );
}

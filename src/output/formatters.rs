//! Formatting utilities for terminal output

use crate::generator::{Clue, Puzzle};

/// Width of one printed grid cell
pub const CELL_WIDTH: usize = 3;

/// Text for one grid cell, `CELL_WIDTH` characters wide
///
/// Blocks are blank. Letter cells show the answer when `show_solution` is
/// set, otherwise the cell's number (if any) or an underscore.
#[must_use]
pub fn cell_text(puzzle: &Puzzle, row: usize, col: usize, show_solution: bool) -> String {
    match puzzle.solution_at(row, col) {
        None => " ".repeat(CELL_WIDTH),
        Some(letter) if show_solution => format!(" {} ", char::from(letter)),
        Some(_) => puzzle
            .number_at(row, col)
            .map_or_else(|| " _ ".to_string(), |n| format!("{n:<width$}", width = CELL_WIDTH)),
    }
}

/// One clue-list line: `12. Clue text (5)`
#[must_use]
pub fn format_clue(clue: &Clue) -> String {
    format!("{:>3}. {} ({})", clue.number, clue.clue, clue.length)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Candidate, Layout, Orientation};

    fn sample_puzzle() -> Puzzle {
        let mut layout = Layout::new(10);
        for (word, row, col, orientation, crossings) in [
            ("galaxy", 5, 2, Orientation::Across, 0),
            ("star", 3, 3, Orientation::Down, 1),
            ("sun", 3, 3, Orientation::Across, 1),
        ] {
            let candidate = Candidate::new(word, "A clue").unwrap();
            layout.place(&candidate, row, col, orientation, crossings);
        }
        Puzzle::from_layout(layout)
    }

    #[test]
    fn cells_show_numbers_or_letters() {
        let puzzle = sample_puzzle();
        assert_eq!(cell_text(&puzzle, 3, 3, false), "1  ");
        assert_eq!(cell_text(&puzzle, 3, 4, false), " _ ");
        assert_eq!(cell_text(&puzzle, 3, 4, true), " U ");
        assert_eq!(cell_text(&puzzle, 0, 0, true), "   ");
    }

    #[test]
    fn clue_line_has_number_and_length() {
        let puzzle = sample_puzzle();
        assert_eq!(format_clue(&puzzle.across()[1]), "  2. A clue (6)");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}

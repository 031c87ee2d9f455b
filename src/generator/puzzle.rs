//! Numbered, playable puzzle

use super::indexer::{Clue, GridIndex, index_layout};
use crate::core::{Layout, Orientation, PlacedEntry};

/// A finished layout with its numbering and clue lists
///
/// Entries carry their numbers and are ordered by number, across before down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    layout: Layout,
    index: GridIndex,
}

impl Puzzle {
    /// Number a layout and attach its clue lists
    #[must_use]
    pub fn from_layout(mut layout: Layout) -> Self {
        let index = index_layout(&layout);

        for entry in layout.entries_mut().iter_mut() {
            entry.number = index.number_at(entry.row, entry.col);
        }
        layout.entries_mut().sort_by_key(|e| {
            (
                e.number.unwrap_or(u32::MAX),
                e.orientation == Orientation::Down,
            )
        });

        Self { layout, index }
    }

    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> &GridIndex {
        &self.index
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[PlacedEntry] {
        self.layout.entries()
    }

    #[must_use]
    pub fn across(&self) -> &[Clue] {
        &self.index.across
    }

    #[must_use]
    pub fn down(&self) -> &[Clue] {
        &self.index.down
    }

    /// Correct letter at `(row, col)`, or `None` for blocks and out-of-range cells
    #[must_use]
    pub fn solution_at(&self, row: usize, col: usize) -> Option<u8> {
        self.layout.grid().letter_at(row as isize, col as isize)
    }

    #[must_use]
    pub fn is_letter_cell(&self, row: usize, col: usize) -> bool {
        self.solution_at(row, col).is_some()
    }

    #[must_use]
    pub fn number_at(&self, row: usize, col: usize) -> Option<u32> {
        self.index.number_at(row, col)
    }

    /// Entry covering `(row, col)` in the given orientation
    #[must_use]
    pub fn entry_at(&self, row: usize, col: usize, orientation: Orientation) -> Option<&PlacedEntry> {
        self.entries()
            .iter()
            .find(|e| e.orientation == orientation && e.covers(row, col))
    }

    /// All entries covering `(row, col)`: none, one, or an across/down pair
    pub fn entries_at(&self, row: usize, col: usize) -> impl Iterator<Item = &PlacedEntry> + '_ {
        self.entries().iter().filter(move |e| e.covers(row, col))
    }

    /// Entry with a given number and orientation
    #[must_use]
    pub fn entry_numbered(&self, number: u32, orientation: Orientation) -> Option<&PlacedEntry> {
        self.entries()
            .iter()
            .find(|e| e.number == Some(number) && e.orientation == orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Candidate;

    fn sample_puzzle() -> Puzzle {
        let mut layout = Layout::new(10);
        for (word, row, col, orientation, crossings) in [
            ("galaxy", 5, 2, Orientation::Across, 0),
            ("star", 3, 3, Orientation::Down, 1),
            ("sun", 3, 3, Orientation::Across, 1),
        ] {
            let candidate = Candidate::new(word, "clue").unwrap();
            layout.place(&candidate, row, col, orientation, crossings);
        }
        Puzzle::from_layout(layout)
    }

    #[test]
    fn entries_are_numbered_and_sorted() {
        let puzzle = sample_puzzle();
        let order: Vec<(&str, Option<u32>)> = puzzle
            .entries()
            .iter()
            .map(|e| (e.word.as_str(), e.number))
            .collect();
        assert_eq!(
            order,
            vec![("SUN", Some(1)), ("STAR", Some(1)), ("GALAXY", Some(2))]
        );
    }

    #[test]
    fn lookups_by_cell() {
        let puzzle = sample_puzzle();
        assert_eq!(puzzle.entries_at(3, 3).count(), 2);
        assert_eq!(puzzle.entries_at(3, 4).count(), 1);
        assert_eq!(puzzle.entries_at(0, 0).count(), 0);

        let down = puzzle.entry_at(5, 3, Orientation::Down).unwrap();
        assert_eq!(down.word, "STAR");
        assert!(puzzle.entry_at(3, 4, Orientation::Down).is_none());
    }

    #[test]
    fn solution_and_numbers() {
        let puzzle = sample_puzzle();
        assert_eq!(puzzle.solution_at(5, 7), Some(b'Y'));
        assert_eq!(puzzle.solution_at(0, 0), None);
        assert_eq!(puzzle.solution_at(99, 0), None);
        assert!(puzzle.is_letter_cell(6, 3));
        assert_eq!(puzzle.number_at(5, 2), Some(2));
    }

    #[test]
    fn entry_by_number() {
        let puzzle = sample_puzzle();
        assert_eq!(
            puzzle.entry_numbered(1, Orientation::Down).map(|e| e.word.as_str()),
            Some("STAR")
        );
        assert!(puzzle.entry_numbered(2, Orientation::Down).is_none());
    }
}

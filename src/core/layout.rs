//! Placed entries and the layout that owns them
//!
//! A `Layout` owns its entry list; the grid is a derived view kept in sync by
//! `Layout::place`. Numbers are left unset here and filled in by the indexer.

use super::{Candidate, Grid, Orientation};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use thiserror::Error;

/// Weight of one placed entry in `Layout::score`
pub const ENTRY_WEIGHT: usize = 100;

/// A word written into the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEntry {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    /// Letters shared with entries placed earlier
    pub intersections: usize,
    /// Crossword number, assigned by the indexer
    pub number: Option<u32>,
}

impl PlacedEntry {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Coordinates of every cell, in reading order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.orientation.step();
        (0..self.len()).map(move |i| {
            (
                self.row + i * dr as usize,
                self.col + i * dc as usize,
            )
        })
    }

    /// Index of `(row, col)` within this entry, if covered
    #[must_use]
    pub fn position_of(&self, row: usize, col: usize) -> Option<usize> {
        let offset = match self.orientation {
            Orientation::Across if row == self.row && col >= self.col => col - self.col,
            Orientation::Down if col == self.col && row >= self.row => row - self.row,
            _ => return None,
        };
        (offset < self.len()).then_some(offset)
    }

    #[inline]
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.position_of(row, col).is_some()
    }

    /// Answer letter at an index
    ///
    /// # Panics
    /// Panics if `index >= self.len()`
    #[inline]
    #[must_use]
    pub fn letter(&self, index: usize) -> u8 {
        self.word.as_bytes()[index]
    }
}

/// Structural rule broken by a layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    #[error("layout has no entries")]
    Empty,
    #[error("entry {word} runs outside the grid")]
    OutOfBounds { word: String },
    #[error("entry {word} disagrees with the grid at ({row}, {col})")]
    LetterMismatch { word: String, row: usize, col: usize },
    #[error("cell ({row}, {col}) holds a letter no entry covers")]
    UncoveredCell { row: usize, col: usize },
    #[error("{orientation} run at ({row}, {col}) of length {len} is not an entry")]
    AccidentalWord {
        row: usize,
        col: usize,
        len: usize,
        orientation: Orientation,
    },
    #[error("cell ({row}, {col}) is covered by two {orientation} entries")]
    StackedEntries {
        row: usize,
        col: usize,
        orientation: Orientation,
    },
    #[error("entry {word} is part of a longer run of letters")]
    TruncatedEntry { word: String },
    #[error("entries do not form a single connected group")]
    Disconnected,
}

/// A grid together with the entries written into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: Grid,
    entries: Vec<PlacedEntry>,
}

impl Layout {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            entries: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[PlacedEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<PlacedEntry> {
        &mut self.entries
    }

    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn total_intersections(&self) -> usize {
        self.entries.iter().map(|e| e.intersections).sum()
    }

    /// Quality score: `100 × entries + Σ intersections`
    ///
    /// Entry count dominates; crossings only break ties between layouts that
    /// placed the same number of words.
    #[must_use]
    pub fn score(&self) -> usize {
        ENTRY_WEIGHT * self.word_count() + self.total_intersections()
    }

    /// Write a candidate into the grid
    ///
    /// Legality is the placer's job; this only records the result.
    pub(crate) fn place(
        &mut self,
        candidate: &Candidate,
        row: usize,
        col: usize,
        orientation: Orientation,
        intersections: usize,
    ) {
        let (dr, dc) = orientation.step();
        for (i, &letter) in candidate.letters().iter().enumerate() {
            self.grid
                .set(row + i * dr as usize, col + i * dc as usize, letter);
        }
        self.entries.push(PlacedEntry {
            word: candidate.word().to_string(),
            clue: candidate.clue().to_string(),
            row,
            col,
            orientation,
            intersections,
            number: None,
        });
    }

    /// Check the structural invariants of a finished layout
    ///
    /// - every entry fits and agrees with the grid letter by letter
    /// - every letter cell belongs to some entry, and to at most one entry
    ///   per orientation
    /// - every entry spans a whole run, with blanks or edges at both ends
    /// - every maximal run of two or more letters is exactly one entry,
    ///   so no two words touch without crossing
    /// - the entries form one connected group
    ///
    /// # Errors
    /// Returns the first `LayoutViolation` found.
    pub fn validate(&self) -> Result<(), LayoutViolation> {
        if self.entries.is_empty() {
            return Err(LayoutViolation::Empty);
        }

        let size = self.size();
        let mut covered: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();

        for (idx, entry) in self.entries.iter().enumerate() {
            let (dr, dc) = entry.orientation.step();
            let end_row = entry.row + (entry.len() - 1) * dr as usize;
            let end_col = entry.col + (entry.len() - 1) * dc as usize;
            if end_row >= size || end_col >= size {
                return Err(LayoutViolation::OutOfBounds {
                    word: entry.word.clone(),
                });
            }

            for (i, (row, col)) in entry.cells().enumerate() {
                if self.grid.get(row, col) != Some(entry.letter(i)) {
                    return Err(LayoutViolation::LetterMismatch {
                        word: entry.word.clone(),
                        row,
                        col,
                    });
                }
                covered.entry((row, col)).or_default().push(idx);
            }
        }

        if let Some((row, col, _)) = self
            .grid
            .letters()
            .find(|&(row, col, _)| !covered.contains_key(&(row, col)))
        {
            return Err(LayoutViolation::UncoveredCell { row, col });
        }

        for (&(row, col), owners) in &covered {
            for orientation in Orientation::ALL {
                let count = owners
                    .iter()
                    .filter(|&&idx| self.entries[idx].orientation == orientation)
                    .count();
                if count > 1 {
                    return Err(LayoutViolation::StackedEntries {
                        row,
                        col,
                        orientation,
                    });
                }
            }
        }

        let runs = self.runs();
        let run_spans: FxHashSet<_> = runs.iter().copied().collect();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| !run_spans.contains(&(e.row, e.col, e.len(), e.orientation)))
        {
            return Err(LayoutViolation::TruncatedEntry {
                word: entry.word.clone(),
            });
        }

        let entry_spans: FxHashSet<(usize, usize, usize, Orientation)> = self
            .entries
            .iter()
            .map(|e| (e.row, e.col, e.len(), e.orientation))
            .collect();
        for run in runs {
            if !entry_spans.contains(&run) {
                let (row, col, len, orientation) = run;
                return Err(LayoutViolation::AccidentalWord {
                    row,
                    col,
                    len,
                    orientation,
                });
            }
        }

        if !self.is_connected(&covered) {
            return Err(LayoutViolation::Disconnected);
        }

        Ok(())
    }

    /// Every maximal run of two or more letters, as `(row, col, len, orientation)`
    fn runs(&self) -> Vec<(usize, usize, usize, Orientation)> {
        let size = self.size();
        let mut runs = Vec::new();

        for orientation in Orientation::ALL {
            let (dr, dc) = orientation.step();
            for row in 0..size {
                for col in 0..size {
                    let (r, c) = (row as isize, col as isize);
                    if !self.grid.is_filled(r, c) || self.grid.is_filled(r - dr, c - dc) {
                        continue;
                    }
                    let mut len = 1;
                    while self
                        .grid
                        .is_filled(r + dr * len as isize, c + dc * len as isize)
                    {
                        len += 1;
                    }
                    if len >= 2 {
                        runs.push((row, col, len, orientation));
                    }
                }
            }
        }

        runs
    }

    fn is_connected(&self, covered: &FxHashMap<(usize, usize), Vec<usize>>) -> bool {
        let mut seen = vec![false; self.entries.len()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;

        while let Some(idx) = queue.pop_front() {
            for cell in self.entries[idx].cells() {
                for &other in covered.get(&cell).into_iter().flatten() {
                    if !seen[other] {
                        seen[other] = true;
                        queue.push_back(other);
                    }
                }
            }
        }

        seen.into_iter().all(|s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(word: &str) -> Candidate {
        Candidate::new(word, "clue").unwrap()
    }

    /// GALAXY across row 2, STAR down crossing at the first A
    fn crossing_layout() -> Layout {
        let mut layout = Layout::new(8);
        layout.place(&cand("galaxy"), 2, 1, Orientation::Across, 0);
        layout.place(&cand("star"), 0, 2, Orientation::Down, 1);
        layout
    }

    #[test]
    fn place_writes_letters() {
        let layout = crossing_layout();
        assert_eq!(layout.grid().get(2, 1), Some(b'G'));
        assert_eq!(layout.grid().get(0, 2), Some(b'S'));
        assert_eq!(layout.grid().get(2, 2), Some(b'A'));
        assert_eq!(layout.grid().get(3, 2), Some(b'R'));
        assert_eq!(layout.grid().filled_count(), 9);
    }

    #[test]
    fn score_weights_entries_over_crossings() {
        let layout = crossing_layout();
        assert_eq!(layout.word_count(), 2);
        assert_eq!(layout.total_intersections(), 1);
        assert_eq!(layout.score(), 201);
    }

    #[test]
    fn crossing_layout_is_valid() {
        assert_eq!(crossing_layout().validate(), Ok(()));
    }

    #[test]
    fn empty_layout_is_invalid() {
        assert_eq!(Layout::new(5).validate(), Err(LayoutViolation::Empty));
    }

    #[test]
    fn side_by_side_words_are_invalid() {
        let mut layout = Layout::new(6);
        layout.place(&cand("cat"), 0, 0, Orientation::Across, 0);
        layout.place(&cand("dog"), 1, 0, Orientation::Across, 0);
        assert!(matches!(
            layout.validate(),
            Err(LayoutViolation::AccidentalWord {
                orientation: Orientation::Down,
                ..
            })
        ));
    }

    #[test]
    fn end_to_end_words_are_invalid() {
        let mut layout = Layout::new(8);
        layout.place(&cand("cat"), 0, 0, Orientation::Across, 0);
        layout.place(&cand("dog"), 0, 3, Orientation::Across, 0);
        assert_eq!(
            layout.validate(),
            Err(LayoutViolation::TruncatedEntry {
                word: "CAT".to_string()
            })
        );
    }

    #[test]
    fn parallel_overlap_is_invalid() {
        let mut layout = Layout::new(8);
        layout.place(&cand("cats"), 0, 1, Orientation::Across, 0);
        layout.place(&cand("scats"), 0, 0, Orientation::Across, 4);
        assert!(matches!(
            layout.validate(),
            Err(LayoutViolation::StackedEntries {
                orientation: Orientation::Across,
                ..
            })
        ));
    }

    #[test]
    fn entry_inside_longer_run_is_invalid() {
        let mut layout = Layout::new(8);
        layout.place(&cand("cats"), 0, 1, Orientation::Across, 0);
        layout.place(&cand("so"), 0, 0, Orientation::Down, 0);
        assert_eq!(
            layout.validate(),
            Err(LayoutViolation::TruncatedEntry {
                word: "CATS".to_string()
            })
        );
    }

    #[test]
    fn separate_islands_are_disconnected() {
        let mut layout = Layout::new(8);
        layout.place(&cand("cat"), 0, 0, Orientation::Across, 0);
        layout.place(&cand("dog"), 4, 4, Orientation::Across, 0);
        assert_eq!(layout.validate(), Err(LayoutViolation::Disconnected));
    }

    #[test]
    fn entry_cells_and_lookup() {
        let layout = crossing_layout();
        let star = &layout.entries()[1];
        let cells: Vec<_> = star.cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(star.position_of(2, 2), Some(2));
        assert!(!star.covers(4, 2));
        assert!(!star.covers(2, 3));
        assert_eq!(star.letter(3), b'R');
    }
}

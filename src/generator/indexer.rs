//! Crossword numbering
//!
//! Cells are numbered in row-major order. A letter cell gets the next number
//! if it starts an across run (block or edge to its left, letter to its right)
//! or a down run (block or edge above, letter below). A cell starting both
//! runs gets one number shared by both entries.

use crate::core::{Layout, Orientation};

/// One line of a clue list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub number: u32,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub length: usize,
    pub clue: String,
    pub answer: String,
}

/// Numbers for every cell plus across/down clue lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIndex {
    size: usize,
    numbers: Vec<Option<u32>>,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

impl GridIndex {
    /// Number printed in `(row, col)`, if any
    #[must_use]
    pub fn number_at(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            self.numbers[row * self.size + col]
        } else {
            None
        }
    }

    /// Clues for one orientation, in number order
    #[must_use]
    pub fn clues(&self, orientation: Orientation) -> &[Clue] {
        match orientation {
            Orientation::Across => &self.across,
            Orientation::Down => &self.down,
        }
    }

    /// Every numbered cell as `(row, col, number)`, in scan order
    pub fn numbered_cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.numbers
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.map(|n| (i / self.size, i % self.size, n)))
    }
}

/// Number a finished layout and build its clue lists
///
/// Pure: indexing the same layout twice gives identical results.
///
/// # Examples
/// ```
/// use opencross::core::Candidate;
/// use opencross::generator::{Generator, StrategyType, index_layout};
/// use opencross::config::GeneratorConfig;
///
/// let words = vec![
///     Candidate::new("galaxy", "A system of millions or billions of stars").unwrap(),
///     Candidate::new("star", "A hot ball of glowing gas").unwrap(),
///     Candidate::new("sun", "The star at the centre of our solar system").unwrap(),
/// ];
/// let generator = Generator::new(StrategyType::default(), GeneratorConfig::default().with_seed(Some(1)));
/// let puzzle = generator.generate(&words, 3, 10).unwrap();
///
/// let index = index_layout(puzzle.layout());
/// assert_eq!(index.across.len() + index.down.len(), 3);
/// assert_eq!(index.across[0].number, 1);
/// ```
#[must_use]
pub fn index_layout(layout: &Layout) -> GridIndex {
    let grid = layout.grid();
    let size = grid.size();
    let mut numbers = vec![None; size * size];
    let mut across = Vec::new();
    let mut down = Vec::new();
    let mut next_number = 1;

    for (row, col, _) in grid.letters() {
        let (r, c) = (row as isize, col as isize);
        let starts_across = !grid.is_filled(r, c - 1) && grid.is_filled(r, c + 1);
        let starts_down = !grid.is_filled(r - 1, c) && grid.is_filled(r + 1, c);

        if !(starts_across || starts_down) {
            continue;
        }

        let number = next_number;
        next_number += 1;
        numbers[row * size + col] = Some(number);

        for (starts, orientation, list) in [
            (starts_across, Orientation::Across, &mut across),
            (starts_down, Orientation::Down, &mut down),
        ] {
            if !starts {
                continue;
            }
            if let Some(entry) = layout
                .entries()
                .iter()
                .find(|e| e.row == row && e.col == col && e.orientation == orientation)
            {
                list.push(Clue {
                    number,
                    row,
                    col,
                    orientation,
                    length: entry.len(),
                    clue: entry.clue.clone(),
                    answer: entry.word.clone(),
                });
            }
        }
    }

    GridIndex {
        size,
        numbers,
        across,
        down,
    }
}

//! Square letter grid and orientation
//!
//! The grid is a flat row-major buffer of `Option<u8>` cells: `None` is a block,
//! `Some(b'A'..=b'Z')` is a letter. Coordinates are `(row, col)`.

use std::fmt;

/// Direction an entry runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right
    Across,
    /// Top to bottom
    Down,
}

impl Orientation {
    /// Both orientations, across first
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    /// `(row, col)` step along this orientation
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }

    /// `(row, col)` step across this orientation
    #[must_use]
    pub const fn perpendicular_step(self) -> (isize, isize) {
        self.other().step()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Across => "Across",
            Self::Down => "Down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An `N×N` grid of optional letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<u8>>,
}

impl Grid {
    /// Create an empty (all-block) grid
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Letter at `(row, col)`, or `None` for blocks
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        self.cells[row * self.size + col]
    }

    /// Letter at a signed coordinate; out-of-bounds reads as a block
    #[inline]
    #[must_use]
    pub fn letter_at(&self, row: isize, col: isize) -> Option<u8> {
        if self.in_bounds(row, col) {
            self.cells[row as usize * self.size + col as usize]
        } else {
            None
        }
    }

    /// True if the signed coordinate is inside the grid and holds a letter
    #[inline]
    #[must_use]
    pub fn is_filled(&self, row: isize, col: isize) -> bool {
        self.letter_at(row, col).is_some()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, letter: u8) {
        self.cells[row * self.size + col] = Some(letter);
    }

    /// Neighbouring coordinate, if it stays inside the grid
    #[must_use]
    pub fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row as isize + dr;
        let c = col as isize + dc;
        self.in_bounds(r, c).then_some((r as usize, c as usize))
    }

    /// Number of letter cells
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate over `(row, col, letter)` for every letter cell in row-major order
    pub fn letters(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|ch| (i / self.size, i % self.size, ch)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size)
                .map(|col| self.get(row, col).map_or('.', char::from))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

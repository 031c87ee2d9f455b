//! Placement rules shared by both placers
//!
//! A placement is legal when:
//! - the word stays inside the grid
//! - every occupied cell it crosses already holds the same letter and
//!   belongs to an entry running the other way
//! - every empty cell it fills has no letter on either perpendicular side
//! - the cells just before and just after the word are empty
//! - it crosses at least one existing letter, unless the grid is empty
//!
//! Together these keep every run of two or more letters equal to exactly one
//! entry, and keep the entries connected.

mod anchor;
mod grid_scan;

pub use anchor::AnchorGrowth;
pub use grid_scan::GridScan;

use crate::core::{Candidate, Layout, Orientation};
use rand::Rng;
use rand::seq::IndexedRandom;

/// A legal spot for a word and the number of letters it would share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub intersections: usize,
}

/// Check whether `word` may start at `(row, col)` running in `orientation`
///
/// Returns the intersection count if legal. Signed coordinates let callers
/// probe starts that fall off the top or left edge.
#[must_use]
pub fn check_placement(
    layout: &Layout,
    word: &[u8],
    row: isize,
    col: isize,
    orientation: Orientation,
) -> Option<Placement> {
    let grid = layout.grid();
    let len = word.len() as isize;
    let (dr, dc) = orientation.step();
    let (pr, pc) = orientation.perpendicular_step();

    if len == 0 || !grid.in_bounds(row, col) || !grid.in_bounds(row + dr * (len - 1), col + dc * (len - 1)) {
        return None;
    }

    if grid.is_filled(row - dr, col - dc) || grid.is_filled(row + dr * len, col + dc * len) {
        return None;
    }

    let mut intersections = 0;
    for (i, &letter) in word.iter().enumerate() {
        let r = row + dr * i as isize;
        let c = col + dc * i as isize;
        match grid.letter_at(r, c) {
            Some(existing) if existing != letter => return None,
            Some(_) => {
                let (r, c) = (r as usize, c as usize);
                if layout
                    .entries()
                    .iter()
                    .any(|e| e.orientation == orientation && e.covers(r, c))
                {
                    return None;
                }
                intersections += 1;
            }
            None => {
                if grid.is_filled(r - pr, c - pc) || grid.is_filled(r + pr, c + pc) {
                    return None;
                }
            }
        }
    }

    // Fully overlapping an existing run would add no cells
    if intersections == word.len() {
        return None;
    }

    if intersections == 0 && layout.word_count() > 0 {
        return None;
    }

    Some(Placement {
        row: row as usize,
        col: col as usize,
        orientation,
        intersections,
    })
}

/// Place the opening word horizontally, centred in the grid
///
/// Returns false if the word is wider than the grid.
pub(crate) fn place_seed(layout: &mut Layout, candidate: &Candidate) -> bool {
    let size = layout.size();
    if candidate.len() > size || size == 0 {
        return false;
    }
    layout.place(candidate, size / 2, (size - candidate.len()) / 2, Orientation::Across, 0);
    true
}

/// Keep only the highest-scoring placements and pick one of them uniformly
pub(crate) fn choose_best<R: Rng + ?Sized>(
    options: &[Placement],
    rng: &mut R,
) -> Option<Placement> {
    let best_score = options.iter().map(|p| p.intersections).max()?;
    let top: Vec<Placement> = options
        .iter()
        .copied()
        .filter(|p| p.intersections == best_score)
        .collect();
    top.choose(rng).copied()
}

/// Order a pool longest-first; the sort is stable so shuffled ties stay shuffled
pub(crate) fn longest_first<'a>(pool: &[&'a Candidate]) -> Vec<&'a Candidate> {
    let mut ordered = pool.to_vec();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));
    ordered
}

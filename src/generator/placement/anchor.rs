//! Anchor-growth placer
//!
//! After the seed, a word is only tried where one of its letters lands on a
//! matching letter of an entry already in the grid, crossing it at right
//! angles. Two entries of the same orientation may never share a line
//! (row for across, column for down), which keeps the grid sparse and easy
//! to read.
//!
//! Words that find no anchor stay in the pool and are retried on the next
//! cycle, since later words may give them something to cross.

use super::{Placement, check_placement, choose_best, longest_first, place_seed};
use crate::config::{DEFAULT_GROWTH_CYCLES, GeneratorConfig};
use crate::core::{Candidate, Layout, Orientation, PlacedEntry};
use crate::generator::strategy::PlacementStrategy;
use rand::Rng;

/// Letter-anchored growth with one entry per line
#[derive(Debug, Clone, Copy)]
pub struct AnchorGrowth {
    /// Maximum passes over the remaining pool
    pub cycles: usize,
}

impl AnchorGrowth {
    #[must_use]
    pub const fn new(cycles: usize) -> Self {
        Self { cycles }
    }

    /// True if an entry of the same orientation already occupies this line
    fn line_taken(layout: &Layout, row: isize, col: isize, orientation: Orientation) -> bool {
        layout.entries().iter().any(|e| {
            e.orientation == orientation
                && match orientation {
                    Orientation::Across => e.row as isize == row,
                    Orientation::Down => e.col as isize == col,
                }
        })
    }

    /// Legal crossings of `candidate` through the letters of `anchor`
    fn crossings(
        layout: &Layout,
        anchor: &PlacedEntry,
        candidate: &Candidate,
        options: &mut Vec<Placement>,
    ) {
        let orientation = anchor.orientation.other();
        let (dr, dc) = orientation.step();

        for (anchor_idx, (r, c)) in anchor.cells().enumerate() {
            for &word_idx in candidate.positions_of(anchor.letter(anchor_idx)) {
                let row = r as isize - dr * word_idx as isize;
                let col = c as isize - dc * word_idx as isize;

                if Self::line_taken(layout, row, col, orientation) {
                    continue;
                }

                if let Some(p) = check_placement(layout, candidate.letters(), row, col, orientation)
                    && !options.contains(&p)
                {
                    options.push(p);
                }
            }
        }
    }
}

impl Default for AnchorGrowth {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_CYCLES)
    }
}

impl PlacementStrategy for AnchorGrowth {
    fn attempt<R: Rng + ?Sized>(
        &self,
        pool: &[&Candidate],
        target: usize,
        size: usize,
        rng: &mut R,
    ) -> Layout {
        let mut layout = Layout::new(size);
        let mut remaining = longest_first(pool);

        // First word that fits becomes the seed
        while !remaining.is_empty() && layout.word_count() == 0 {
            let candidate = remaining.remove(0);
            place_seed(&mut layout, candidate);
        }

        for cycle in 0..self.cycles {
            let before = remaining.len();
            let mut i = 0;

            while i < remaining.len() && layout.word_count() < target {
                let candidate = remaining[i];
                let mut options = Vec::new();
                for anchor in layout.entries() {
                    Self::crossings(&layout, anchor, candidate, &mut options);
                }

                if let Some(p) = choose_best(&options, rng) {
                    layout.place(candidate, p.row, p.col, p.orientation, p.intersections);
                    remaining.remove(i);
                } else {
                    i += 1;
                }
            }

            log::trace!(
                "anchor-growth: cycle {cycle} placed {}, {} left",
                before - remaining.len(),
                remaining.len()
            );

            if remaining.len() == before || layout.word_count() >= target {
                break;
            }
        }

        layout
    }

    fn name(&self) -> &'static str {
        "anchor"
    }

    fn configured(self, config: &GeneratorConfig) -> Self {
        Self::new(config.growth_cycles)
    }
}

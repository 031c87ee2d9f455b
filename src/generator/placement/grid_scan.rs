//! Grid-scan placer
//!
//! Words go in longest-first. Each word is tried at every cell in both
//! orientations; the placements sharing the most letters win and one of them
//! is picked at random. A word with no legal spot is dropped for the rest of
//! the attempt.

use super::{Placement, check_placement, choose_best, longest_first, place_seed};
use crate::core::{Candidate, Layout, Orientation};
use crate::generator::strategy::PlacementStrategy;
use rand::Rng;

/// Exhaustive scan over every cell, single pass over the pool
#[derive(Debug, Clone, Copy, Default)]
pub struct GridScan;

impl GridScan {
    fn legal_placements(layout: &Layout, candidate: &Candidate) -> Vec<Placement> {
        let size = layout.size() as isize;
        let mut options = Vec::new();
        for row in 0..size {
            for col in 0..size {
                for orientation in Orientation::ALL {
                    if let Some(p) =
                        check_placement(layout, candidate.letters(), row, col, orientation)
                    {
                        options.push(p);
                    }
                }
            }
        }
        options
    }
}

impl PlacementStrategy for GridScan {
    fn attempt<R: Rng + ?Sized>(
        &self,
        pool: &[&Candidate],
        target: usize,
        size: usize,
        rng: &mut R,
    ) -> Layout {
        let mut layout = Layout::new(size);

        for candidate in longest_first(pool) {
            if layout.word_count() >= target {
                break;
            }

            if layout.word_count() == 0 {
                place_seed(&mut layout, candidate);
                continue;
            }

            let options = Self::legal_placements(&layout, candidate);
            match choose_best(&options, rng) {
                Some(p) => layout.place(candidate, p.row, p.col, p.orientation, p.intersections),
                None => log::trace!("grid-scan: dropped {candidate}"),
            }
        }

        layout
    }

    fn name(&self) -> &'static str {
        "grid-scan"
    }
}

//! Placement strategies
//!
//! Defines the `PlacementStrategy` trait and runtime selection between the
//! grid-scan and anchor-growth placers.

use super::placement::{AnchorGrowth, GridScan};
use crate::config::GeneratorConfig;
use crate::core::{Candidate, Layout};
use rand::Rng;

/// One randomized, bounded attempt at laying out a pool of words
///
/// Implementations own their grid for the whole attempt and hand it back
/// only when finished; callers never see a partial layout.
pub trait PlacementStrategy {
    /// Lay out words from `pool` (already shuffled) on a `size × size` grid,
    /// stopping once `target` entries are placed
    ///
    /// May return a layout with fewer entries than requested, including none.
    fn attempt<R: Rng + ?Sized>(
        &self,
        pool: &[&Candidate],
        target: usize,
        size: usize,
        rng: &mut R,
    ) -> Layout;

    /// Short name for logs and reports
    fn name(&self) -> &'static str;

    /// Apply the generator tuning this placer reads
    #[must_use]
    fn configured(self, _config: &GeneratorConfig) -> Self
    where
        Self: Sized,
    {
        self
    }
}

/// Enum wrapper for all placement strategies
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy)]
pub enum StrategyType {
    /// Scan every cell, drop words that don't fit (default)
    GridScan(GridScan),
    /// Grow from letter anchors, retrying over several cycles
    AnchorGrowth(AnchorGrowth),
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::GridScan(GridScan)
    }
}

impl PlacementStrategy for StrategyType {
    fn attempt<R: Rng + ?Sized>(
        &self,
        pool: &[&Candidate],
        target: usize,
        size: usize,
        rng: &mut R,
    ) -> Layout {
        match self {
            Self::GridScan(s) => s.attempt(pool, target, size, rng),
            Self::AnchorGrowth(s) => s.attempt(pool, target, size, rng),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::GridScan(s) => s.name(),
            Self::AnchorGrowth(s) => s.name(),
        }
    }

    fn configured(self, config: &GeneratorConfig) -> Self {
        match self {
            Self::GridScan(s) => Self::GridScan(s.configured(config)),
            Self::AnchorGrowth(s) => Self::AnchorGrowth(s.configured(config)),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "grid-scan", "scan", "anchor", "anchor-growth", "growth".
    /// Defaults to grid-scan if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str, growth_cycles: usize) -> Self {
        match name {
            "anchor" | "anchor-growth" | "growth" => {
                Self::AnchorGrowth(AnchorGrowth::new(growth_cycles))
            }
            _ => Self::GridScan(GridScan),
        }
    }
}

//! Crossword layout generation
//!
//! Places a pool of words on a square grid, samples many randomized attempts,
//! keeps the densest layout and numbers it for play.

mod engine;
pub mod indexer;
pub mod placement;
mod puzzle;
pub mod selector;
pub mod strategy;

pub use engine::{Generator, MIN_VIABLE_POOL};
pub use indexer::{Clue, GridIndex, index_layout};
pub use placement::{AnchorGrowth, GridScan, Placement, check_placement};
pub use puzzle::Puzzle;
pub use selector::{LayoutSelector, Selection};
pub use strategy::{PlacementStrategy, StrategyType};

//! Core domain types for crossword layouts
//!
//! This module contains the plain data types shared by the generator, the
//! session and the renderers. Nothing here is random or does I/O.

mod candidate;
mod grid;
mod layout;

pub use candidate::{Candidate, CandidateError, MAX_WORD_LEN, MIN_WORD_LEN};
pub use grid::{Grid, Orientation};
pub use layout::{ENTRY_WEIGHT, Layout, LayoutViolation, PlacedEntry};

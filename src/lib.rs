//! Opencross
//!
//! A themed crossword generator: it picks topic words, interlocks them on a
//! square grid, numbers the result and lets you play it in the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use opencross::config::{GeneratorConfig, SizeClass};
//! use opencross::generator::{Generator, StrategyType};
//! use opencross::lexicon::EmbeddedLexicon;
//!
//! let generator = Generator::new(StrategyType::default(), GeneratorConfig::default());
//! let lexicon = EmbeddedLexicon::new();
//!
//! let puzzle = generator
//!     .generate_themed(&lexicon, "space", SizeClass::Bite)
//!     .unwrap();
//! for clue in puzzle.across() {
//!     println!("{}. {} ({})", clue.number, clue.clue, clue.length);
//! }
//! ```

// Core domain types
pub mod core;

// Size classes and generator tuning
pub mod config;

// Error types
pub mod errors;

// Logger setup
pub mod logging;

// Layout generation
pub mod generator;

// Word sources
pub mod lexicon;

// Puzzle play state
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

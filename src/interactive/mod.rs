//! Interactive TUI player

mod app;
mod rendering;

pub use app::{App, run_tui};

//! Presentation layer: ratatui rendering and crossterm key handling.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;

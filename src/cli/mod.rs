//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: keystroke capture using crossterm
//! - `display.rs`: terminal rendering and UI

pub mod display;
pub mod input;

pub use display::Display;
pub use input::InputHandler;

//! Keystroke input handling using crossterm
//!
//! Features:
//! - Deadline-bounded keystroke polling (timers stay on schedule)
//! - Mode selection, reset, and quit key classification
//! - Ctrl+C graceful exit

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

use crate::notation::Mode;

/// Handles user input from terminal
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for a keystroke, waiting at most `timeout`.
    /// Returns Some(KeyEvent) if a key was pressed, None on timeout.
    pub fn read_key(&self, timeout: Duration) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (q, Ctrl+C, or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Check if key requests a session reset
    pub fn is_reset(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    }

    /// Map a digit key to a mode selection
    pub fn mode_for_key(key: &KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('1') => Some(Mode::Beginner),
            KeyCode::Char('2') => Some(Mode::Intermediate),
            KeyCode::Char('3') => Some(Mode::Advanced),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

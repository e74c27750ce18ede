//! Terminal display and UI rendering
//!
//! Features:
//! - Mode-selection screen with settings summary
//! - Practice screen: prompt line, mode/cadence info, key hints
//! - Paired screen transitions (menu <-> practice)

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

use crate::notation::Mode;
use crate::session::Settings;

/// Terminal display manager
pub struct Display;

impl Display {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display)
    }

    /// Clear the whole screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Mode-selection screen
    pub fn show_menu(&self, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
        self.clear()?;
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Cyan),
            Print("Select a mode:\n\n"),
            ResetColor,
        )?;

        for (key, mode) in [
            ('1', Mode::Beginner),
            ('2', Mode::Intermediate),
            ('3', Mode::Advanced),
        ] {
            execute!(
                stdout,
                SetForegroundColor(Color::Yellow),
                Print(format!("  [{}] ", key)),
                ResetColor,
                Print(mode.display_name()),
                Print("\n"),
            )?;
        }

        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "oshi p={:.2}  interval p={:.2}  cadence {} ms -> {} ms over {} min\n",
                settings.oshi_probability,
                settings.interval_probability,
                settings.initial_interval_ms,
                settings.min_interval_ms,
                settings.duration_min,
            )),
            Print("Press 1-3 to start  |  q to quit\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Switch to the practice screen (info line + hints, prompt still blank)
    pub fn show_practice_screen(
        &self,
        mode: Mode,
        cadence_secs: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.clear()?;
        self.show_info(mode, cadence_secs)?;
        self.show_hints()?;
        Ok(())
    }

    /// Render the current prompt
    pub fn show_prompt(&self, prompt: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Green),
            Print(format!("   {}", prompt)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Blank the prompt line (the rest between notes)
    pub fn clear_prompt(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            terminal::Clear(ClearType::CurrentLine),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Mode name and cadence, one decimal place suffixed "s"
    pub fn show_info(&self, mode: Mode, cadence_secs: f64) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 5),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Magenta),
            Print("Level: "),
            ResetColor,
            Print(mode.display_name()),
            Print("  |  "),
            SetForegroundColor(Color::Magenta),
            Print("Speed: "),
            ResetColor,
            Print(format!("{:.1}s", cadence_secs)),
        )?;
        stdout.flush()?;
        Ok(())
    }

    fn show_hints(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 7),
            SetForegroundColor(Color::DarkGrey),
            Print("r to reset  |  q to quit"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal state
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 9), cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}

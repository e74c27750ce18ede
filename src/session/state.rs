//! Session state tracking
//!
//! Maintains:
//! - Current mode (fixed once selected, until reset)
//! - Current cadence and its decay toward the minimum interval
//! - Prompt-shape probabilities captured from settings
//!
//! Owned by the cadence controller; no shared globals.

use crate::notation::Mode;
use crate::session::settings::Settings;

/// Complete session state
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// Selected mode; `None` while idle
    pub mode: Option<Mode>,
    /// Milliseconds between note changes; decays from initial toward min
    pub current_interval_ms: u64,
    /// Probability of a push-technique prompt
    pub oshi_probability: f64,
    /// Probability of a two-string interval prompt
    pub interval_probability: f64,
    /// Cadence floor
    pub min_interval_ms: u64,
    /// Session duration in milliseconds (decay accounting only)
    pub duration_ms: u64,
    /// Cadence decrement per decay tick
    pub step: f64,
}

impl SessionState {
    /// Default (idle) state
    pub fn new() -> Self {
        let defaults = Settings::default();
        SessionState {
            mode: None,
            current_interval_ms: defaults.initial_interval_ms,
            oshi_probability: defaults.oshi_probability,
            interval_probability: defaults.interval_probability,
            min_interval_ms: defaults.min_interval_ms,
            duration_ms: defaults.duration_ms(),
            step: defaults.decay_step(),
        }
    }

    /// Capture validated settings and enter a mode
    pub fn begin(&mut self, mode: Mode, settings: &Settings) {
        self.mode = Some(mode);
        self.current_interval_ms = settings.initial_interval_ms;
        self.oshi_probability = settings.oshi_probability;
        self.interval_probability = settings.interval_probability;
        self.min_interval_ms = settings.min_interval_ms;
        self.duration_ms = settings.duration_ms();
        self.step = settings.decay_step();
    }

    /// Whether the cadence has reached its floor
    pub fn at_min(&self) -> bool {
        self.current_interval_ms <= self.min_interval_ms
    }

    /// One decay tick: `current = max(min, floor(current - step))`.
    /// Returns the new cadence, or `None` when already at the floor.
    pub fn apply_decay(&mut self) -> Option<u64> {
        if self.at_min() {
            return None;
        }
        let decayed = (self.current_interval_ms as f64 - self.step).floor();
        self.current_interval_ms = if decayed <= self.min_interval_ms as f64 {
            self.min_interval_ms
        } else {
            decayed as u64
        };
        Some(self.current_interval_ms)
    }

    /// Current cadence in seconds (info display)
    pub fn cadence_secs(&self) -> f64 {
        self.current_interval_ms as f64 / 1000.0
    }

    /// Restore all fields to defaults
    pub fn reset(&mut self) {
        *self = SessionState::new();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

//! Session settings with fail-fast validation
//!
//! The five numeric knobs captured once at session start. Validation happens
//! at the session-start boundary: a bad value rejects the session instead of
//! leaking a NaN into the interval/step arithmetic.

use thiserror::Error;

/// Validation failures for session settings
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("minimum interval must be greater than zero")]
    ZeroMinInterval,
    #[error("initial interval ({initial} ms) must be at least the minimum interval ({min} ms)")]
    InitialBelowMin { initial: u64, min: u64 },
    #[error("session duration must be greater than zero")]
    ZeroDuration,
}

/// Numeric session settings, captured at session start
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Probability of showing a push-technique notation (clamped to [0, 1])
    pub oshi_probability: f64,
    /// Probability of showing a two-string interval (clamped to [0, 1])
    pub interval_probability: f64,
    /// Starting cadence in milliseconds between note changes
    pub initial_interval_ms: u64,
    /// Cadence floor in milliseconds
    pub min_interval_ms: u64,
    /// Practice session duration in minutes (drives the decay step only)
    pub duration_min: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            oshi_probability: 0.5,
            interval_probability: 0.25,
            initial_interval_ms: 5000,
            min_interval_ms: 500,
            duration_min: 10,
        }
    }
}

impl Settings {
    /// Validate and normalize: rejects non-finite probabilities, a zero
    /// minimum interval, an initial interval below the minimum, and a zero
    /// duration; clamps probabilities into [0, 1].
    pub fn validated(mut self) -> Result<Settings, SettingsError> {
        if !self.oshi_probability.is_finite() {
            return Err(SettingsError::NonFinite {
                field: "oshi probability",
            });
        }
        if !self.interval_probability.is_finite() {
            return Err(SettingsError::NonFinite {
                field: "interval probability",
            });
        }
        if self.min_interval_ms == 0 {
            return Err(SettingsError::ZeroMinInterval);
        }
        if self.initial_interval_ms < self.min_interval_ms {
            return Err(SettingsError::InitialBelowMin {
                initial: self.initial_interval_ms,
                min: self.min_interval_ms,
            });
        }
        if self.duration_min == 0 {
            return Err(SettingsError::ZeroDuration);
        }

        self.oshi_probability = self.oshi_probability.clamp(0.0, 1.0);
        self.interval_probability = self.interval_probability.clamp(0.0, 1.0);
        Ok(self)
    }

    /// Session duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_min * 60_000
    }

    /// Cadence decrement applied per decay tick:
    /// `duration / (initial - min)`, or 0 when there is no room to decay.
    pub fn decay_step(&self) -> f64 {
        let span = self.initial_interval_ms.saturating_sub(self.min_interval_ms);
        if span == 0 {
            return 0.0;
        }
        self.duration_ms() as f64 / span as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default().validated().unwrap();
        assert_eq!(settings.initial_interval_ms, 5000);
        assert_eq!(settings.min_interval_ms, 500);
    }

    #[test]
    fn test_rejects_nan_probability() {
        let settings = Settings {
            oshi_probability: f64::NAN,
            ..Settings::default()
        };
        assert_eq!(
            settings.validated(),
            Err(SettingsError::NonFinite {
                field: "oshi probability"
            })
        );
    }

    #[test]
    fn test_rejects_infinite_probability() {
        let settings = Settings {
            interval_probability: f64::INFINITY,
            ..Settings::default()
        };
        assert!(settings.validated().is_err());
    }

    #[test]
    fn test_clamps_probabilities() {
        let settings = Settings {
            oshi_probability: 1.5,
            interval_probability: -0.25,
            ..Settings::default()
        };
        let validated = settings.validated().unwrap();
        assert_eq!(validated.oshi_probability, 1.0);
        assert_eq!(validated.interval_probability, 0.0);
    }

    #[test]
    fn test_rejects_zero_min_interval() {
        let settings = Settings {
            min_interval_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validated(), Err(SettingsError::ZeroMinInterval));
    }

    #[test]
    fn test_rejects_initial_below_min() {
        let settings = Settings {
            initial_interval_ms: 400,
            min_interval_ms: 500,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validated(),
            Err(SettingsError::InitialBelowMin { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let settings = Settings {
            duration_min: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validated(), Err(SettingsError::ZeroDuration));
    }

    #[test]
    fn test_decay_step() {
        // 10 min over a 4500 ms cadence span
        let step = Settings::default().decay_step();
        assert!((step - 600_000.0 / 4500.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_step_zero_when_no_span() {
        let settings = Settings {
            initial_interval_ms: 500,
            min_interval_ms: 500,
            ..Settings::default()
        };
        assert_eq!(settings.decay_step(), 0.0);
    }
}

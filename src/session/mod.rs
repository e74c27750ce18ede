//! Session management: settings, state, and the cadence controller
//!
//! # Components
//! - `settings.rs`: validated numeric settings captured at session start
//! - `state.rs`: SessionState owned by the controller
//! - `controller.rs`: Idle/Running state machine driving the timers

pub mod controller;
pub mod settings;
pub mod state;

pub use controller::{SessionDriver, SessionEvent};
pub use settings::{Settings, SettingsError};

#[allow(unused_imports)]
pub use state::SessionState;

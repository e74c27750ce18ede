//! Platform services
//!
//! # Components
//! - `wake.rs`: best-effort screen wake lock

pub mod wake;

pub use wake::{platform_wake_lock, WakeLock};

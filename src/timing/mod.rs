//! Timing: clock abstraction and task scheduler
//!
//! # Components
//! - `clock.rs`: `Clock` trait, wall clock, hand-advanced test clock
//! - `scheduler.rs`: one-shot/repeating tasks with cancellation

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, SystemClock};
pub use scheduler::{Scheduler, TaskId};

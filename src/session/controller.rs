//! Cadence controller: the practice session state machine
//!
//! Idle -> (mode selected) Running -> (reset) Idle.
//!
//! Running keeps two recurring timers on the scheduler: the prompt timer
//! (fires every `current_interval + 500` ms, hides the prompt and arms the
//! 500 ms reveal) and the decay timer (fires every minute, walks the cadence
//! down toward the minimum and restarts the prompt timer). At most one prompt
//! timer and one pending reveal exist at a time: restarts and new prompt
//! cycles cancel their predecessor first.

use std::time::Duration;

use rand::Rng;

use crate::notation::{Catalog, Generator, Mode};
use crate::session::settings::{Settings, SettingsError};
use crate::session::state::SessionState;
use crate::timing::{Clock, Scheduler, TaskId};

/// Blank gap between hiding the old prompt and revealing the next
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);
/// Decay timer period
pub const DECAY_PERIOD: Duration = Duration::from_secs(60);

/// What the event loop should show after a timer fires
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Hide the current prompt (a reveal is pending)
    Cleared,
    /// Show a freshly generated prompt
    Prompt(String),
    /// The cadence decayed; new interval in milliseconds
    CadenceChanged(u64),
}

/// Practice session driver
pub struct SessionDriver {
    state: SessionState,
    catalog: Catalog,
    generator: Option<Generator>,
    prompt_timer: Option<TaskId>,
    decay_timer: Option<TaskId>,
    reveal_timer: Option<TaskId>,
}

impl SessionDriver {
    pub fn new(catalog: Catalog) -> Self {
        SessionDriver {
            state: SessionState::new(),
            catalog,
            generator: None,
            prompt_timer: None,
            decay_timer: None,
            reveal_timer: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.mode.is_some()
    }

    /// Start a session: validate settings, capture them into session state,
    /// run the first prompt cycle, and arm the prompt and decay timers.
    pub fn start<C: Clock>(
        &mut self,
        mode: Mode,
        settings: Settings,
        scheduler: &mut Scheduler<C>,
    ) -> Result<(), SettingsError> {
        let settings = settings.validated()?;

        self.cancel_timers(scheduler);
        self.state.begin(mode, &settings);
        self.generator = Some(Generator::new(self.catalog.resolve(mode)));

        self.begin_prompt_cycle(scheduler);
        self.restart_prompt_timer(scheduler);
        self.decay_timer = Some(scheduler.schedule_repeating(DECAY_PERIOD));
        log::debug!(
            "session started: mode {:?}, cadence {} ms, step {:.1}",
            mode,
            self.state.current_interval_ms,
            self.state.step
        );
        Ok(())
    }

    /// Handle one fired scheduler task. Stale ids (cancelled mid-batch by an
    /// earlier event) are ignored.
    pub fn on_task<C: Clock, R: Rng>(
        &mut self,
        id: TaskId,
        scheduler: &mut Scheduler<C>,
        rng: &mut R,
    ) -> Option<SessionEvent> {
        if self.reveal_timer == Some(id) {
            self.reveal_timer = None;
            let generator = self.generator.as_ref()?;
            let prompt = generator.next_prompt(
                self.state.oshi_probability,
                self.state.interval_probability,
                rng,
            );
            return Some(SessionEvent::Prompt(prompt));
        }

        if self.prompt_timer == Some(id) {
            self.begin_prompt_cycle(scheduler);
            return Some(SessionEvent::Cleared);
        }

        if self.decay_timer == Some(id) {
            return match self.state.apply_decay() {
                Some(new_interval) => {
                    self.restart_prompt_timer(scheduler);
                    Some(SessionEvent::CadenceChanged(new_interval))
                }
                None => {
                    // Floor reached: the decay timer retires for the rest of
                    // the session.
                    scheduler.cancel(id);
                    self.decay_timer = None;
                    log::debug!("cadence at minimum, decay timer stopped");
                    None
                }
            };
        }

        None
    }

    /// Cancel all timers and restore default state. Idempotent.
    pub fn reset<C: Clock>(&mut self, scheduler: &mut Scheduler<C>) {
        self.cancel_timers(scheduler);
        self.generator = None;
        self.state.reset();
    }

    /// Hide-then-reveal: any still-pending reveal is superseded, so at most
    /// one reveal is in flight and the prompt shown always belongs to the
    /// latest cycle.
    fn begin_prompt_cycle<C: Clock>(&mut self, scheduler: &mut Scheduler<C>) {
        if let Some(pending) = self.reveal_timer.take() {
            scheduler.cancel(pending);
        }
        self.reveal_timer = Some(scheduler.schedule_once(REVEAL_DELAY));
    }

    /// (Re)arm the prompt timer at the current cadence, cancelling the old
    /// one so only a single prompt timer is ever live.
    fn restart_prompt_timer<C: Clock>(&mut self, scheduler: &mut Scheduler<C>) {
        if let Some(old) = self.prompt_timer.take() {
            scheduler.cancel(old);
        }
        let period = Duration::from_millis(self.state.current_interval_ms) + REVEAL_DELAY;
        self.prompt_timer = Some(scheduler.schedule_repeating(period));
    }

    fn cancel_timers<C: Clock>(&mut self, scheduler: &mut Scheduler<C>) {
        for id in [
            self.prompt_timer.take(),
            self.decay_timer.take(),
            self.reveal_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            scheduler.cancel(id);
        }
    }
}

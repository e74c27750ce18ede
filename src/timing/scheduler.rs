//! Task scheduler
//!
//! Features:
//! - One-shot and repeating tasks with cancellation by id
//! - `next_deadline` for bounding the input-poll timeout
//! - `poll_due` drains fired tasks; repeating tasks re-arm themselves
//!
//! Single-threaded: the event loop polls this between input reads. This
//! replaces raw timer callbacks so the cadence state machine can run against
//! a `ManualClock` in tests.

use std::time::{Duration, Instant};

use super::clock::Clock;

/// Handle to a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Task {
    id: TaskId,
    due: Instant,
    /// `Some` for repeating tasks
    period: Option<Duration>,
}

/// Deadline-ordered task registry
#[derive(Debug)]
pub struct Scheduler<C: Clock> {
    clock: C,
    next_id: u64,
    tasks: Vec<Task>,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Scheduler {
            clock,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    fn insert(&mut self, due: Instant, period: Option<Duration>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, due, period });
        id
    }

    /// Schedule a task that fires once after `delay`
    pub fn schedule_once(&mut self, delay: Duration) -> TaskId {
        let due = self.clock.now() + delay;
        self.insert(due, None)
    }

    /// Schedule a task that fires every `period`
    pub fn schedule_repeating(&mut self, period: Duration) -> TaskId {
        let due = self.clock.now() + period;
        self.insert(due, Some(period))
    }

    /// Cancel a task. Returns false if it was not pending (already fired
    /// one-shot, or cancelled before).
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Time until the earliest deadline, zero if already due
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Drain due tasks, in deadline order. A repeating task fires at most once
    /// per poll and is re-armed past the current instant.
    pub fn poll_due(&mut self) -> Vec<TaskId> {
        let now = self.clock.now();
        let mut fired: Vec<(Instant, TaskId)> = Vec::new();

        self.tasks.retain_mut(|task| {
            if task.due > now {
                return true;
            }
            fired.push((task.due, task.id));
            match task.period {
                Some(period) => {
                    while task.due <= now {
                        task.due += period;
                    }
                    true
                }
                None => false,
            }
        });

        fired.sort_by_key(|&(due, _)| due);
        fired.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of pending tasks
    #[allow(dead_code)]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::clock::ManualClock;

    fn scheduler() -> (ManualClock, Scheduler<ManualClock>) {
        let clock = ManualClock::new();
        let scheduler = Scheduler::new(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut sched) = scheduler();
        let id = sched.schedule_once(Duration::from_millis(500));

        clock.advance(Duration::from_millis(499));
        assert!(sched.poll_due().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(sched.poll_due(), vec![id]);

        clock.advance(Duration::from_secs(10));
        assert!(sched.poll_due().is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_repeating_rearms() {
        let (clock, mut sched) = scheduler();
        let id = sched.schedule_repeating(Duration::from_secs(60));

        clock.advance(Duration::from_secs(60));
        assert_eq!(sched.poll_due(), vec![id]);

        clock.advance(Duration::from_secs(59));
        assert!(sched.poll_due().is_empty());

        clock.advance(Duration::from_secs(1));
        assert_eq!(sched.poll_due(), vec![id]);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let (clock, mut sched) = scheduler();
        let id = sched.schedule_repeating(Duration::from_secs(1));

        assert!(sched.cancel(id));
        assert!(!sched.cancel(id));

        clock.advance(Duration::from_secs(5));
        assert!(sched.poll_due().is_empty());
    }

    #[test]
    fn test_next_deadline_tracks_earliest() {
        let (clock, mut sched) = scheduler();
        assert!(sched.next_deadline().is_none());

        sched.schedule_once(Duration::from_millis(800));
        let early = sched.schedule_once(Duration::from_millis(300));

        assert_eq!(sched.time_until_next(), Some(Duration::from_millis(300)));

        clock.advance(Duration::from_millis(300));
        assert_eq!(sched.poll_due(), vec![early]);
        assert_eq!(sched.time_until_next(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_due_order() {
        let (clock, mut sched) = scheduler();
        let late = sched.schedule_once(Duration::from_millis(700));
        let early = sched.schedule_once(Duration::from_millis(200));

        clock.advance(Duration::from_millis(700));
        assert_eq!(sched.poll_due(), vec![early, late]);
    }

    #[test]
    fn test_repeating_skips_missed_periods() {
        let (clock, mut sched) = scheduler();
        let id = sched.schedule_repeating(Duration::from_secs(1));

        // 3.5 periods late still fires once, re-armed on the grid
        clock.advance(Duration::from_millis(3500));
        assert_eq!(sched.poll_due(), vec![id]);
        assert_eq!(sched.time_until_next(), Some(Duration::from_millis(500)));
    }
}

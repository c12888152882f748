//! Single-threaded timer queue on a virtual clock.
//!
//! The page owns one [`Scheduler`]. Components arm timers on it and keep the
//! returned [`TimerId`]; the dispatcher advances the clock and hands each due
//! timer back to its owner one at a time. Nothing here sleeps or spawns: a
//! host loop (browser animation frame, tokio interval, a test) decides how
//! much time has passed.
//!
//! Timers fire strictly in due-time order (ties broken by arming order), and
//! [`pop_due`](Scheduler::pop_due) yields one firing per call, so a handler
//! that cancels or re-arms a timer takes effect before the next firing is
//! produced. A cancelled timer never fires again, even within the same
//! advance.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for an armed timer. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    /// `None` for one-shot timers.
    interval: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm a timer that fires every `interval`, first after one interval.
    ///
    /// A zero interval is bumped to one millisecond so a single advance can
    /// never loop forever.
    pub fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        self.insert(Timer {
            due: self.now + interval,
            interval: Some(interval),
        })
    }

    /// Arm a timer that fires once after `delay`.
    pub fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.insert(Timer {
            due: self.now + delay,
            interval: None,
        })
    }

    fn insert(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, timer);
        id
    }

    /// Disarm a timer. Returns `false` if it was not armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// Moves the clock to that timer's due time. Repeating timers are
    /// rescheduled one interval later; one-shot timers are disarmed.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, *t))?;

        self.now = self.now.max(timer.due);
        match timer.interval {
            Some(interval) => {
                if let Some(t) = self.timers.get_mut(&id) {
                    t.due += interval;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock to `deadline` without firing anything.
    ///
    /// Call after draining [`pop_due`](Self::pop_due); the clock never moves
    /// backwards.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Drain every firing up to `now + elapsed`, collecting the ids.
    ///
    /// Convenience for callers that do not need to react between firings.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerId> {
        let deadline = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(id) = self.pop_due(deadline) {
            fired.push(id);
        }
        self.advance_to(deadline);
        fired
    }
}

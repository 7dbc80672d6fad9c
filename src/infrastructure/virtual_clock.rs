// SPDX-License-Identifier: MPL-2.0
//! Deterministic timer queue.
//!
//! [`VirtualClock`] implements the [`Scheduler`] port without any real
//! waiting. Time only moves when the host (or a test) calls
//! [`VirtualClock::advance`], which fires due timers in deadline order on
//! the calling thread. Hosts with their own frame loop can use it as the
//! event loop for the manager.

use crate::application::port::{Scheduler, TimerId};
use crate::notifications::Manager;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Upper bound of timers fired by [`VirtualClock::run_until_idle`].
const MAX_IDLE_STEPS: usize = 100_000;

type Key = (Duration, u64);

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    sequence: u64,
    deadlines: BTreeMap<Key, TimerId>,
    index: HashMap<TimerId, Key>,
}

/// Manually advanced clock shared between a manager and its driver.
///
/// Cloning yields another handle to the same clock.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    state: Arc<Mutex<ClockState>>,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time elapsed since the clock was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state().now
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state().deadlines.len()
    }

    /// Deadline of the earliest scheduled timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state().deadlines.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    fn pop_due(&self, until: Duration) -> Option<TimerId> {
        let mut state = self.state();
        let (&key, _) = state.deadlines.iter().next()?;
        if key.0 > until {
            return None;
        }
        let timer = state.deadlines.remove(&key)?;
        state.index.remove(&timer);
        state.now = state.now.max(key.0);
        Some(timer)
    }

    /// Moves time forward by `by`, firing every timer that falls due.
    ///
    /// Timers scheduled while firing are honoured if they fall due within
    /// the same window. Returns the number of timers fired.
    pub fn advance(&self, by: Duration, manager: &mut Manager) -> usize {
        let target = self.now().saturating_add(by);
        let mut fired = 0;
        while let Some(timer) = self.pop_due(target) {
            manager.fire(timer);
            fired += 1;
        }
        let mut state = self.state();
        state.now = state.now.max(target);
        fired
    }

    /// Fires timers until none are left. Returns the number fired.
    pub fn run_until_idle(&self, manager: &mut Manager) -> usize {
        let mut fired = 0;
        while fired < MAX_IDLE_STEPS {
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let Some(timer) = self.pop_due(deadline) else {
                break;
            };
            manager.fire(timer);
            fired += 1;
        }
        if fired == MAX_IDLE_STEPS {
            tracing::warn!(fired, "virtual clock did not settle");
        }
        fired
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let mut state = self.state();
        let key = (state.now.saturating_add(delay), state.sequence);
        state.sequence += 1;
        if let Some(previous) = state.index.insert(timer, key) {
            state.deadlines.remove(&previous);
        }
        state.deadlines.insert(key, timer);
    }

    fn cancel(&mut self, timer: TimerId) {
        let mut state = self.state();
        if let Some(key) = state.index.remove(&timer) {
            state.deadlines.remove(&key);
        }
    }
}

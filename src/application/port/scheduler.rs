// SPDX-License-Identifier: MPL-2.0
//! Timer port definition.
//!
//! The manager never sleeps: every wait (display time, animation end,
//! re-check of a busy queue) is a keyed timer handed to a [`Scheduler`].
//! When the timer elapses, the driving event loop calls
//! [`Manager::fire`](crate::notifications::Manager::fire) with its id.

use std::fmt;
use std::time::Duration;

/// Identifier of one scheduled callback.
///
/// Allocated by the manager, which keeps the mapping from timer to pending
/// work. A fired id the manager no longer tracks is ignored, so schedulers
/// do not need to guarantee that a cancelled timer never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Port for single-threaded delayed callbacks.
pub trait Scheduler: Send {
    /// Arranges for `timer` to fire after `delay`.
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    /// Cancels a scheduled timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

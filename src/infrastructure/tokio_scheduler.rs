// SPDX-License-Identifier: MPL-2.0
//! Timer adapter backed by the tokio runtime.
//!
//! Each scheduled timer is a small task that sleeps and then posts its
//! [`TimerId`] to a mailbox. The manager itself is only ever touched by the
//! task that drains the mailbox, which keeps all state changes on one
//! logical thread.
//!
//! [`TokioScheduler::schedule`] spawns onto the current runtime and must be
//! called from within one.

use crate::application::port::{Scheduler, TimerId};
use crate::notifications::Manager;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// [`Scheduler`] that turns timers into tokio sleep tasks.
#[derive(Debug)]
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

/// Receiving end of the timer mailbox.
#[derive(Debug)]
pub struct TimerEvents {
    receiver: mpsc::UnboundedReceiver<TimerId>,
}

impl TokioScheduler {
    /// Creates the scheduler and the mailbox its timers post to.
    #[must_use]
    pub fn new() -> (Self, TimerEvents) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                tasks: HashMap::new(),
            },
            TimerEvents { receiver },
        )
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());

        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the host stopped driving the manager.
            let _ = sender.send(timer);
        });
        if let Some(previous) = self.tasks.insert(timer, task) {
            previous.abort();
        }
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(task) = self.tasks.remove(&timer) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl TimerEvents {
    /// Waits for the next fired timer.
    ///
    /// Returns `None` once the scheduler has been dropped and every posted
    /// timer has been received.
    pub async fn next(&mut self) -> Option<TimerId> {
        self.receiver.recv().await
    }
}

/// Feeds fired timers into `manager` until it has none left.
///
/// An infinite-duration banner that is on screen keeps no timer, so this
/// returns while it is still visible. Returns the number of timers handled.
pub async fn drive(manager: &mut Manager, events: &mut TimerEvents) -> usize {
    let mut handled = 0;
    while manager.pending_timers() > 0 {
        let Some(timer) = events.next().await else {
            break;
        };
        manager.fire(timer);
        handled += 1;
    }
    tracing::debug!(handled, "notification timers drained");
    handled
}

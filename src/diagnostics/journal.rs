// SPDX-License-Identifier: MPL-2.0
//! Lifecycle journal.
//!
//! Every state change of a request is recorded as a [`LifecycleEvent`] in a
//! bounded buffer and mirrored to `tracing` at debug level. The journal is
//! what hosts inspect when a banner did not show up as expected.

use super::buffer::CircularBuffer;
use crate::domain::context::ContextId;
use crate::domain::diagnostics::JournalCapacity;
use crate::domain::notification::RequestId;

/// Why a request left the queue without being shown to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The owning context was gone or finishing.
    StaleContext,
    /// The presentation port refused the attachment.
    AttachFailed,
}

/// One state change of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Appended to the queue.
    Enqueued,
    /// Attached; enter animation running.
    Entering,
    /// Enter animation finished.
    Visible,
    /// Exit animation running.
    Exiting,
    /// Detached after its exit animation.
    Removed,
    /// Hidden before it was ever shown.
    Hidden,
    /// Removed by a hard cancellation.
    Cancelled,
    /// Removed by clearing the queue or a context.
    Cleared,
    /// Silently dropped.
    Dropped(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Monotonic per-journal sequence number.
    pub sequence: u64,
    pub request: RequestId,
    pub context: ContextId,
    pub transition: Transition,
}

/// Bounded history of lifecycle events.
#[derive(Debug, Clone)]
pub struct Journal {
    events: CircularBuffer<LifecycleEvent>,
    next_sequence: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(JournalCapacity::default())
    }
}

impl Journal {
    #[must_use]
    pub fn new(capacity: JournalCapacity) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
            next_sequence: 0,
        }
    }

    /// Records a transition and returns its sequence number.
    pub fn record(&mut self, request: RequestId, context: ContextId, transition: Transition) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        tracing::debug!(%request, %context, ?transition, sequence, "notification transition");
        self.events.push(LifecycleEvent {
            sequence,
            request,
            context,
            transition,
        });
        sequence
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LifecycleEvent> {
        self.events.iter()
    }

    /// Returns the retained transitions of one request, oldest first.
    #[must_use]
    pub fn transitions_for(&self, request: RequestId) -> Vec<Transition> {
        self.events
            .iter()
            .filter(|event| event.request == request)
            .map(|event| event.transition)
            .collect()
    }

    /// Returns the most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&LifecycleEvent> {
        self.events.iter().next_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Manager`] serializes banners against one shared display slot: at
//! most one request is live (entering, visible or exiting) at a time, and
//! requests are served in the order they were enqueued. Every wait is a
//! keyed timer handed to the [`Scheduler`] port; the event loop reports
//! elapsed timers back through [`Manager::fire`].
//!
//! # Lifecycle
//!
//! ```text
//! Pending --attach--> Entering --enter done--> Visible --timer/hide--> Exiting --exit done--> (gone)
//! ```
//!
//! A request whose context is gone when it reaches the head of the queue is
//! dropped without ever being attached. Hiding, cancelling and clearing are
//! idempotent: unknown ids are ignored.

use crate::application::port::{AttachTarget, AttachmentHandle, PresentationPort, Scheduler, TimerId};
use crate::config::Config;
use crate::diagnostics::{DropReason, Journal, Transition};
use crate::domain::context::ContextId;
use crate::domain::diagnostics::JournalCapacity;
use crate::domain::notification::RequestId;
use crate::notifications::request::{Notice, Request};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Lifecycle phase of a queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting in the queue, not attached.
    Pending,
    /// Attached, enter animation running.
    Entering,
    /// Fully shown; removal timer armed unless infinite.
    Visible,
    /// Exit animation running; already out of the queue.
    Exiting,
}

/// Work attached to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Message {
    /// Re-check the queue head once the current occupant is done.
    Display(RequestId),
    /// The enter animation of a request has finished.
    EnterFinished(RequestId),
    /// The display time of a request is over.
    Remove(RequestId),
    /// The exit animation of a request has finished.
    ExitFinished(RequestId),
}

impl Message {
    fn request(self) -> RequestId {
        match self {
            Message::Display(id)
            | Message::EnterFinished(id)
            | Message::Remove(id)
            | Message::ExitFinished(id) => id,
        }
    }
}

struct Entry {
    request: Request,
    phase: Phase,
    attachment: Option<AttachmentHandle>,
    enter: Duration,
}

impl Entry {
    fn new(request: Request) -> Self {
        Self {
            request,
            phase: Phase::Pending,
            attachment: None,
            enter: Duration::ZERO,
        }
    }

    fn id(&self) -> RequestId {
        self.request.id()
    }
}

/// Display queue for one set of banners.
///
/// Hosts usually keep one default instance (see
/// [`install_default`](super::install_default)); additional instances are
/// independent and share nothing.
pub struct Manager {
    port: Box<dyn PresentationPort>,
    scheduler: Box<dyn Scheduler>,
    /// FIFO of requests; only the head can be attached.
    queue: VecDeque<Entry>,
    /// Request popped from the queue whose exit animation is running.
    exiting: Option<Entry>,
    timers: HashMap<TimerId, Message>,
    next_timer: u64,
    recheck: Option<TimerId>,
    journal: Journal,
    announce: bool,
    /// Callbacks collected during the current operation.
    notices: Vec<Notice>,
    /// Leave `notices` for the owner to deliver once it released the manager.
    defer_callbacks: bool,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("queued", &self.queue.len())
            .field("live", &self.live())
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Manager {
    /// Creates a manager with default settings.
    pub fn new(
        port: impl PresentationPort + 'static,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self::with_parts(
            Box::new(port),
            Box::new(scheduler),
            JournalCapacity::default(),
            true,
        )
    }

    /// Creates a manager using the journal size and accessibility setting
    /// of `config`.
    pub fn with_config(
        port: impl PresentationPort + 'static,
        scheduler: impl Scheduler + 'static,
        config: &Config,
    ) -> Self {
        Self::with_parts(
            Box::new(port),
            Box::new(scheduler),
            config.journal_capacity(),
            config.announce(),
        )
    }

    fn with_parts(
        port: Box<dyn PresentationPort>,
        scheduler: Box<dyn Scheduler>,
        capacity: JournalCapacity,
        announce: bool,
    ) -> Self {
        Self {
            port,
            scheduler,
            queue: VecDeque::new(),
            exiting: None,
            timers: HashMap::new(),
            next_timer: 0,
            recheck: None,
            journal: Journal::new(capacity),
            announce,
            notices: Vec::new(),
            defer_callbacks: false,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Appends a request to the queue and shows it as soon as the display
    /// slot is free.
    pub fn enqueue(&mut self, request: Request) -> RequestId {
        let id = request.id();
        self.journal
            .record(id, request.context_id(), Transition::Enqueued);
        self.queue.push_back(Entry::new(request));

        if !self.is_occupied() || self.live_head_is_stale() {
            self.try_advance();
        }
        self.flush_callbacks();
        id
    }

    /// Serves the queue head if the display slot is free, otherwise arms a
    /// re-check for when the current occupant should be done.
    pub fn advance(&mut self) {
        self.try_advance();
        self.flush_callbacks();
    }

    /// Hides a request gracefully.
    ///
    /// A live request runs its exit animation and the next request follows
    /// once it has finished. A request that was never shown is taken out of
    /// the queue. Returns `false` when there was nothing to hide.
    pub fn hide(&mut self, id: RequestId) -> bool {
        let hidden = self.begin_exit(id);
        self.flush_callbacks();
        hidden
    }

    /// Removes a request right away, wherever it is.
    ///
    /// The element is detached without an exit animation, all its timers are
    /// cancelled and, if it held the display slot, the next request is
    /// served immediately. Returns `false` for unknown ids.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        let cancelled = self.cancel_request(id);
        self.flush_callbacks();
        cancelled
    }

    fn cancel_request(&mut self, id: RequestId) -> bool {
        if self.exiting.as_ref().is_some_and(|entry| entry.id() == id) {
            if let Some(entry) = self.exiting.take() {
                self.cancel_timers_for(id);
                self.release(entry, Transition::Cancelled);
                self.try_advance();
            }
            return true;
        }

        let Some(position) = self.position(id) else {
            return false;
        };
        let Some(entry) = self.queue.remove(position) else {
            return false;
        };
        let was_live = entry.attachment.is_some();
        self.cancel_timers_for(id);
        self.release(entry, Transition::Cancelled);
        if was_live {
            self.try_advance();
        }
        true
    }

    /// Cancels every timer, detaches every attached element and empties the
    /// queue. The manager stays usable.
    pub fn clear_all(&mut self) {
        for (timer, _) in self.timers.drain() {
            self.scheduler.cancel(timer);
        }
        self.recheck = None;

        let entries: Vec<Entry> = self
            .exiting
            .take()
            .into_iter()
            .chain(self.queue.drain(..))
            .collect();
        tracing::info!(count = entries.len(), "clearing notification queue");
        for entry in entries {
            self.release(entry, Transition::Cleared);
        }
        self.flush_callbacks();
    }

    /// Removes every request targeting `context`, detaching a live one
    /// eagerly. Returns how many requests were removed.
    pub fn clear_for_context(&mut self, context: ContextId) -> usize {
        let mut removed = 0;
        let mut freed = false;

        if self
            .exiting
            .as_ref()
            .is_some_and(|entry| entry.request.context_id() == context)
        {
            if let Some(entry) = self.exiting.take() {
                self.cancel_timers_for(entry.id());
                self.release(entry, Transition::Cleared);
                removed += 1;
                freed = true;
            }
        }

        let entries: Vec<Entry> = self.queue.drain(..).collect();
        for entry in entries {
            if entry.request.context_id() != context {
                self.queue.push_back(entry);
                continue;
            }
            freed |= entry.attachment.is_some();
            self.cancel_timers_for(entry.id());
            self.release(entry, Transition::Cleared);
            removed += 1;
        }

        if removed > 0 {
            tracing::info!(%context, removed, "cleared notifications for context");
        }
        if freed {
            self.try_advance();
        }
        self.flush_callbacks();
        removed
    }

    /// Handles an elapsed timer. Timers that were cancelled or already
    /// handled are ignored.
    pub fn fire(&mut self, timer: TimerId) {
        let Some(message) = self.timers.remove(&timer) else {
            tracing::trace!(%timer, "ignoring stale timer");
            return;
        };
        if self.recheck == Some(timer) {
            self.recheck = None;
        }
        self.handle_message(message);
        self.flush_callbacks();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of requests in the queue, including a live head but not a
    /// request that is already exiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns whether nothing is queued or on screen.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.exiting.is_none()
    }

    /// The request currently holding the display slot.
    #[must_use]
    pub fn live(&self) -> Option<RequestId> {
        self.exiting.as_ref().map(Entry::id).or_else(|| {
            self.queue
                .front()
                .filter(|entry| entry.attachment.is_some())
                .map(Entry::id)
        })
    }

    #[must_use]
    pub fn phase(&self, id: RequestId) -> Option<Phase> {
        self.exiting
            .iter()
            .chain(self.queue.iter())
            .find(|entry| entry.id() == id)
            .map(|entry| entry.phase)
    }

    /// Ids of queued requests in serving order.
    #[must_use]
    pub fn queued(&self) -> Vec<RequestId> {
        self.queue.iter().map(Entry::id).collect()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    // =========================================================================
    // State machine
    // =========================================================================

    fn is_occupied(&self) -> bool {
        self.live().is_some()
    }

    /// An attached head whose context went away. Infinite banners have no
    /// timer that would notice this.
    fn live_head_is_stale(&self) -> bool {
        self.exiting.is_none()
            && self.queue.front().is_some_and(|head| {
                head.attachment.is_some() && !head.request.has_valid_context()
            })
    }

    /// Hands lifecycle callbacks collected by the last operation to the
    /// owner instead of delivering them.
    pub(crate) fn defer_callbacks(&mut self) {
        self.defer_callbacks = true;
    }

    pub(crate) fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn flush_callbacks(&mut self) {
        if self.defer_callbacks {
            return;
        }
        for notice in self.take_notices() {
            notice.deliver();
        }
    }

    fn position(&self, id: RequestId) -> Option<usize> {
        self.queue.iter().position(|entry| entry.id() == id)
    }

    fn try_advance(&mut self) {
        if self.exiting.is_some() {
            return;
        }

        while let Some(head) = self.queue.front() {
            if !head.request.has_valid_context() {
                if let Some(entry) = self.queue.pop_front() {
                    self.drop_entry(entry, DropReason::StaleContext);
                }
                continue;
            }

            if head.attachment.is_some() {
                self.schedule_recheck();
                return;
            }

            if self.attach_head() {
                return;
            }
        }
    }

    /// Attaches the pending queue head. Returns `false` if the head was
    /// dropped instead and the next one should be tried.
    fn attach_head(&mut self) -> bool {
        let Some(head) = self.queue.front() else {
            return true;
        };
        let id = head.id();
        let context_id = head.request.context_id();
        let configuration = *head.request.configuration();
        let Some(context) = head.request.context() else {
            if let Some(entry) = self.queue.pop_front() {
                self.drop_entry(entry, DropReason::StaleContext);
            }
            return false;
        };
        let target = match head.request.container() {
            Some(container) => AttachTarget::Container {
                container,
                position: configuration.position,
            },
            None => AttachTarget::Root(context.id()),
        };

        let handle = match self.port.attach(head.request.banner(), target) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(request = %id, %err, "could not attach notification");
                if let Some(entry) = self.queue.pop_front() {
                    self.drop_entry(entry, DropReason::AttachFailed);
                }
                return false;
            }
        };

        let enter = self
            .port
            .start_enter_animation(handle, configuration.in_animation);
        if let Some(head) = self.queue.front_mut() {
            head.attachment = Some(handle);
            head.enter = enter;
            head.phase = Phase::Entering;
            self.notices.extend(head.request.displayed_notice());
            if self.announce {
                if let Some(text) = head.request.content().text() {
                    self.port.announce(&context, text);
                }
            }
        }
        self.journal.record(id, context_id, Transition::Entering);
        tracing::info!(request = %id, context = %context_id, ?target, "showing notification");

        if enter.is_zero() {
            self.mark_visible(id);
        } else {
            self.schedule(Message::EnterFinished(id), enter);
        }
        if let Some(delay) = configuration.duration.total_with(enter) {
            self.schedule(Message::Remove(id), delay);
        }
        true
    }

    fn schedule_recheck(&mut self) {
        if self.recheck.is_some() {
            return;
        }
        let Some(head) = self.queue.front() else {
            return;
        };
        let id = head.id();
        let exit = self
            .port
            .animation_duration(head.request.configuration().out_animation);
        if let Some(delay) = head.request.duration().total_with(head.enter + exit) {
            let timer = self.schedule(Message::Display(id), delay);
            self.recheck = Some(timer);
        }
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Display(_) => self.try_advance(),
            Message::EnterFinished(id) => {
                if !self.drop_if_stale(id) {
                    self.mark_visible(id);
                }
            }
            Message::Remove(id) => {
                if !self.drop_if_stale(id) {
                    self.begin_exit(id);
                }
            }
            Message::ExitFinished(id) => self.finish_exit(id),
        }
    }

    fn mark_visible(&mut self, id: RequestId) {
        let Some(head) = self.queue.front_mut() else {
            return;
        };
        if head.id() != id || head.phase != Phase::Entering {
            return;
        }
        head.phase = Phase::Visible;
        let context_id = head.request.context_id();
        self.journal.record(id, context_id, Transition::Visible);
    }

    /// Detaches a live head whose context went away while it was shown.
    fn drop_if_stale(&mut self, id: RequestId) -> bool {
        let stale = self
            .queue
            .front()
            .is_some_and(|head| head.id() == id && !head.request.has_valid_context());
        if !stale {
            return false;
        }
        if let Some(entry) = self.queue.pop_front() {
            self.drop_entry(entry, DropReason::StaleContext);
        }
        self.try_advance();
        true
    }

    fn begin_exit(&mut self, id: RequestId) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };
        let Some(mut entry) = self.queue.remove(position) else {
            return false;
        };
        self.cancel_timers_for(id);

        let Some(handle) = entry.attachment else {
            let context_id = entry.request.context_id();
            entry.request.detach_context();
            self.journal.record(id, context_id, Transition::Hidden);
            return true;
        };

        let exit = self
            .port
            .start_exit_animation(handle, entry.request.configuration().out_animation);
        entry.phase = Phase::Exiting;
        entry.request.detach_context();
        self.journal
            .record(id, entry.request.context_id(), Transition::Exiting);
        self.exiting = Some(entry);

        if exit.is_zero() {
            self.finish_exit(id);
        } else {
            self.schedule(Message::ExitFinished(id), exit);
        }
        true
    }

    fn finish_exit(&mut self, id: RequestId) {
        let entry = match self.exiting.take() {
            Some(entry) if entry.id() == id => entry,
            other => {
                self.exiting = other;
                return;
            }
        };
        self.release(entry, Transition::Removed);
        self.try_advance();
    }

    fn drop_entry(&mut self, entry: Entry, reason: DropReason) {
        tracing::debug!(request = %entry.id(), ?reason, "dropping notification");
        self.cancel_timers_for(entry.id());
        self.release(entry, Transition::Dropped(reason));
    }

    /// Takes an entry out of the host tree for good.
    fn release(&mut self, mut entry: Entry, transition: Transition) {
        if let Some(handle) = entry.attachment.take() {
            if self.port.is_attached(handle) {
                self.port.detach(handle);
            }
            self.notices.extend(entry.request.removed_notice());
        }
        entry.request.detach_context();
        self.journal
            .record(entry.id(), entry.request.context_id(), transition);
    }

    fn schedule(&mut self, message: Message, delay: Duration) -> TimerId {
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(timer, message);
        self.scheduler.schedule(timer, delay);
        timer
    }

    fn cancel_timers_for(&mut self, id: RequestId) {
        let timers: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, message)| message.request() == id)
            .map(|(timer, _)| *timer)
            .collect();
        for timer in timers {
            self.timers.remove(&timer);
            self.scheduler.cancel(timer);
            if self.recheck == Some(timer) {
                self.recheck = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{ContainerRef, HostContext};
    use crate::domain::notification::{DisplayDuration, Style};
    use crate::infrastructure::{LoggingPort, PortCall, VirtualClock};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (Manager, LoggingPort, VirtualClock) {
        let port = LoggingPort::new(ms(300), ms(300));
        let clock = VirtualClock::new();
        let manager = Manager::new(port.clone(), clock.clone());
        (manager, port, clock)
    }

    fn text(ctx: &crate::domain::context::ContextHandle, label: &str, millis: u64) -> Request {
        Request::builder(ctx)
            .text(label)
            .style(Style::info())
            .duration(DisplayDuration::Finite(ms(millis)))
            .build()
            .expect("valid request")
    }

    #[derive(Clone, Default)]
    struct Counts {
        displayed: Arc<AtomicUsize>,
        removed: Arc<AtomicUsize>,
    }

    impl crate::notifications::LifecycleCallback for Counts {
        fn on_displayed(&self) {
            self.displayed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_removed(&self) {
            self.removed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn new_manager_is_idle() {
        let (manager, _, _) = setup();
        assert!(manager.is_idle());
        assert!(manager.is_empty());
        assert_eq!(manager.live(), None);
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn enqueue_attaches_first_request_immediately() {
        let (mut manager, port, _) = setup();
        let ctx = HostContext::new("main");

        let id = manager.enqueue(text(&ctx, "hello", 1000));

        assert_eq!(manager.phase(id), Some(Phase::Entering));
        assert_eq!(manager.live(), Some(id));
        assert_eq!(port.attached(), vec![id]);
        assert!(port.calls().contains(&PortCall::Announce {
            context: ctx.id(),
            text: "hello".to_string()
        }));
    }

    #[test]
    fn request_becomes_visible_after_enter_animation() {
        let (mut manager, _, clock) = setup();
        let ctx = HostContext::new("main");
        let id = manager.enqueue(text(&ctx, "hello", 1000));

        clock.advance(ms(299), &mut manager);
        assert_eq!(manager.phase(id), Some(Phase::Entering));

        clock.advance(ms(1), &mut manager);
        assert_eq!(manager.phase(id), Some(Phase::Visible));
    }

    #[test]
    fn second_request_waits_for_first_exit() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let second = manager.enqueue(text(&ctx, "two", 1000));

        assert_eq!(manager.phase(second), Some(Phase::Pending));

        // Removal starts at duration + enter.
        clock.advance(ms(1300), &mut manager);
        assert_eq!(manager.phase(first), Some(Phase::Exiting));
        assert_eq!(manager.phase(second), Some(Phase::Pending));

        clock.advance(ms(299), &mut manager);
        assert_eq!(manager.phase(second), Some(Phase::Pending));

        clock.advance(ms(1), &mut manager);
        assert_eq!(manager.phase(first), None);
        assert_eq!(manager.phase(second), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![second]);
    }

    #[test]
    fn zero_length_animations_complete_immediately() {
        let port = LoggingPort::instant();
        let clock = VirtualClock::new();
        let mut manager = Manager::new(port.clone(), clock.clone());
        let ctx = HostContext::new("main");

        let id = manager.enqueue(text(&ctx, "quick", 500));
        assert_eq!(manager.phase(id), Some(Phase::Visible));

        clock.advance(ms(500), &mut manager);
        assert_eq!(manager.phase(id), None);
        assert!(manager.is_idle());
        assert!(port.attached().is_empty());
    }

    #[test]
    fn infinite_request_stays_until_hidden() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let request = Request::builder(&ctx)
            .text("sticky")
            .style(Style::alert())
            .duration(DisplayDuration::Infinite)
            .build()
            .expect("valid request");
        let id = manager.enqueue(request);

        clock.advance(ms(60_000), &mut manager);
        assert_eq!(manager.phase(id), Some(Phase::Visible));
        assert_eq!(manager.pending_timers(), 0);

        assert!(manager.hide(id));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
        clock.advance(ms(300), &mut manager);
        assert_eq!(manager.phase(id), None);
        assert!(port.attached().is_empty());
    }

    #[test]
    fn hide_twice_is_noop() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let id = manager.enqueue(text(&ctx, "hello", 1000));

        assert!(manager.hide(id));
        let calls = port.calls().len();
        assert!(!manager.hide(id));
        assert_eq!(port.calls().len(), calls);

        clock.run_until_idle(&mut manager);
        assert!(!manager.hide(id));
        assert!(manager.is_idle());
    }

    #[test]
    fn hide_pending_request_removes_it_without_attaching() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let second = manager.enqueue(text(&ctx, "two", 1000));

        assert!(manager.hide(second));
        assert_eq!(manager.queued(), vec![first]);

        clock.run_until_idle(&mut manager);
        assert!(!port.was_attached(second));
        assert_eq!(
            manager.journal().transitions_for(second),
            vec![Transition::Enqueued, Transition::Hidden]
        );
    }

    #[test]
    fn cancel_visible_request_advances_without_exit_animation() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let second = manager.enqueue(text(&ctx, "two", 1000));
        clock.advance(ms(400), &mut manager);

        assert!(manager.cancel(first));

        assert_eq!(manager.phase(first), None);
        assert_eq!(manager.phase(second), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![second]);
        assert!(!port
            .calls()
            .iter()
            .any(|call| matches!(call, PortCall::ExitAnimation { .. })));
    }

    #[test]
    fn cancel_unknown_or_removed_request_is_noop() {
        let (mut manager, _, clock) = setup();
        let ctx = HostContext::new("main");
        let id = manager.enqueue(text(&ctx, "one", 100));
        clock.run_until_idle(&mut manager);

        let journal_len = manager.journal().len();
        assert!(!manager.cancel(id));
        assert!(!manager.cancel(id));
        assert_eq!(manager.journal().len(), journal_len);
    }

    #[test]
    fn cancel_pending_request_from_middle_of_queue() {
        let (mut manager, _, _) = setup();
        let ctx = HostContext::new("main");
        let a = manager.enqueue(text(&ctx, "a", 1000));
        let b = manager.enqueue(text(&ctx, "b", 1000));
        let c = manager.enqueue(text(&ctx, "c", 1000));

        assert!(manager.cancel(b));
        assert_eq!(manager.queued(), vec![a, c]);
        assert_eq!(manager.live(), Some(a));
    }

    #[test]
    fn cancel_during_exit_detaches_and_serves_next() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let second = manager.enqueue(text(&ctx, "two", 1000));

        manager.hide(first);
        assert_eq!(manager.phase(first), Some(Phase::Exiting));
        assert!(manager.cancel(first));

        assert_eq!(manager.phase(second), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![second]);

        // The exit timer of the cancelled request must not disturb anything.
        clock.advance(ms(300), &mut manager);
        assert_eq!(manager.live(), Some(second));
    }

    #[test]
    fn stale_context_is_dropped_without_attach() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let other = HostContext::new("other");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let stale = manager.enqueue(text(&other, "gone", 1000));
        drop(other);

        clock.run_until_idle(&mut manager);

        assert!(port.was_attached(first));
        assert!(!port.was_attached(stale));
        assert!(manager.is_idle());
        assert_eq!(
            manager.journal().transitions_for(stale),
            vec![
                Transition::Enqueued,
                Transition::Dropped(DropReason::StaleContext)
            ]
        );
    }

    #[test]
    fn live_request_is_detached_when_its_context_finishes() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        let id = manager.enqueue(text(&ctx, "one", 1000));

        ctx.finish();
        clock.advance(ms(300), &mut manager);

        assert_eq!(manager.phase(id), None);
        assert!(port.attached().is_empty());
        assert_eq!(
            manager.journal().last().map(|e| e.transition),
            Some(Transition::Dropped(DropReason::StaleContext))
        );
    }

    #[test]
    fn refused_attachment_drops_request_and_serves_next() {
        let (mut manager, port, _) = setup();
        let refused = HostContext::new("refused");
        let ctx = HostContext::new("main");
        port.refuse_context(refused.id());

        let bad = manager.enqueue(text(&refused, "bad", 1000));
        let good = manager.enqueue(text(&ctx, "good", 1000));

        assert_eq!(manager.phase(bad), None);
        assert_eq!(manager.live(), Some(good));
        assert_eq!(
            manager.journal().transitions_for(bad),
            vec![
                Transition::Enqueued,
                Transition::Dropped(DropReason::AttachFailed)
            ]
        );
    }

    #[test]
    fn clear_all_detaches_and_empties() {
        let (mut manager, port, clock) = setup();
        let ctx = HostContext::new("main");
        manager.enqueue(text(&ctx, "one", 1000));
        manager.enqueue(text(&ctx, "two", 1000));
        manager.enqueue(text(&ctx, "three", 1000));

        manager.clear_all();

        assert!(manager.is_idle());
        assert_eq!(manager.pending_timers(), 0);
        assert_eq!(clock.pending(), 0);
        assert!(port.attached().is_empty());

        let id = manager.enqueue(text(&ctx, "again", 1000));
        assert_eq!(manager.live(), Some(id));
    }

    #[test]
    fn clear_for_context_only_touches_that_context() {
        let (mut manager, port, _) = setup();
        let a = HostContext::new("a");
        let b = HostContext::new("b");
        let a1 = manager.enqueue(text(&a, "a1", 1000));
        let b1 = manager.enqueue(text(&b, "b1", 1000));
        let a2 = manager.enqueue(text(&a, "a2", 1000));

        assert_eq!(manager.clear_for_context(a.id()), 2);

        assert_eq!(manager.phase(a1), None);
        assert_eq!(manager.phase(a2), None);
        assert_eq!(manager.phase(b1), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![b1]);
        assert_eq!(manager.clear_for_context(a.id()), 0);
    }

    #[test]
    fn container_target_uses_configured_position() {
        let (mut manager, port, _) = setup();
        let ctx = HostContext::new("main");
        let request = Request::builder(&ctx)
            .text("inside")
            .style(Style::confirm())
            .container(ContainerRef(42))
            .build()
            .expect("valid request");
        let id = manager.enqueue(request);

        assert!(port.calls().iter().any(|call| matches!(
            call,
            PortCall::Attach {
                request,
                target: AttachTarget::Container { container: ContainerRef(42), .. },
                ..
            } if *request == id
        )));
    }

    #[test]
    fn lifecycle_callbacks_fire_once_each() {
        let (mut manager, _, clock) = setup();
        let ctx = HostContext::new("main");
        let counts = Counts::default();
        let request = Request::builder(&ctx)
            .text("hello")
            .style(Style::info())
            .lifecycle_callback(counts.clone())
            .build()
            .expect("valid request");
        manager.enqueue(request);

        clock.run_until_idle(&mut manager);

        assert_eq!(counts.displayed.load(Ordering::SeqCst), 1);
        assert_eq!(counts.removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn advance_on_busy_queue_arms_single_recheck() {
        let (mut manager, _, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let timers = manager.pending_timers();

        manager.advance();
        manager.advance();
        assert_eq!(manager.pending_timers(), timers + 1);

        clock.run_until_idle(&mut manager);
        assert_eq!(manager.phase(first), None);
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn stale_timer_ids_are_ignored() {
        let (mut manager, _, _) = setup();
        let ctx = HostContext::new("main");
        let id = manager.enqueue(text(&ctx, "one", 1000));

        manager.fire(TimerId(9_999));
        assert_eq!(manager.phase(id), Some(Phase::Entering));
    }

    #[test]
    fn infinite_request_of_dropped_context_gives_way_to_next() {
        let (mut manager, port, clock) = setup();
        let dying = HostContext::new("dying");
        let alive = HostContext::new("alive");
        let sticky = Request::builder(&dying)
            .text("sticky")
            .style(Style::alert())
            .duration(DisplayDuration::Infinite)
            .build()
            .expect("valid request");
        let sticky = manager.enqueue(sticky);
        clock.advance(ms(300), &mut manager);
        assert_eq!(manager.pending_timers(), 0);

        drop(dying);
        let next = manager.enqueue(text(&alive, "next", 1000));

        assert_eq!(manager.phase(sticky), None);
        assert_eq!(manager.phase(next), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![next]);
        assert_eq!(
            manager.journal().transitions_for(sticky).last(),
            Some(&Transition::Dropped(DropReason::StaleContext))
        );
    }

    #[test]
    fn clear_for_context_during_exit_serves_next() {
        let (mut manager, port, clock) = setup();
        let closing = HostContext::new("closing");
        let other = HostContext::new("other");
        let leaving = manager.enqueue(text(&closing, "leaving", 1000));
        let next = manager.enqueue(text(&other, "next", 1000));

        clock.advance(ms(1300), &mut manager);
        assert_eq!(manager.phase(leaving), Some(Phase::Exiting));

        assert_eq!(manager.clear_for_context(closing.id()), 1);
        assert_eq!(manager.phase(leaving), None);
        assert_eq!(manager.phase(next), Some(Phase::Entering));
        assert_eq!(port.attached(), vec![next]);

        // The cancelled exit timer must not touch the next request.
        clock.advance(ms(300), &mut manager);
        assert_eq!(manager.phase(next), Some(Phase::Visible));
    }

    #[test]
    fn late_timers_of_cancelled_entering_request_are_ignored() {
        let (mut manager, _, clock) = setup();
        let ctx = HostContext::new("main");
        let first = manager.enqueue(text(&ctx, "one", 1000));
        let second = manager.enqueue(text(&ctx, "two", 1000));
        clock.advance(ms(100), &mut manager);
        assert_eq!(manager.phase(first), Some(Phase::Entering));

        assert!(manager.cancel(first));
        assert_eq!(manager.phase(second), Some(Phase::Entering));

        // Enter-finished and removal timers of the first request.
        manager.fire(TimerId(0));
        manager.fire(TimerId(1));
        assert_eq!(manager.live(), Some(second));
        assert_eq!(manager.phase(second), Some(Phase::Entering));
        assert_eq!(
            manager.journal().transitions_for(first),
            vec![Transition::Enqueued, Transition::Entering, Transition::Cancelled]
        );
    }

    #[test]
    fn cancelled_and_cleared_requests_report_removal() {
        let (mut manager, _, _) = setup();
        let ctx = HostContext::new("main");
        let cancelled = Counts::default();
        let cleared = Counts::default();
        let pending = Counts::default();
        let build = |counts: &Counts| {
            Request::builder(&ctx)
                .text("tracked")
                .style(Style::info())
                .lifecycle_callback(counts.clone())
                .build()
                .expect("valid request")
        };

        let first = manager.enqueue(build(&cancelled));
        manager.enqueue(build(&cleared));
        let never_shown = manager.enqueue(build(&pending));
        assert!(manager.cancel(first));
        assert!(manager.cancel(never_shown));
        manager.clear_all();

        assert_eq!(cancelled.removed.load(Ordering::SeqCst), 1);
        assert_eq!(cleared.displayed.load(Ordering::SeqCst), 1);
        assert_eq!(cleared.removed.load(Ordering::SeqCst), 1);
        assert_eq!(pending.displayed.load(Ordering::SeqCst), 0);
        assert_eq!(pending.removed.load(Ordering::SeqCst), 0);
    }
}

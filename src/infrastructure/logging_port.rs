// SPDX-License-Identifier: MPL-2.0
//! In-memory presentation adapter.
//!
//! [`LoggingPort`] keeps track of which banners are attached, reports fixed
//! animation durations and logs every call through `tracing`. It backs the
//! demo binary and lets hosts exercise their notification flows without a
//! real view toolkit. Clones share the same state, so one clone can be
//! handed to a manager while another is inspected.

use crate::application::port::{
    AttachTarget, AttachmentHandle, Banner, PresentationError, PresentationPort,
};
use crate::domain::context::{ContainerRef, ContextId, HostContext};
use crate::domain::notification::{Animation, RequestId};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One recorded call to the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    Attach {
        request: RequestId,
        handle: AttachmentHandle,
        target: AttachTarget,
        /// Child index inside the target container; `None` for context roots.
        index: Option<usize>,
    },
    Detach {
        handle: AttachmentHandle,
    },
    EnterAnimation {
        handle: AttachmentHandle,
        animation: Animation,
    },
    ExitAnimation {
        handle: AttachmentHandle,
        animation: Animation,
    },
    Announce {
        context: ContextId,
        text: String,
    },
}

#[derive(Debug, Default)]
struct PortState {
    enter: Duration,
    exit: Duration,
    next_handle: u64,
    attached: BTreeMap<AttachmentHandle, RequestId>,
    refused: HashSet<ContextId>,
    /// Banner elements currently inside each container.
    children: HashMap<ContainerRef, usize>,
    placed: HashMap<AttachmentHandle, ContainerRef>,
    calls: Vec<PortCall>,
}

/// Presentation port that records instead of rendering.
#[derive(Debug, Clone, Default)]
pub struct LoggingPort {
    state: Arc<Mutex<PortState>>,
}

impl LoggingPort {
    /// Creates a port whose enter and exit animations take the given time.
    #[must_use]
    pub fn new(enter: Duration, exit: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PortState {
                enter,
                exit,
                ..PortState::default()
            })),
        }
    }

    /// Creates a port without animations.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn state(&self) -> MutexGuard<'_, PortState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every later attach to the root of `context` fail.
    pub fn refuse_context(&self, context: ContextId) {
        self.state().refused.insert(context);
    }

    /// All calls so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<PortCall> {
        self.state().calls.clone()
    }

    /// Requests whose elements are currently attached, in attach order.
    #[must_use]
    pub fn attached(&self) -> Vec<RequestId> {
        self.state().attached.values().copied().collect()
    }

    /// Returns whether `request` was ever attached.
    #[must_use]
    pub fn was_attached(&self, request: RequestId) -> bool {
        self.state()
            .calls
            .iter()
            .any(|call| matches!(call, PortCall::Attach { request: r, .. } if *r == request))
    }

    /// Requests in the order they were attached.
    #[must_use]
    pub fn attach_order(&self) -> Vec<RequestId> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                PortCall::Attach { request, .. } => Some(*request),
                _ => None,
            })
            .collect()
    }
}

impl PresentationPort for LoggingPort {
    fn attach(
        &mut self,
        banner: Banner<'_>,
        target: AttachTarget,
    ) -> Result<AttachmentHandle, PresentationError> {
        let mut state = self.state();
        if let AttachTarget::Root(context) = target {
            if state.refused.contains(&context) {
                tracing::debug!(request = %banner.id, %context, "refusing attachment");
                return Err(PresentationError::ContextClosed(context));
            }
        }

        state.next_handle += 1;
        let handle = AttachmentHandle(state.next_handle);
        let index = match target {
            AttachTarget::Container {
                container,
                position,
            } => {
                let children = state.children.entry(container).or_insert(0);
                let index = position.resolve(*children);
                *children += 1;
                state.placed.insert(handle, container);
                Some(index)
            }
            AttachTarget::Root(_) => None,
        };
        state.attached.insert(handle, banner.id);
        state.calls.push(PortCall::Attach {
            request: banner.id,
            handle,
            target,
            index,
        });
        tracing::info!(
            request = %banner.id,
            content = ?banner.content,
            background = banner.style.background.0,
            ?target,
            ?index,
            "attach"
        );
        Ok(handle)
    }

    fn detach(&mut self, handle: AttachmentHandle) {
        let mut state = self.state();
        if let Some(request) = state.attached.remove(&handle) {
            tracing::info!(%request, "detach");
        }
        if let Some(container) = state.placed.remove(&handle) {
            if let Some(children) = state.children.get_mut(&container) {
                *children = children.saturating_sub(1);
            }
        }
        state.calls.push(PortCall::Detach { handle });
    }

    fn start_enter_animation(
        &mut self,
        handle: AttachmentHandle,
        animation: Animation,
    ) -> Duration {
        self.state()
            .calls
            .push(PortCall::EnterAnimation { handle, animation });
        self.animation_duration(animation)
    }

    fn start_exit_animation(&mut self, handle: AttachmentHandle, animation: Animation) -> Duration {
        self.state()
            .calls
            .push(PortCall::ExitAnimation { handle, animation });
        self.animation_duration(animation)
    }

    fn animation_duration(&self, animation: Animation) -> Duration {
        let state = self.state();
        match animation {
            Animation::None => Duration::ZERO,
            Animation::SlideOut | Animation::DownUnderOut => state.exit,
            Animation::SlideIn | Animation::DownUnderIn | Animation::Fade => state.enter,
        }
    }

    fn is_attached(&self, handle: AttachmentHandle) -> bool {
        self.state().attached.contains_key(&handle)
    }

    fn announce(&mut self, context: &HostContext, text: &str) {
        tracing::debug!(context = %context.id(), text, "announce");
        self.state().calls.push(PortCall::Announce {
            context: context.id(),
            text: text.to_string(),
        });
    }
}

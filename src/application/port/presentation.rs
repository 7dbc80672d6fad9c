// SPDX-License-Identifier: MPL-2.0
//! Presentation port definition.
//!
//! This module defines the [`PresentationPort`] trait: the capability the
//! queue manager needs from the host UI toolkit. Adapters turn a banner into
//! a real view, put it into the host view tree and run its animations.
//!
//! # Design Notes
//!
//! - Uses domain types only (no toolkit handles leak into the manager)
//! - Animation completion is reported as a duration; the manager schedules
//!   the follow-up itself through the [`Scheduler`](super::Scheduler) port
//! - A zero duration means the adapter has no completion signal, and the
//!   manager finishes the phase immediately

use crate::domain::context::{ContainerRef, ContextId, HostContext};
use crate::domain::notification::{Animation, Configuration, Content, Position, RequestId, Style};
use std::fmt;
use std::time::Duration;

// =============================================================================
// PresentationError
// =============================================================================

/// Errors an adapter can report when attaching a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    /// The context root can no longer accept children.
    ContextClosed(ContextId),

    /// The requested container does not exist in the host tree.
    ContainerNotFound(ContainerRef),

    /// Any other toolkit failure.
    Backend(String),
}

impl fmt::Display for PresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationError::ContextClosed(id) => write!(f, "Context {id} is closed"),
            PresentationError::ContainerNotFound(container) => {
                write!(f, "Container {} not found", container.0)
            }
            PresentationError::Backend(msg) => write!(f, "Presentation backend error: {msg}"),
        }
    }
}

impl std::error::Error for PresentationError {}

// =============================================================================
// Attachment types
// =============================================================================

/// Handle to a banner element attached to the host view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentHandle(pub u64);

/// Where a banner element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTarget {
    /// An explicit container, at the configured position.
    Container {
        container: ContainerRef,
        position: Position,
    },
    /// The root of the owning context.
    Root(ContextId),
}

/// Everything an adapter needs to render one banner.
#[derive(Debug, Clone, Copy)]
pub struct Banner<'a> {
    pub id: RequestId,
    pub content: &'a Content,
    pub style: &'a Style,
    pub configuration: &'a Configuration,
}

// =============================================================================
// PresentationPort Trait
// =============================================================================

/// Port for attaching, detaching and animating banner elements.
///
/// All calls happen on the single thread that drives the manager.
pub trait PresentationPort: Send {
    /// Builds the banner element and attaches it to `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`PresentationError`] if the target cannot accept the
    /// element. The manager drops the request and serves the next one.
    fn attach(
        &mut self,
        banner: Banner<'_>,
        target: AttachTarget,
    ) -> Result<AttachmentHandle, PresentationError>;

    /// Removes the element from the host tree. Unknown handles are ignored.
    fn detach(&mut self, handle: AttachmentHandle);

    /// Starts the enter animation and returns how long it runs.
    fn start_enter_animation(&mut self, handle: AttachmentHandle, animation: Animation)
        -> Duration;

    /// Starts the exit animation and returns how long it runs.
    fn start_exit_animation(&mut self, handle: AttachmentHandle, animation: Animation)
        -> Duration;

    /// Reports how long `animation` runs without starting it.
    fn animation_duration(&self, animation: Animation) -> Duration;

    /// Returns whether the element is still part of the host tree.
    fn is_attached(&self, handle: AttachmentHandle) -> bool;

    /// Announces text through the host's accessibility service.
    fn announce(&mut self, _context: &HostContext, _text: &str) {}
}

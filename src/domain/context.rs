// SPDX-License-Identifier: MPL-2.0
//! Presentation contexts that notifications are displayed against.
//!
//! A [`HostContext`] stands for one application screen. The embedding
//! application owns it through a [`ContextHandle`]; requests only keep a weak
//! back-reference, so a context can be torn down at any time without the
//! notification queue keeping it alive.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Unique identifier for a host context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Creates a new unique context ID.
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Strong handle held by the application that owns the context.
pub type ContextHandle = Arc<HostContext>;

/// Weak back-reference stored by notification requests.
pub type ContextRef = Weak<HostContext>;

/// An owning presentation context (for example an application screen).
#[derive(Debug)]
pub struct HostContext {
    id: ContextId,
    label: String,
    finishing: AtomicBool,
}

impl HostContext {
    /// Creates a new context and returns the owning handle.
    pub fn new(label: impl Into<String>) -> ContextHandle {
        Arc::new(Self {
            id: ContextId::next(),
            label: label.into(),
            finishing: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Marks the context as being torn down.
    ///
    /// Requests targeting a finishing context are never attached. Calling
    /// this more than once has no further effect.
    pub fn finish(&self) {
        self.finishing.store(true, Ordering::Release);
    }

    /// Returns whether [`HostContext::finish`] has been called.
    #[must_use]
    pub fn is_finishing(&self) -> bool {
        self.finishing.load(Ordering::Acquire)
    }
}

/// Upgrades a weak context reference, returning it only while it is still
/// usable for presentation.
#[must_use]
pub fn resolve(context: &ContextRef) -> Option<ContextHandle> {
    context.upgrade().filter(|ctx| !ctx.is_finishing())
}

/// Opaque token identifying a host container a banner can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerRef(pub u64);

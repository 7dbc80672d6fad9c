// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the abstract interfaces the notification manager
//! drives. Infrastructure adapters implement them.
//!
//! # Available Ports
//!
//! - [`presentation`]: attach/detach/animate banner elements in a host tree
//! - [`scheduler`]: keyed, cancelable delayed callbacks
//!
//! # Design Notes
//!
//! - All traits use domain types only (no toolkit or runtime types)
//! - Traits are `Send` so a manager can live behind the default-instance lock
//! - No `async fn`: waits are expressed as timers fired by the event loop

pub mod presentation;
pub mod scheduler;

// Re-export main types for convenience
pub use presentation::{
    AttachTarget, AttachmentHandle, Banner, PresentationError, PresentationPort,
};
pub use scheduler::{Scheduler, TimerId};

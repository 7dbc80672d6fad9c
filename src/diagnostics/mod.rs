// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification lifecycle.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`Journal`]: Bounded history of [`LifecycleEvent`]s kept by each manager
//! - [`Transition`]: The state changes a request goes through

mod buffer;
mod journal;

pub use buffer::CircularBuffer;
pub use journal::{DropReason, Journal, LifecycleEvent, Transition};

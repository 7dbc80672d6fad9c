// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined
//! in `application::port`.
//!
//! # Available Adapters
//!
//! - [`virtual_clock`]: Manually advanced timer queue (implements [`Scheduler`])
//! - [`tokio_scheduler`]: Timers as tokio tasks feeding a mailbox (implements [`Scheduler`])
//! - [`logging_port`]: In-memory view tree that logs (implements [`PresentationPort`])
//!
//! [`Scheduler`]: crate::application::port::Scheduler
//! [`PresentationPort`]: crate::application::port::PresentationPort

pub mod logging_port;
pub mod tokio_scheduler;
pub mod virtual_clock;

// Re-export main types for convenience
pub use logging_port::{LoggingPort, PortCall};
pub use tokio_scheduler::{drive, TimerEvents, TokioScheduler};
pub use virtual_clock::VirtualClock;

// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports the notification manager depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The notification manager drives the ports and never names an adapter
//!
//! # Example
//!
//! ```ignore
//! use crouton::application::port::{PresentationPort, Scheduler};
//!
//! // A host toolkit implements the ports
//! struct AndroidViews { /* ... */ }
//! impl PresentationPort for AndroidViews { /* ... */ }
//! ```

pub mod port;

// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`context`]: Host contexts and the weak references requests keep to them
//! - [`diagnostics`]: Diagnostics types ([`JournalCapacity`](diagnostics::JournalCapacity))
//! - [`error`]: Domain error types ([`RequestError`](error::RequestError))
//! - [`notification`]: Content, style and configuration of a banner

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod notification;

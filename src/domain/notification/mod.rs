// SPDX-License-Identifier: MPL-2.0
//! Notification value types.
//!
//! - [`configuration`]: display timing, animations and placement
//! - [`content`]: what a banner shows
//! - [`id`]: request identity
//! - [`style`]: visual parameters handed through to the presentation port

pub mod configuration;
pub mod content;
pub mod id;
pub mod style;

pub use configuration::{Animation, Configuration, DisplayDuration, Position};
pub use content::{Content, ViewRef};
pub use id::RequestId;
pub use style::{Color, Gravity, ImageRef, Style};

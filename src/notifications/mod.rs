// SPDX-License-Identifier: MPL-2.0
//! Queued notification banners.
//!
//! # Components
//!
//! - [`request`] - `Request` and its builder
//! - [`manager`] - `Manager` for queuing and lifecycle management
//! - [`facade`] - default manager instance and convenience functions
//!
//! # Usage
//!
//! ```ignore
//! use crouton::notifications::{self, Manager, Request};
//! use crouton::domain::notification::Style;
//!
//! notifications::install_default(Manager::new(port, scheduler))?;
//!
//! let id = notifications::show_text(&screen, "Image saved", Style::confirm(), None)?;
//!
//! // When the screen goes away
//! notifications::clear_for(&screen)?;
//! ```

mod facade;
mod manager;
mod request;

pub use facade::{
    cancel, cancel_all, clear_for, has_default, hide, install_default, show, show_text,
    with_default,
};
pub use manager::{Manager, Phase};
pub use request::{LifecycleCallback, Request, RequestBuilder};

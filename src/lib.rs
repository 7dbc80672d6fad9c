// SPDX-License-Identifier: MPL-2.0
//! `crouton` queues short, styled notification banners against a host UI.
//!
//! A [`Manager`] shows one banner at a time, in the order they were queued,
//! and drives the host toolkit through two ports: a
//! [`PresentationPort`](application::port::PresentationPort) that attaches
//! and animates banner views, and a [`Scheduler`](application::port::Scheduler)
//! for delayed callbacks. Banners belong to a [`HostContext`] that may go
//! away at any time; the queue copes with that on its own.

#![doc(html_root_url = "https://docs.rs/crouton/0.3.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod notifications;

pub use domain::context::{ContainerRef, ContextHandle, ContextId, HostContext};
pub use domain::notification::{Configuration, DisplayDuration, RequestId, Style};
pub use error::{Error, Result};
pub use notifications::{LifecycleCallback, Manager, Phase, Request};

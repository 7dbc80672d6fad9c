// SPDX-License-Identifier: MPL-2.0
//! Default manager instance and convenience functions.
//!
//! Most hosts need a single queue. They install one [`Manager`] at startup
//! and then use the free functions below from anywhere on the UI thread.
//! Hosts that want several independent queues construct more managers and
//! keep them themselves; nothing here tracks them.

use super::manager::Manager;
use super::request::Request;
use crate::domain::context::{ContainerRef, ContextHandle};
use crate::domain::notification::{RequestId, Style};
use crate::error::{Error, Result};
use std::sync::{Mutex, OnceLock};

static DEFAULT: OnceLock<Mutex<Manager>> = OnceLock::new();

/// Installs the default manager.
///
/// # Errors
///
/// Returns [`Error::DefaultInstalled`] if a default manager already exists;
/// the given manager is dropped in that case.
pub fn install_default(mut manager: Manager) -> Result<()> {
    manager.defer_callbacks();
    let mut installed = false;
    DEFAULT.get_or_init(|| {
        installed = true;
        Mutex::new(manager)
    });
    if !installed {
        return Err(Error::DefaultInstalled);
    }
    tracing::debug!("installed default notification manager");
    Ok(())
}

/// Returns whether a default manager has been installed.
#[must_use]
pub fn has_default() -> bool {
    DEFAULT.get().is_some()
}

/// Runs `f` with exclusive access to the default manager.
///
/// Lifecycle callbacks triggered by `f` run after the manager has been
/// unlocked again, so they can use the functions of this module.
///
/// # Errors
///
/// Returns [`Error::NoDefaultManager`] before [`install_default`] was
/// called, and [`Error::Poisoned`] if a previous user panicked.
pub fn with_default<R>(f: impl FnOnce(&mut Manager) -> R) -> Result<R> {
    let lock = DEFAULT.get().ok_or(Error::NoDefaultManager)?;
    let (result, notices) = {
        let mut manager = lock.lock().map_err(|_| Error::Poisoned)?;
        let result = f(&mut manager);
        (result, manager.take_notices())
    };
    for notice in notices {
        notice.deliver();
    }
    Ok(result)
}

/// Queues `request` on the default manager.
///
/// # Errors
///
/// Returns [`Error::NoDefaultManager`] before [`install_default`] was
/// called, and [`Error::Poisoned`] if a previous user panicked.
pub fn show(request: Request) -> Result<RequestId> {
    with_default(|manager| manager.enqueue(request))
}

/// Builds a text request and queues it on the default manager.
///
/// # Errors
///
/// Fails with [`Error::Request`] if the request cannot be built, or if no
/// default manager is installed.
pub fn show_text(
    context: &ContextHandle,
    text: impl Into<String>,
    style: Style,
    container: Option<ContainerRef>,
) -> Result<RequestId> {
    let mut builder = Request::builder(context).text(text).style(style);
    if let Some(container) = container {
        builder = builder.container(container);
    }
    show(builder.build()?)
}

/// Hides a request on the default manager. See [`Manager::hide`].
pub fn hide(id: RequestId) -> Result<bool> {
    with_default(|manager| manager.hide(id))
}

/// Cancels a request on the default manager. See [`Manager::cancel`].
pub fn cancel(id: RequestId) -> Result<bool> {
    with_default(|manager| manager.cancel(id))
}

/// Removes everything from the default manager.
pub fn cancel_all() -> Result<()> {
    with_default(Manager::clear_all)
}

/// Removes all requests of a context that is being torn down.
///
/// Call this from the context's teardown path so the queue never refers to
/// a destroyed context.
pub fn clear_for(context: &ContextHandle) -> Result<usize> {
    with_default(|manager| manager.clear_for_context(context.id()))
}

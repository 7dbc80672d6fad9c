// SPDX-License-Identifier: MPL-2.0
//! Notification requests.
//!
//! A [`Request`] describes one banner: its content, style, configuration,
//! the context it belongs to and, optionally, the container it goes into.
//! Requests are moved into a [`Manager`](super::Manager), so a request can
//! only ever be queued once.

use crate::application::port::Banner;
use crate::domain::context::{self, ContainerRef, ContextHandle, ContextId, ContextRef};
use crate::domain::error::RequestError;
use crate::domain::notification::{
    Configuration, Content, DisplayDuration, RequestId, Style, ViewRef,
};
use std::fmt;
use std::sync::{Arc, Weak};

/// Callbacks on the major lifecycle events of a request.
///
/// Callbacks run after the manager has finished the operation that
/// triggered them, with no lock held, so they may queue or hide other
/// banners through the default manager.
pub trait LifecycleCallback: Send + Sync {
    /// Called once the banner has been attached to the host tree.
    fn on_displayed(&self) {}

    /// Called once the banner has left the host tree.
    fn on_removed(&self) {}
}

/// A lifecycle callback waiting to be delivered.
pub(crate) enum Notice {
    Displayed(Arc<dyn LifecycleCallback>),
    Removed(Arc<dyn LifecycleCallback>),
}

impl Notice {
    pub(crate) fn deliver(self) {
        match self {
            Notice::Displayed(callback) => callback.on_displayed(),
            Notice::Removed(callback) => callback.on_removed(),
        }
    }
}

/// One request to display a banner.
pub struct Request {
    id: RequestId,
    content: Content,
    style: Style,
    configuration: Configuration,
    context: ContextRef,
    context_id: ContextId,
    container: Option<ContainerRef>,
    callback: Option<Arc<dyn LifecycleCallback>>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("configuration", &self.configuration)
            .field("context_id", &self.context_id)
            .field("container", &self.container)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Starts building a request for `context`.
    pub fn builder(context: &ContextHandle) -> RequestBuilder {
        RequestBuilder::new(context)
    }

    /// Builds a text request with the given style.
    ///
    /// # Errors
    ///
    /// Fails if the text is empty or the context is no longer available.
    pub fn text(
        context: &ContextHandle,
        text: impl Into<String>,
        style: Style,
    ) -> Result<Self, RequestError> {
        Self::builder(context).text(text).style(style).build()
    }

    /// Builds a request showing a caller-supplied view.
    ///
    /// # Errors
    ///
    /// Fails if the context is no longer available.
    pub fn custom(context: &ContextHandle, view: ViewRef) -> Result<Self, RequestError> {
        Self::builder(context).custom_view(view).build()
    }

    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[must_use]
    pub fn duration(&self) -> DisplayDuration {
        self.configuration.duration
    }

    /// The id of the owning context. Kept after the back-reference is cleared.
    #[must_use]
    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    /// Returns the owning context while it is still usable.
    #[must_use]
    pub fn context(&self) -> Option<ContextHandle> {
        context::resolve(&self.context)
    }

    #[must_use]
    pub fn has_valid_context(&self) -> bool {
        self.context().is_some()
    }

    #[must_use]
    pub fn container(&self) -> Option<ContainerRef> {
        self.container
    }

    /// Borrows the parts a presentation port renders.
    #[must_use]
    pub fn banner(&self) -> Banner<'_> {
        Banner {
            id: self.id,
            content: &self.content,
            style: &self.style,
            configuration: &self.configuration,
        }
    }

    /// Drops the references to the context and the container.
    pub(crate) fn detach_context(&mut self) {
        self.context = Weak::new();
        self.container = None;
    }

    pub(crate) fn displayed_notice(&self) -> Option<Notice> {
        self.callback.as_ref().map(|callback| Notice::Displayed(Arc::clone(callback)))
    }

    /// Releases the callback, returning its `on_removed` notice.
    pub(crate) fn removed_notice(&mut self) -> Option<Notice> {
        self.callback.take().map(Notice::Removed)
    }
}

/// Builder for [`Request`].
pub struct RequestBuilder {
    context: ContextRef,
    content: Option<Content>,
    style: Option<Style>,
    configuration: Option<Configuration>,
    defaults: Configuration,
    duration: Option<DisplayDuration>,
    container: Option<ContainerRef>,
    callback: Option<Arc<dyn LifecycleCallback>>,
}

impl RequestBuilder {
    fn new(context: &ContextHandle) -> Self {
        Self {
            context: Arc::downgrade(context),
            content: None,
            style: None,
            configuration: None,
            defaults: Configuration::default(),
            duration: None,
            container: None,
            callback: None,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Content::Text(text.into()));
        self
    }

    #[must_use]
    pub fn custom_view(mut self, view: ViewRef) -> Self {
        self.content = Some(Content::Custom(view));
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Places the banner into `container` instead of the context root.
    #[must_use]
    pub fn container(mut self, container: ContainerRef) -> Self {
        self.container = Some(container);
        self
    }

    /// Sets the configuration, overriding the one carried by the style.
    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Sets the configuration used when neither the request nor its style
    /// provide one, e.g. [`Config::configuration`](crate::config::Config::configuration).
    #[must_use]
    pub fn defaults(mut self, defaults: Configuration) -> Self {
        self.defaults = defaults;
        self
    }

    /// Overrides only the display duration.
    #[must_use]
    pub fn duration(mut self, duration: DisplayDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn lifecycle_callback(mut self, callback: impl LifecycleCallback + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Validates the parts and builds the request.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when content is missing, text content is
    /// empty or has no style, or the context is already gone.
    pub fn build(self) -> Result<Request, RequestError> {
        let context =
            context::resolve(&self.context).ok_or(RequestError::ContextUnavailable)?;
        let content = self.content.ok_or(RequestError::MissingContent)?;

        let style = match (&content, self.style) {
            (Content::Text(text), _) if text.is_empty() => return Err(RequestError::EmptyText),
            (Content::Text(_), None) => return Err(RequestError::MissingStyle),
            (_, Some(style)) => style,
            (Content::Custom(_), None) => Style::info(),
        };

        let mut configuration = self
            .configuration
            .or(style.configuration)
            .unwrap_or(self.defaults);
        if let Some(duration) = self.duration {
            configuration.duration = duration;
        }

        Ok(Request {
            id: RequestId::new(),
            content,
            style,
            configuration,
            context: self.context,
            context_id: context.id(),
            container: self.container,
            callback: self.callback,
        })
    }
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Reasons a notification request cannot be built.
///
/// These are the only failures surfaced to callers: everything that goes
/// wrong after a request was accepted is absorbed by the queue manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Neither text nor a custom view was supplied.
    MissingContent,
    /// Text content was supplied without a style.
    MissingStyle,
    /// Text content was empty.
    EmptyText,
    /// The target context was already dropped or finishing.
    ContextUnavailable,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingContent => write!(f, "no text or custom view was given"),
            RequestError::MissingStyle => write!(f, "text content requires a style"),
            RequestError::EmptyText => write!(f, "text content must not be empty"),
            RequestError::ContextUnavailable => write!(f, "target context is no longer available"),
        }
    }
}

impl std::error::Error for RequestError {}

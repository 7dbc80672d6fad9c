// SPDX-License-Identifier: MPL-2.0
//! Banner content.

/// Opaque token for a view built by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewRef(pub u64);

/// What a banner displays.
///
/// The queue manager never looks inside the content. Text is only read back
/// for accessibility announcements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text rendered with the request's style.
    Text(String),
    /// A view supplied by the caller.
    Custom(ViewRef),
}

impl Content {
    /// Returns the text to announce, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Custom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_text_content_exposes_text() {
        assert_eq!(Content::Text("saved".into()).text(), Some("saved"));
        assert_eq!(Content::Custom(ViewRef(7)).text(), None);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Visual styling of a banner.
//!
//! Styles are opaque to the queue manager. They are carried on the request
//! and handed to the presentation port, which turns them into real views.

use super::configuration::Configuration;

/// ARGB color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const RED_LIGHT: Self = Self(0xffff_4444);
    pub const GREEN_LIGHT: Self = Self(0xff99_cc00);
    pub const BLUE_LIGHT: Self = Self(0xff33_b5e5);
    pub const WHITE: Self = Self(0xffff_ffff);

    #[must_use]
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Opaque token for an image resource known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub u64);

/// Horizontal alignment of the banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Center,
    Start,
    End,
}

/// Visual parameters of a banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub background: Color,
    pub text_color: Color,
    /// Fixed height in pixels; `None` wraps the content.
    pub height_px: Option<u32>,
    /// Text size in scaled pixels; `None` uses the host default.
    pub text_size: Option<f32>,
    pub padding_px: u32,
    pub gravity: Gravity,
    pub image: Option<ImageRef>,
    pub font_name: Option<String>,
    /// Configuration used when the request does not set its own.
    pub configuration: Option<Configuration>,
}

impl Default for Style {
    fn default() -> Self {
        Self::info()
    }
}

impl Style {
    /// Creates a style with the given background and default everything else.
    #[must_use]
    pub fn with_background(background: Color) -> Self {
        Self {
            background,
            text_color: Color::WHITE,
            height_px: None,
            text_size: None,
            padding_px: 10,
            gravity: Gravity::Center,
            image: None,
            font_name: None,
            configuration: None,
        }
    }

    /// Red banner for errors.
    #[must_use]
    pub fn alert() -> Self {
        Self::with_background(Color::RED_LIGHT)
    }

    /// Green banner for confirmations.
    #[must_use]
    pub fn confirm() -> Self {
        Self::with_background(Color::GREEN_LIGHT)
    }

    /// Blue banner for neutral information.
    #[must_use]
    pub fn info() -> Self {
        Self::with_background(Color::BLUE_LIGHT)
    }

    #[must_use]
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn height(mut self, height_px: u32) -> Self {
        self.height_px = Some(height_px);
        self
    }

    #[must_use]
    pub fn image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    #[must_use]
    pub fn font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    #[must_use]
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = Some(configuration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::DisplayDuration;

    #[test]
    fn presets_have_distinct_backgrounds() {
        let alert = Style::alert().background;
        let confirm = Style::confirm().background;
        let info = Style::info().background;

        assert_ne!(alert, confirm);
        assert_ne!(alert, info);
        assert_ne!(confirm, info);
    }

    #[test]
    fn presets_are_opaque() {
        assert_eq!(Style::alert().background.alpha(), 0xff);
    }

    #[test]
    fn style_can_carry_configuration() {
        let style = Style::confirm()
            .configuration(Configuration::default().with_duration(DisplayDuration::LONG));
        assert_eq!(
            style.configuration.map(|c| c.duration),
            Some(DisplayDuration::LONG)
        );
    }
}

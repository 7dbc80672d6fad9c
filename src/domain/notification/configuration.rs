// SPDX-License-Identifier: MPL-2.0
//! Display configuration of a notification.
//!
//! A [`Configuration`] holds everything the queue manager consults about a
//! request: how long it stays visible, which animations the presentation
//! port should run, and where it goes inside an explicit container. Keeping
//! it apart from [`Style`](super::Style) lets one style be reused with
//! different timings.

use std::time::Duration;

// =============================================================================
// DisplayDuration
// =============================================================================

/// How long a banner stays visible once it has animated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayDuration {
    /// Removed automatically after the given time.
    Finite(Duration),
    /// Stays until hidden or cancelled explicitly.
    Infinite,
}

impl DisplayDuration {
    /// Default short display time (3s).
    pub const SHORT: Self = Self::Finite(Duration::from_millis(3000));
    /// Default long display time (5s).
    pub const LONG: Self = Self::Finite(Duration::from_millis(5000));

    /// Converts a millisecond value where any negative number means infinite.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        u64::try_from(millis).map_or(Self::Infinite, |ms| {
            Self::Finite(Duration::from_millis(ms))
        })
    }

    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Returns the finite display time, or `None` when infinite.
    #[must_use]
    pub fn as_duration(self) -> Option<Duration> {
        match self {
            Self::Finite(duration) => Some(duration),
            Self::Infinite => None,
        }
    }

    /// Adds animation time to a finite duration.
    ///
    /// Returns `None` for infinite durations, which never expire on their own.
    #[must_use]
    pub fn total_with(self, extra: Duration) -> Option<Duration> {
        self.as_duration().map(|d| d.saturating_add(extra))
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self::SHORT
    }
}

// =============================================================================
// Animation
// =============================================================================

/// Animation selection, interpreted by the presentation port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Animation {
    /// Slide in from the top edge.
    #[default]
    SlideIn,
    /// Slide back out through the top edge.
    SlideOut,
    /// Slide in from underneath the content (for banners placed below a bar).
    DownUnderIn,
    /// Slide back underneath the content.
    DownUnderOut,
    /// Cross-fade.
    Fade,
    /// No animation; the port should report a zero duration.
    None,
}

// =============================================================================
// Position
// =============================================================================

/// Placement inside an explicit container.
///
/// Ignored when the banner is attached to the context root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Start,
    Middle,
    End,
    /// Explicit child index. Ports clamp it to the last available slot.
    Index(usize),
}

impl Position {
    /// Resolves the position to a child index for a container that currently
    /// holds `children` elements.
    #[must_use]
    pub fn resolve(self, children: usize) -> usize {
        match self {
            Position::Start => 0,
            Position::Middle => children / 2,
            Position::End => children,
            Position::Index(index) => index.min(children),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Behavioural configuration of a single notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub duration: DisplayDuration,
    pub in_animation: Animation,
    pub out_animation: Animation,
    pub position: Position,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            duration: DisplayDuration::SHORT,
            in_animation: Animation::SlideIn,
            out_animation: Animation::SlideOut,
            position: Position::Start,
        }
    }
}

impl Configuration {
    #[must_use]
    pub fn with_duration(mut self, duration: DisplayDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_animations(mut self, enter: Animation, exit: Animation) -> Self {
        self.in_animation = enter;
        self.out_animation = exit;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Uses the down-under animation pair.
    #[must_use]
    pub fn down_under(self) -> Self {
        self.with_animations(Animation::DownUnderIn, Animation::DownUnderOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_millis_mean_infinite() {
        assert_eq!(DisplayDuration::from_millis(-1), DisplayDuration::Infinite);
        assert_eq!(
            DisplayDuration::from_millis(1500),
            DisplayDuration::Finite(Duration::from_millis(1500))
        );
    }

    #[test]
    fn total_with_adds_animation_time() {
        let total = DisplayDuration::SHORT.total_with(Duration::from_millis(400));
        assert_eq!(total, Some(Duration::from_millis(3400)));
        assert_eq!(
            DisplayDuration::Infinite.total_with(Duration::from_millis(400)),
            None
        );
    }

    #[test]
    fn long_is_longer_than_short() {
        assert!(DisplayDuration::LONG.as_duration() > DisplayDuration::SHORT.as_duration());
    }

    #[test]
    fn position_resolves_and_clamps() {
        assert_eq!(Position::Start.resolve(4), 0);
        assert_eq!(Position::Middle.resolve(4), 2);
        assert_eq!(Position::End.resolve(4), 4);
        assert_eq!(Position::Index(2).resolve(4), 2);
        assert_eq!(Position::Index(99).resolve(4), 4);
    }

    #[test]
    fn configuration_builder_methods() {
        let config = Configuration::default()
            .with_duration(DisplayDuration::Infinite)
            .with_position(Position::End)
            .down_under();

        assert!(config.duration.is_infinite());
        assert_eq!(config.position, Position::End);
        assert_eq!(config.in_animation, Animation::DownUnderIn);
        assert_eq!(config.out_animation, Animation::DownUnderOut);
    }
}

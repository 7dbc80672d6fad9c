// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Display**: How long banners stay on screen
//! - **Accessibility**: Announcement of banner text
//! - **Diagnostics**: Lifecycle journal size

use crate::domain::diagnostics::journal_capacity_bounds;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default short display duration (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Default long display duration (in milliseconds).
pub const DEFAULT_LONG_DURATION_MS: u64 = 5000;

/// Shortest display duration accepted from a settings file.
pub const MIN_DURATION_MS: u64 = 250;

/// Longest display duration accepted from a settings file.
pub const MAX_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Accessibility Defaults
// ==========================================================================

/// Whether text banners are announced to accessibility services.
pub const DEFAULT_ANNOUNCE: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept per manager.
pub const DEFAULT_JOURNAL_CAPACITY: usize = journal_capacity_bounds::DEFAULT;

/// Minimum lifecycle journal capacity.
pub const MIN_JOURNAL_CAPACITY: usize = journal_capacity_bounds::MIN;

/// Maximum lifecycle journal capacity.
pub const MAX_JOURNAL_CAPACITY: usize = journal_capacity_bounds::MAX;

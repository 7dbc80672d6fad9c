// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.
//!
//! Type-safe wrappers for diagnostics values, always within valid ranges.

// =============================================================================
// Journal Capacity Bounds
// =============================================================================

/// Journal capacity bounds (16 to 10000 events).
pub mod journal_capacity_bounds {
    /// Minimum journal capacity.
    pub const MIN: usize = 16;
    /// Maximum journal capacity.
    pub const MAX: usize = 10000;
    /// Default journal capacity.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// JournalCapacity
// =============================================================================

/// Number of lifecycle events a manager keeps in memory.
///
/// # Example
///
/// ```
/// use crouton::domain::diagnostics::JournalCapacity;
///
/// assert_eq!(JournalCapacity::new(500).value(), 500);
///
/// // Values outside range are clamped
/// assert_eq!(JournalCapacity::new(50_000).value(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalCapacity(usize);

impl JournalCapacity {
    /// Creates a new journal capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(journal_capacity_bounds::MIN, journal_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= journal_capacity_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= journal_capacity_bounds::MAX
    }
}

impl Default for JournalCapacity {
    fn default() -> Self {
        Self(journal_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

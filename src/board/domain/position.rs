//! Fractional sort keys for task ordering.
//!
//! Positions are real-valued: inserting a task between two neighbours takes
//! the midpoint of their keys, so no other row needs rewriting. Appending
//! leaves a [`Position::STEP`]-sized gap past the current maximum. Repeated
//! insertion into the same narrow gap halves the available precision each
//! time; no rebalancing pass exists, matching the behaviour this module
//! reproduces.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Fractional sort key determining task order within a view.
///
/// Ordered by [`f64::total_cmp`], so the ordering is total even for values
/// that plain `f64` comparison would leave unordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(f64);

impl Position {
    /// Gap left between consecutive appended tasks.
    pub const STEP: f64 = 65536.0;

    /// The zero key, used as the lower bound when a task becomes first.
    pub const ZERO: Self = Self(0.0);

    /// Creates a position from a raw key value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the key for appending after the current maximum.
    ///
    /// The maximum is clamped to zero first, so a list whose keys are all
    /// negative (or an empty list) still appends at `STEP`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "fractional ordering keys are real-valued by contract"
    )]
    pub fn append_after(max: Option<Self>) -> Self {
        let base = max.map_or(0.0, |position| position.0.max(0.0));
        Self(base + Self::STEP)
    }

    /// Returns the key for a slot between two neighbours.
    ///
    /// A missing `prev` means the slot is first (lower bound zero); a
    /// missing `next` means the slot is last, bounded by `prev` plus twice
    /// [`Self::STEP`] so the tail keeps a full default gap.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "fractional ordering keys are real-valued by contract"
    )]
    pub fn between(prev: Option<Self>, next: Option<Self>) -> Self {
        let lower = prev.map_or(0.0, Self::value);
        let upper = next.map_or(lower + 2.0 * Self::STEP, Self::value);
        Self((lower + upper) / 2.0)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

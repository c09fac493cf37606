//! Time values and spans
//!
//! All times are seconds on the media timeline, stored as `f64`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds on the media timeline
pub type Seconds = f64;

/// Longest span handed to a freshly created word when nothing follows it
pub const MAX_WORD_DURATION: Seconds = 0.2;

/// Gap kept between a new word and the item that follows it
pub const WORD_GAP_EPSILON: Seconds = 0.01;

/// A `[start, end]` interval
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSpan {
    /// Inclusive start
    pub start: Seconds,
    /// Inclusive end
    pub end: Seconds,
}

impl TimeSpan {
    /// Create a span without validating the bounds
    #[must_use]
    pub const fn new(start: Seconds, end: Seconds) -> Self {
        Self { start, end }
    }

    /// Length of the span (negative for inverted spans)
    #[must_use]
    pub fn duration(&self) -> Seconds {
        self.end - self.start
    }

    /// Inclusive containment check
    #[must_use]
    pub fn contains(&self, time: Seconds) -> bool {
        self.start <= time && time <= self.end
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Translate both bounds by `delta`
    #[must_use]
    pub fn shifted(&self, delta: Seconds) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

/// Default timing heuristics for newly created words
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingDefaults {
    /// Upper bound for a new word's duration
    pub max_word_duration: Seconds,
    /// Gap left before the next existing item
    pub gap_epsilon: Seconds,
}

impl Default for TimingDefaults {
    fn default() -> Self {
        Self {
            max_word_duration: MAX_WORD_DURATION,
            gap_epsilon: WORD_GAP_EPSILON,
        }
    }
}

//! Core error type for kara-core operations
//!
//! Lookups and structural edits never fail: an id that does not resolve is
//! reported as an empty result. `CoreError` covers the few boundaries where
//! input is actually rejected, such as a document whose tree is malformed
//! or checking a time range the host asked us to enforce.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow`)
//! - Keep messages short enough to surface directly in an editor status bar

use core::fmt;
use thiserror::Error;

/// Main error type for kara-core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A time range with `start > end`
    #[error("Invalid time range: start {start} > end {end}")]
    InvalidTimeRange {
        /// Requested start
        start: f64,
        /// Requested end, earlier than `start`
        end: f64,
    },

    /// A non-finite time value (NaN or infinity)
    #[error("Invalid time value: {0}")]
    InvalidTime(f64),

    /// The document tree breaks one of its structural invariants
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Create a validation error from any displayable message
    pub fn validation<T: fmt::Display>(message: T) -> Self {
        Self::Validation(message.to_string())
    }

    /// Check a `[start, end]` pair for finiteness and ordering
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTime`] for NaN/infinite bounds and
    /// [`CoreError::InvalidTimeRange`] when `start > end`.
    pub fn check_range(start: f64, end: f64) -> Result<()> {
        if !start.is_finite() {
            return Err(Self::InvalidTime(start));
        }
        if !end.is_finite() {
            return Err(Self::InvalidTime(end));
        }
        if start > end {
            return Err(Self::InvalidTimeRange { start, end });
        }
        Ok(())
    }

    /// Check if error is recoverable
    ///
    /// Every core error leaves the current document untouched, so the host
    /// can always keep editing.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidTimeRange { .. } | Self::InvalidTime(_) | Self::Validation(_) => true,
        }
    }

    /// Check if this is a timing-related error
    #[must_use]
    pub const fn is_timing_error(&self) -> bool {
        matches!(self, Self::InvalidTimeRange { .. } | Self::InvalidTime(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_accepts_ordered_and_zero_length() {
        assert!(CoreError::check_range(0.0, 1.0).is_ok());
        assert!(CoreError::check_range(2.5, 2.5).is_ok());
    }

    #[test]
    fn range_check_rejects_inverted() {
        let err = CoreError::check_range(3.0, 1.0).unwrap_err();
        assert_eq!(err, CoreError::InvalidTimeRange { start: 3.0, end: 1.0 });
        assert!(err.is_timing_error());
        assert!(err.is_recoverable());
    }

    #[test]
    fn range_check_rejects_nan() {
        let err = CoreError::check_range(f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTime(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            CoreError::validation("duplicate id").to_string(),
            "Validation error: duplicate id"
        );
        assert_eq!(
            CoreError::InvalidTimeRange { start: 2.0, end: 1.0 }.to_string(),
            "Invalid time range: start 2 > end 1"
        );
    }
}

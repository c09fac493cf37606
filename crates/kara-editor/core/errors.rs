//! Error types for the kara-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from kara-core
//! and adds editor-specific error cases. Follows the same philosophy as core:
//! - Use thiserror for structured error handling (no anyhow)
//! - Missing ids are never errors; commands report them as no-ops
//! - Errors are reserved for checks the host opted into, snapshot
//!   (de)serialization and transport failures

use core::fmt;
use kara_core::CoreError;
use thiserror::Error;

/// Main error type for kara-editor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Errors from kara-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A time range rejected by strict range checking
    #[error("Invalid time range: start {start} > end {end}")]
    InvalidTimeRange {
        /// Requested start
        start: f64,
        /// Requested end, earlier than `start`
        end: f64,
    },

    /// Loaded document breaks a structural invariant
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// Snapshot could not be read or written
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// The playback transport reported a failure
    #[error("Transport error: {message}")]
    TransportError { message: String },
}

impl EditorError {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(message: T) -> Self {
        Self::ValidationError {
            message: message.to_string(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<T: fmt::Display>(message: T) -> Self {
        Self::SerializationError {
            message: message.to_string(),
        }
    }

    /// Create a new transport error
    pub fn transport<T: fmt::Display>(message: T) -> Self {
        Self::TransportError {
            message: message.to_string(),
        }
    }

    /// Check if error is recoverable
    ///
    /// Every editor error leaves the session untouched, so the host can keep
    /// editing after reporting it.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_recoverable(),
            Self::InvalidTimeRange { .. }
            | Self::ValidationError { .. }
            | Self::SerializationError { .. }
            | Self::TransportError { .. } => true,
        }
    }

    /// Whether this error came from a time check
    #[must_use]
    pub const fn is_timing_error(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_timing_error(),
            Self::InvalidTimeRange { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;

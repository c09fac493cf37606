//! Shared utilities for kara-core
//!
//! Holds the crate-wide error type. Kept separate from the model so that
//! analysis and query modules can depend on it without pulling each other in.

pub mod errors;

pub use errors::{CoreError, Result};

//! Core types and structures for the kara-editor
//!
//! This module contains the fundamental building blocks of the editor:
//! - Error types for editor operations
//! - History management for undo/redo
//! - The id-based clipboard
//! - Selection state across lines, words and subwords

pub mod clipboard;
pub mod errors;
pub mod history;
pub mod selection;

// Re-export commonly used types
pub use clipboard::Clipboard;
pub use errors::{EditorError, Result};
pub use history::{HistoryEntry, HistoryStats, UndoManager, UndoStack, UndoStackConfig};
pub use selection::{SelectionState, WordSelectionMode};

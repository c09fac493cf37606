//! History management for undo/redo operations
//!
//! Every recorded entry is a whole-document snapshot taken right before a
//! mutation. Undo swaps the live document with the newest snapshot and parks
//! the live one on the redo stack; redo does the reverse. Recording a new
//! entry invalidates everything that was undone.

use kara_core::AlignmentDocument;
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single snapshot in the history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The document as it was before (undo stack) or after (redo stack)
    pub snapshot: AlignmentDocument,

    /// Description of the command that produced this entry
    pub description: String,

    /// Approximate memory held by this entry
    pub memory_usage: usize,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(snapshot: AlignmentDocument, description: impl Into<String>) -> Self {
        let description = description.into();
        let memory_usage =
            core::mem::size_of::<Self>() + snapshot.memory_usage() + description.len();
        Self {
            snapshot,
            description,
            memory_usage,
        }
    }
}

/// Configuration for undo stack behavior
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UndoStackConfig {
    /// Maximum number of undo entries to keep (0 disables history)
    pub max_entries: usize,

    /// Maximum memory usage in bytes (0 = unlimited)
    pub max_memory: usize,
}

impl Default for UndoStackConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_memory: 64 * 1024 * 1024,
        }
    }
}

/// Undo/redo stack with bounded depth
///
/// The oldest undo entries are dropped first once either limit is exceeded.
/// The redo stack is never trimmed: it can only hold what was undone.
#[derive(Debug)]
pub struct UndoStack {
    /// Configuration for this stack
    config: UndoStackConfig,

    /// Undo history (most recent first)
    undo_stack: VecDeque<HistoryEntry>,

    /// Redo history (most recently undone first)
    redo_stack: VecDeque<HistoryEntry>,

    /// Current memory usage in bytes
    current_memory: usize,
}

impl UndoStack {
    /// Create a new undo stack with default configuration
    pub fn new() -> Self {
        Self::with_config(UndoStackConfig::default())
    }

    /// Create a new undo stack with custom configuration
    pub fn with_config(config: UndoStackConfig) -> Self {
        Self {
            config,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            current_memory: 0,
        }
    }

    /// Push a new entry onto the undo stack
    ///
    /// This clears the redo stack as new operations invalidate
    /// previously undone operations.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.clear_redo_stack();
        self.push_undo(entry);
    }

    /// Push onto the undo stack while keeping the redo stack intact
    ///
    /// Used by redo, which must not discard the remaining redo entries.
    pub fn push_undo(&mut self, entry: HistoryEntry) {
        self.current_memory += entry.memory_usage;
        self.undo_stack.push_front(entry);
        self.enforce_limits();
    }

    /// Pop the most recent entry from the undo stack
    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo_stack.pop_front()?;
        self.current_memory -= entry.memory_usage;
        Some(entry)
    }

    /// Push an entry onto the redo stack
    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.current_memory += entry.memory_usage;
        self.redo_stack.push_front(entry);
    }

    /// Pop an entry from the redo stack
    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo_stack.pop_front()?;
        self.current_memory -= entry.memory_usage;
        Some(entry)
    }

    /// Check if undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo entries available
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo entries available
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get current memory usage in bytes
    #[must_use]
    pub const fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get description of the next undo operation
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.undo_stack
            .front()
            .map(|entry| entry.description.as_str())
    }

    /// Get description of the next redo operation
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redo_stack
            .front()
            .map(|entry| entry.description.as_str())
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &UndoStackConfig {
        &self.config
    }

    /// Replace the configuration, trimming immediately if it shrank
    pub fn set_config(&mut self, config: UndoStackConfig) {
        self.config = config;
        self.enforce_limits();
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_memory = 0;
    }

    /// Clear only the redo stack (called when new operations are performed)
    fn clear_redo_stack(&mut self) {
        for entry in self.redo_stack.drain(..) {
            self.current_memory -= entry.memory_usage;
        }
    }

    /// Enforce memory and count limits
    fn enforce_limits(&mut self) {
        let before = self.undo_stack.len();

        while self.undo_stack.len() > self.config.max_entries {
            if let Some(entry) = self.undo_stack.pop_back() {
                self.current_memory -= entry.memory_usage;
            }
        }

        while self.config.max_memory > 0
            && self.current_memory > self.config.max_memory
            && !self.undo_stack.is_empty()
        {
            if let Some(entry) = self.undo_stack.pop_back() {
                self.current_memory -= entry.memory_usage;
            }
        }

        let dropped = before - self.undo_stack.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.undo_stack.len(), "trimmed undo history");
        }
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo manager coordinating snapshots and the live document
///
/// # Examples
///
/// ```
/// use kara_core::{AlignmentDocument, Line, Subword, Word};
/// use kara_editor::UndoManager;
///
/// let before = AlignmentDocument::new();
/// let mut live = AlignmentDocument::from_lines(vec![Line::new("l1".into(), vec![
///     Word::new("w1".into(), "l1".into(), vec![
///         Subword::new("s1".into(), "w1".into(), "l1".into(), 0.0, 1.0, "la"),
///     ]),
/// ])]);
///
/// let mut history = UndoManager::new();
/// history.record_snapshot(before, "Add line");
///
/// assert!(history.undo(&mut live));
/// assert!(live.is_empty());
/// assert!(history.redo(&mut live));
/// assert_eq!(live.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct UndoManager {
    stack: UndoStack,
}

impl UndoManager {
    /// Create a new undo manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new undo manager with custom configuration
    pub fn with_config(config: UndoStackConfig) -> Self {
        Self {
            stack: UndoStack::with_config(config),
        }
    }

    /// Update the configuration
    pub fn set_config(&mut self, config: UndoStackConfig) {
        self.stack.set_config(config);
    }

    /// Record the pre-mutation document and invalidate redo
    pub fn record_snapshot(&mut self, previous: AlignmentDocument, description: impl Into<String>) {
        self.stack.push(HistoryEntry::new(previous, description));
    }

    /// Restore the newest snapshot into `current`
    ///
    /// Returns `false` and leaves `current` untouched when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: &mut AlignmentDocument) -> bool {
        let Some(entry) = self.stack.pop_undo() else {
            return false;
        };
        let live = core::mem::replace(current, entry.snapshot);
        tracing::debug!(description = %entry.description, "undo");
        self.stack.push_redo(HistoryEntry::new(live, entry.description));
        true
    }

    /// Re-apply the most recently undone snapshot into `current`
    ///
    /// Returns `false` and leaves `current` untouched when there is nothing
    /// to redo.
    pub fn redo(&mut self, current: &mut AlignmentDocument) -> bool {
        let Some(entry) = self.stack.pop_redo() else {
            return false;
        };
        let live = core::mem::replace(current, entry.snapshot);
        tracing::debug!(description = %entry.description, "redo");
        self.stack.push_undo(HistoryEntry::new(live, entry.description));
        true
    }

    /// Check if undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Check if redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Get description of the next undo operation
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.stack.next_undo_description()
    }

    /// Get description of the next redo operation
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.stack.next_redo_description()
    }

    /// Get history statistics
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.stack.undo_count(),
            redo_count: self.stack.redo_count(),
            memory_usage: self.stack.memory_usage(),
        }
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Get reference to the underlying stack
    #[must_use]
    pub const fn stack(&self) -> &UndoStack {
        &self.stack
    }
}

/// Statistics about the history system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    /// Number of operations that can be undone
    pub undo_count: usize,
    /// Number of operations that can be redone
    pub redo_count: usize,
    /// Current memory usage in bytes
    pub memory_usage: usize,
}

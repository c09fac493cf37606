//! Interactive editing layer for karaoke lyrics alignment
//!
//! `kara-editor` builds on `kara-core` to provide everything an authoring UI
//! needs around an alignment document.
//!
//! # Features
//!
//! - **Pure commands**: every edit reads the current document and returns a
//!   new normalized one, or reports that nothing changed
//! - **Undo/redo**: whole-document snapshots with configurable depth
//! - **Clipboard**: id-based copy, cut and paste with re-indenting and
//!   fresh ids for every pasted node
//! - **Selection**: line, word and subword selection sets with upward
//!   expansion
//! - **Sessions**: one [`EditorSession`] per open document, no global state
//! - **Playback**: segment auditioning against a host [`Transport`]
//! - **Persistence**: JSON snapshots (feature `serde`)
//!
//! # Example
//!
//! ```
//! use kara_core::SequentialIdGenerator;
//! use kara_editor::EditorSession;
//!
//! let mut session = EditorSession::new()
//!     .with_id_generator(Box::new(SequentialIdGenerator::new("id")));
//!
//! let line = session.add_line(0.0, 1.0, "hel").unwrap().unwrap().id;
//! let word = session.document().lines()[0].words[0].id.clone();
//! session.add_subword(&line, &word, 1.0, 1.4, "lo").unwrap();
//! assert_eq!(session.document().lines()[0].text(), "hello");
//!
//! // Move the whole line to ten seconds, then take it back
//! session.shift_lines(&[line], 10.0).unwrap();
//! assert_eq!(session.document().lines()[0].start, 10.0);
//! session.undo();
//! assert_eq!(session.document().lines()[0].start, 0.0);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod commands;
pub mod core;
pub mod playback;
pub mod sessions;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod formats;

// Re-export kara-core types as first-class citizens
pub use kara_core::{AlignmentDocument, EntityId, EntityKind, Line, Seconds, Subword, Word};

// Public API exports
pub use commands::{
    AddLineCommand, AddSubwordCommand, AddWordCommand, BatchCommand, CommandOutput,
    DeleteByIdsCommand, DeleteLinesCommand, DeleteSubwordsCommand, DeleteWordsCommand,
    EditorCommand, MergeLineWithNextLineCommand, PasteLinesCommand, PasteWordsCommand,
    SelectionHint, SetLineSingerCommand, ShiftAlignmentCommand, ShiftLinesCommand,
    ShiftSubwordsCommand, ShiftWordsCommand, SplitLineCommand, SplitSubwordCommand,
    UpdateSubwordTextCommand, UpdateSubwordTimesCommand,
};
pub use crate::core::{
    Clipboard, EditorError, HistoryEntry, HistoryStats, Result, SelectionState, UndoManager,
    UndoStack, UndoStackConfig, WordSelectionMode,
};
pub use playback::{seek_backward, seek_forward, PlaybackState, SegmentPlayer, Transport};
pub use sessions::{EditOutcome, EditorSession, SessionConfig, SessionStats};

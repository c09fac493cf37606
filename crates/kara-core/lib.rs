//! # kara-core
//!
//! Timed lyrics alignment model for karaoke authoring. A document is a
//! three-level tree of lines, words and subwords where only subwords carry
//! primary times; everything above is derived.
//!
//! ## Features
//!
//! - **Consistent tree**: [`normalize`] restores ordering, derived spans and
//!   non-emptiness after any raw edit
//! - **Stable ids**: document-wide unique [`EntityId`]s from an injected
//!   [`IdGenerator`]
//! - **Queries**: id and time lookups shared by the editor and UI code
//! - **Linting**: structural and timing checks for loaded documents
//!
//! ## Quick Start
//!
//! ```rust
//! use kara_core::{find_line_by_time, normalize, AlignmentDocument, Line, Subword, Word};
//!
//! let word = Word::new("w1".into(), "l1".into(), vec![
//!     Subword::new("s1".into(), "w1".into(), "l1".into(), 0.0, 0.4, "hel"),
//!     Subword::new("s2".into(), "w1".into(), "l1".into(), 0.4, 0.9, "lo"),
//! ]);
//! let doc = normalize(AlignmentDocument::from_lines(vec![Line::new("l1".into(), vec![word])]));
//!
//! let line = find_line_by_time(&doc, 0.5).unwrap();
//! assert_eq!(line.text(), "hello");
//! assert_eq!((line.start, line.end), (0.0, 0.9));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod model;
pub mod normalize;
pub mod query;
pub mod utils;

#[cfg(feature = "analysis")]
#[cfg_attr(docsrs, doc(cfg(feature = "analysis")))]
pub mod analysis;

pub use model::{
    AlignmentDocument, DocumentStats, EntityId, IdGenerator, Line, Seconds, SequentialIdGenerator,
    SingerTag, Subword, TimeSpan, TimingDefaults, UnusedIds, Word, MAX_WORD_DURATION,
    WORD_GAP_EPSILON,
};
pub use normalize::normalize;
pub use query::{
    find_line, find_line_by_time, find_lines_by_id, find_next_subword_by_time, find_subword,
    find_subwords_by_id, find_word, find_words_by_id, get_new_word_time,
    get_new_word_time_by_subword, is_line_at_time, EntityKind,
};
pub use utils::{CoreError, Result};

#[cfg(feature = "uuid")]
pub use model::UuidGenerator;

#[cfg(feature = "analysis")]
pub use analysis::{lint, validate_structure, LintIssue, LintRule};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

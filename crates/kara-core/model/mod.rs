//! Timed entity model
//!
//! - [`AlignmentDocument`]: root holding lines sorted by start
//! - [`Line`], [`Word`], [`Subword`]: the three nesting levels
//! - [`EntityId`] and [`IdGenerator`]: document-wide unique ids
//! - [`TimeSpan`] and timing constants

pub mod document;
pub mod ids;
pub mod timing;

pub use document::{AlignmentDocument, DocumentStats, Line, SingerTag, Subword, Word};
pub use ids::{EntityId, IdGenerator, SequentialIdGenerator, UnusedIds};
pub use timing::{Seconds, TimeSpan, TimingDefaults, MAX_WORD_DURATION, WORD_GAP_EPSILON};

#[cfg(feature = "uuid")]
pub use ids::UuidGenerator;

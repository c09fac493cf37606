//! The line → word → subword alignment tree
//!
//! Subwords are the only entities with primary times. Word and line spans
//! are derived from their children by [`crate::normalize`], which also keeps
//! every level sorted by start time and prunes empty nodes.

use super::ids::EntityId;
use super::timing::{Seconds, TimeSpan};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which singer performs a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SingerTag {
    /// Main vocal
    Lead,
    /// Backing vocal
    Backing,
    /// Sung together
    Duet,
    /// Host-defined singer slot
    Custom(u8),
}

impl fmt::Display for SingerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Backing => write!(f, "backing"),
            Self::Duet => write!(f, "duet"),
            Self::Custom(slot) => write!(f, "singer-{slot}"),
        }
    }
}

/// Finest editable unit of text, usually a syllable
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subword {
    /// Globally unique id
    pub id: EntityId,
    /// Owning word
    pub word_id: EntityId,
    /// Owning line
    pub line_id: EntityId,
    /// Start time (primary data)
    pub start: Seconds,
    /// End time (primary data)
    pub end: Seconds,
    /// Text sung during this span
    pub text: String,
}

impl Subword {
    /// Create a subword
    pub fn new(
        id: EntityId,
        word_id: EntityId,
        line_id: EntityId,
        start: Seconds,
        end: Seconds,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            word_id,
            line_id,
            start,
            end,
            text: text.into(),
        }
    }

    /// Time span of this subword
    #[must_use]
    pub const fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    /// Length in seconds
    #[must_use]
    pub fn duration(&self) -> Seconds {
        self.end - self.start
    }

    /// Translate by `delta` seconds
    pub fn shift(&mut self, delta: Seconds) {
        self.start += delta;
        self.end += delta;
    }
}

/// A word: an ordered run of subwords
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Word {
    /// Globally unique id
    pub id: EntityId,
    /// Owning line
    pub line_id: EntityId,
    /// Derived start (earliest subword start)
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Seconds,
    /// Derived end (latest subword end)
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Seconds,
    /// Children sorted by start
    pub subwords: Vec<Subword>,
}

impl Word {
    /// Create a word from its subwords
    ///
    /// The span is computed from the children immediately so a freshly built
    /// word is consistent even before normalization.
    #[must_use]
    pub fn new(id: EntityId, line_id: EntityId, subwords: Vec<Subword>) -> Self {
        let mut word = Self {
            id,
            line_id,
            start: 0.0,
            end: 0.0,
            subwords,
        };
        word.recompute_span();
        word
    }

    /// Time span of this word
    #[must_use]
    pub const fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    /// Concatenated subword text
    #[must_use]
    pub fn text(&self) -> String {
        self.subwords.iter().map(|s| s.text.as_str()).collect()
    }

    /// Move this word (and its subwords) under another line
    pub fn set_line_id(&mut self, line_id: &EntityId) {
        self.line_id = line_id.clone();
        for subword in &mut self.subwords {
            subword.line_id = line_id.clone();
        }
    }

    /// Translate every subword by `delta` seconds
    pub fn shift(&mut self, delta: Seconds) {
        for subword in &mut self.subwords {
            subword.shift(delta);
        }
        self.start += delta;
        self.end += delta;
    }

    /// Recompute `start`/`end` from the subwords; returns `false` when empty
    pub fn recompute_span(&mut self) -> bool {
        match span_of(self.subwords.iter().map(Subword::span)) {
            Some(span) => {
                self.start = span.start;
                self.end = span.end;
                true
            }
            None => false,
        }
    }
}

/// A lyric line: an ordered run of words
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    /// Globally unique id
    pub id: EntityId,
    /// Derived start (earliest word start)
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Seconds,
    /// Derived end (latest word end)
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Seconds,
    /// Optional singer assignment
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub singer: Option<SingerTag>,
    /// Children sorted by start
    pub words: Vec<Word>,
}

impl Line {
    /// Create a line from its words, re-parenting them onto `id`
    #[must_use]
    pub fn new(id: EntityId, mut words: Vec<Word>) -> Self {
        for word in &mut words {
            word.set_line_id(&id);
        }
        let mut line = Self {
            id,
            start: 0.0,
            end: 0.0,
            singer: None,
            words,
        };
        line.recompute_span();
        line
    }

    /// Time span of this line
    #[must_use]
    pub const fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    /// Words joined by single spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Translate every word by `delta` seconds
    pub fn shift(&mut self, delta: Seconds) {
        for word in &mut self.words {
            word.shift(delta);
        }
        self.start += delta;
        self.end += delta;
    }

    /// Recompute word spans and then this line's span; returns `false` when
    /// no word has any subword
    pub fn recompute_span(&mut self) -> bool {
        for word in &mut self.words {
            word.recompute_span();
        }
        let spans = self
            .words
            .iter()
            .filter(|w| !w.subwords.is_empty())
            .map(Word::span);
        match span_of(spans) {
            Some(span) => {
                self.start = span.start;
                self.end = span.end;
                true
            }
            None => false,
        }
    }

    /// Iterate over every subword of this line in order
    pub fn subwords(&self) -> impl Iterator<Item = &Subword> {
        self.words.iter().flat_map(|w| w.subwords.iter())
    }
}

/// Smallest span covering all of `spans`
fn span_of(mut spans: impl Iterator<Item = TimeSpan>) -> Option<TimeSpan> {
    let first = spans.next()?;
    Some(spans.fold(first, |acc, span| acc.union(&span)))
}

/// Size summary of a document
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentStats {
    /// Number of lines
    pub lines: usize,
    /// Number of words
    pub words: usize,
    /// Number of subwords
    pub subwords: usize,
    /// Span from the first line start to the last line end
    pub duration: Seconds,
}

/// Root of the alignment tree
///
/// Holds lines sorted by start. Editing code never mutates a live document:
/// it clones, edits the clone, normalizes and swaps.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentDocument {
    lines: Vec<Line>,
}

impl AlignmentDocument {
    /// Create an empty document
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Wrap raw lines without normalizing them
    ///
    /// Use [`crate::normalize`] afterwards unless the lines are known to be
    /// consistent already.
    #[must_use]
    pub const fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Lines in document order
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access for editing a working copy
    pub fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }

    /// Consume the document and return its lines
    #[must_use]
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over every word in document order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|l| l.words.iter())
    }

    /// Iterate over every subword in document order
    pub fn subwords(&self) -> impl Iterator<Item = &Subword> {
        self.lines.iter().flat_map(Line::subwords)
    }

    /// Iterate over every id at every level
    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.lines.iter().flat_map(|line| {
            core::iter::once(&line.id).chain(line.words.iter().flat_map(|word| {
                core::iter::once(&word.id).chain(word.subwords.iter().map(|s| &s.id))
            }))
        })
    }

    /// Count entities at each level
    #[must_use]
    pub fn stats(&self) -> DocumentStats {
        let duration = match (self.lines.first(), self.lines.iter().map(|l| l.end).reduce(f64::max)) {
            (Some(first), Some(last_end)) => last_end - first.start,
            _ => 0.0,
        };
        DocumentStats {
            lines: self.lines.len(),
            words: self.words().count(),
            subwords: self.subwords().count(),
            duration,
        }
    }

    /// Rough heap footprint in bytes, used to bound undo history
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        let line_size = core::mem::size_of::<Line>();
        let word_size = core::mem::size_of::<Word>();
        let subword_size = core::mem::size_of::<Subword>();
        self.lines
            .iter()
            .map(|line| {
                line_size
                    + line.id.as_str().len()
                    + line
                        .words
                        .iter()
                        .map(|word| {
                            word_size
                                + 2 * word.id.as_str().len()
                                + word
                                    .subwords
                                    .iter()
                                    .map(|s| {
                                        subword_size
                                            + s.id.as_str().len()
                                            + s.word_id.as_str().len()
                                            + s.line_id.as_str().len()
                                            + s.text.len()
                                    })
                                    .sum::<usize>()
                        })
                        .sum::<usize>()
            })
            .sum()
    }
}

impl From<Vec<Line>> for AlignmentDocument {
    fn from(lines: Vec<Line>) -> Self {
        Self::from_lines(lines)
    }
}

//! Id lookups over the alignment tree
//!
//! Every lookup returns an explicit absent result (`None` or an empty `Vec`)
//! for ids that do not resolve. Callers treat absence as "do nothing".

use crate::model::{AlignmentDocument, EntityId, Line, Subword, Word};
use ahash::AHashSet;

/// Where a word lives in the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordLocation<'a> {
    /// Index of the owning line
    pub line_index: usize,
    /// Index of the word within that line
    pub word_index: usize,
    /// The word itself
    pub word: &'a Word,
}

/// Where a subword lives in the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubwordLocation<'a> {
    /// Index of the owning line
    pub line_index: usize,
    /// Index of the owning word within that line
    pub word_index: usize,
    /// Index of the subword within that word
    pub subword_index: usize,
    /// The subword itself
    pub subword: &'a Subword,
}

/// Find a line by id
#[must_use]
pub fn find_line<'a>(doc: &'a AlignmentDocument, line_id: &EntityId) -> Option<&'a Line> {
    doc.lines().iter().find(|line| &line.id == line_id)
}

/// Index of a line by id
#[must_use]
pub fn find_line_index(doc: &AlignmentDocument, line_id: &EntityId) -> Option<usize> {
    doc.lines().iter().position(|line| &line.id == line_id)
}

/// Find a word by id together with its position
#[must_use]
pub fn find_word<'a>(doc: &'a AlignmentDocument, word_id: &EntityId) -> Option<WordLocation<'a>> {
    doc.lines()
        .iter()
        .enumerate()
        .find_map(|(line_index, line)| {
            line.words
                .iter()
                .position(|w| &w.id == word_id)
                .map(|word_index| WordLocation {
                    line_index,
                    word_index,
                    word: &line.words[word_index],
                })
        })
}

/// Find a subword by id
#[must_use]
pub fn find_subword<'a>(doc: &'a AlignmentDocument, subword_id: &EntityId) -> Option<&'a Subword> {
    locate_subword(doc, subword_id).map(|loc| loc.subword)
}

/// Find a subword by id together with its position
#[must_use]
pub fn locate_subword<'a>(
    doc: &'a AlignmentDocument,
    subword_id: &EntityId,
) -> Option<SubwordLocation<'a>> {
    for (line_index, line) in doc.lines().iter().enumerate() {
        for (word_index, word) in line.words.iter().enumerate() {
            if let Some(subword_index) = word.subwords.iter().position(|s| &s.id == subword_id) {
                return Some(SubwordLocation {
                    line_index,
                    word_index,
                    subword_index,
                    subword: &word.subwords[subword_index],
                });
            }
        }
    }
    None
}

/// All lines whose id is in `ids`, in document order
///
/// Unknown ids are skipped silently.
#[must_use]
pub fn find_lines_by_id<'a>(doc: &'a AlignmentDocument, ids: &[EntityId]) -> Vec<&'a Line> {
    let wanted: AHashSet<&EntityId> = ids.iter().collect();
    doc.lines()
        .iter()
        .filter(|line| wanted.contains(&line.id))
        .collect()
}

/// All words whose id is in `ids`, in document order
#[must_use]
pub fn find_words_by_id<'a>(doc: &'a AlignmentDocument, ids: &[EntityId]) -> Vec<&'a Word> {
    let wanted: AHashSet<&EntityId> = ids.iter().collect();
    doc.words().filter(|word| wanted.contains(&word.id)).collect()
}

/// All subwords whose id is in `ids`, in document order
#[must_use]
pub fn find_subwords_by_id<'a>(doc: &'a AlignmentDocument, ids: &[EntityId]) -> Vec<&'a Subword> {
    let wanted: AHashSet<&EntityId> = ids.iter().collect();
    doc.subwords().filter(|s| wanted.contains(&s.id)).collect()
}

/// Which level of the tree an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A line id
    Line,
    /// A word id
    Word,
    /// A subword id
    Subword,
}

/// Resolve the level of an arbitrary id
#[must_use]
pub fn entity_kind(doc: &AlignmentDocument, id: &EntityId) -> Option<EntityKind> {
    for line in doc.lines() {
        if &line.id == id {
            return Some(EntityKind::Line);
        }
        for word in &line.words {
            if &word.id == id {
                return Some(EntityKind::Word);
            }
            if word.subwords.iter().any(|s| &s.id == id) {
                return Some(EntityKind::Subword);
            }
        }
    }
    None
}

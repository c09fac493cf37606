//! Normalization engine
//!
//! Restores the document invariants after a raw edit. Three passes run in a
//! fixed order:
//!
//! 1. [`recompute_times`]: word and line spans from their children
//! 2. [`sort_entities`]: lines, words and subwords ascending by start
//! 3. [`prune_empty`]: drop empty-text subwords, then childless words and lines
//!
//! Pruning can shrink a span (an empty subword at the edge of a word) and so
//! change the order of siblings. When the prune pass removed anything the
//! first two passes run once more; pruning never creates new empty nodes, so
//! a second round is always a fixed point.
//!
//! Sorting is stable: entities with equal starts keep their relative order.

use crate::model::{AlignmentDocument, Line};

/// Normalize a document, returning the fixed-up copy
///
/// Pure: the same input always yields the same output.
///
/// # Examples
///
/// ```
/// use kara_core::{normalize, AlignmentDocument, Line, Subword, Word};
///
/// let late = Word::new("w2".into(), "l1".into(), vec![
///     Subword::new("s2".into(), "w2".into(), "l1".into(), 2.0, 3.0, "b"),
/// ]);
/// let early = Word::new("w1".into(), "l1".into(), vec![
///     Subword::new("s1".into(), "w1".into(), "l1".into(), 0.0, 1.0, "a"),
/// ]);
/// let doc = AlignmentDocument::from_lines(vec![Line::new("l1".into(), vec![late, early])]);
///
/// let doc = normalize(doc);
/// assert_eq!(doc.lines()[0].words[0].id.as_str(), "w1");
/// assert_eq!((doc.lines()[0].start, doc.lines()[0].end), (0.0, 3.0));
/// ```
#[must_use]
pub fn normalize(doc: AlignmentDocument) -> AlignmentDocument {
    let mut lines = doc.into_lines();
    recompute_times(&mut lines);
    sort_entities(&mut lines);
    let removed = prune_empty(&mut lines);
    if removed > 0 {
        tracing::trace!(removed, "normalize pruned empty entities");
        recompute_times(&mut lines);
        sort_entities(&mut lines);
    }
    AlignmentDocument::from_lines(lines)
}

/// Recompute word and line spans bottom-up from subword times
///
/// Spans are the smallest interval covering all children, so a container is
/// exactly as long as its children even when they leave gaps or overlap.
/// Empty containers keep their stale span; the prune pass removes them.
pub fn recompute_times(lines: &mut [Line]) {
    for line in lines {
        line.recompute_span();
    }
}

/// Sort every level ascending by start (stable)
pub fn sort_entities(lines: &mut [Line]) {
    for line in lines.iter_mut() {
        for word in &mut line.words {
            word.subwords.sort_by(|a, b| a.start.total_cmp(&b.start));
        }
        line.words.sort_by(|a, b| a.start.total_cmp(&b.start));
    }
    lines.sort_by(|a, b| a.start.total_cmp(&b.start));
}

/// Remove empty-text subwords, childless words and childless lines
///
/// Returns how many entities were removed across all levels.
pub fn prune_empty(lines: &mut Vec<Line>) -> usize {
    let mut removed = 0;
    for line in lines.iter_mut() {
        for word in &mut line.words {
            let before = word.subwords.len();
            word.subwords.retain(|s| !s.text.is_empty());
            removed += before - word.subwords.len();
        }
        let before = line.words.len();
        line.words.retain(|w| !w.subwords.is_empty());
        removed += before - line.words.len();
    }
    let before = lines.len();
    lines.retain(|l| !l.words.is_empty());
    removed + before - lines.len()
}

/// Whether a document is already in normal form
#[must_use]
pub fn is_normalized(doc: &AlignmentDocument) -> bool {
    normalize(doc.clone()) == *doc
}

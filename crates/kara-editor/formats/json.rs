//! JSON snapshots of alignment documents
//!
//! Loading is defensive: hosts may hand-edit snapshots or produce them from
//! older tools. Back-references are rebuilt from the tree shape, derived
//! spans may be omitted, and the result is normalized. Duplicate ids cannot
//! be repaired and are rejected.

use crate::core::{EditorError, Result};
use ahash::AHashSet;
use kara_core::{normalize, AlignmentDocument};
use std::io::{Read, Write};

/// Serialize a document to compact JSON
///
/// # Errors
///
/// Returns [`EditorError::SerializationError`] if encoding fails.
pub fn to_json(doc: &AlignmentDocument) -> Result<String> {
    serde_json::to_string(doc).map_err(EditorError::serialization)
}

/// Serialize a document to indented JSON
///
/// # Errors
///
/// Returns [`EditorError::SerializationError`] if encoding fails.
pub fn to_json_pretty(doc: &AlignmentDocument) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(EditorError::serialization)
}

/// Write a document as indented JSON
///
/// # Errors
///
/// Returns [`EditorError::SerializationError`] if encoding or writing fails.
pub fn to_writer<W: Write>(doc: &AlignmentDocument, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, doc).map_err(EditorError::serialization)
}

/// Load a document from JSON
///
/// # Examples
///
/// ```
/// use kara_editor::formats::from_json;
///
/// let doc = from_json(r#"{"lines": [{"id": "l1", "words": [{"id": "w1", "line_id": "?",
///     "subwords": [{"id": "s1", "word_id": "?", "line_id": "?",
///                   "start": 1.0, "end": 1.5, "text": "hey"}]}]}]}"#).unwrap();
///
/// let line = &doc.lines()[0];
/// assert_eq!((line.start, line.end), (1.0, 1.5));
/// assert_eq!(line.words[0].subwords[0].line_id.as_str(), "l1");
/// ```
///
/// # Errors
///
/// Returns [`EditorError::SerializationError`] for malformed JSON and
/// [`EditorError::ValidationError`] when an id appears twice.
pub fn from_json(input: &str) -> Result<AlignmentDocument> {
    let doc = serde_json::from_str(input).map_err(EditorError::serialization)?;
    prepare(doc)
}

/// Load a document from a JSON reader
///
/// # Errors
///
/// Same as [`from_json`].
pub fn from_reader<R: Read>(reader: R) -> Result<AlignmentDocument> {
    let doc = serde_json::from_reader(reader).map_err(EditorError::serialization)?;
    prepare(doc)
}

/// Repair, normalize and validate a freshly decoded document
fn prepare(mut doc: AlignmentDocument) -> Result<AlignmentDocument> {
    repair_back_references(&mut doc);
    let doc = normalize(doc);
    ensure_unique_ids(&doc)?;
    tracing::debug!(lines = doc.len(), "loaded document snapshot");
    Ok(doc)
}

/// Point every word and subword at the parents it is nested under
fn repair_back_references(doc: &mut AlignmentDocument) {
    for line in doc.lines_mut() {
        let line_id = line.id.clone();
        for word in &mut line.words {
            word.set_line_id(&line_id);
            for subword in &mut word.subwords {
                subword.word_id = word.id.clone();
            }
        }
    }
}

fn ensure_unique_ids(doc: &AlignmentDocument) -> Result<()> {
    let mut seen = AHashSet::new();
    for id in doc.ids() {
        if !seen.insert(id) {
            tracing::warn!(%id, "snapshot rejected: duplicate id");
            return Err(EditorError::validation(format!("duplicate id {id}")));
        }
    }
    Ok(())
}

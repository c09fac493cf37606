//! Paste commands
//!
//! Pasting clones the copied subtrees, re-ids every node and moves them in
//! time so the earliest copied entity starts at the target time. A cut is
//! only completed here: the originals are removed in the same edit that
//! inserts the copies.

use super::{id_set, CommandOutput, EditorCommand};
use kara_core::{
    find_line_by_time, find_lines_by_id, find_words_by_id, AlignmentDocument, EntityId,
    EntityKind, IdGenerator, Line, Seconds, Subword, Word,
};

/// Deep-copy a word under `line_id` with fresh ids, shifted by `indent`
fn reid_word(word: &Word, line_id: &EntityId, ids: &mut dyn IdGenerator, indent: Seconds) -> Word {
    let word_id = ids.next_id();
    let mut subwords = Vec::with_capacity(word.subwords.len());
    for subword in &word.subwords {
        let mut copy = Subword::new(
            ids.next_id(),
            word_id.clone(),
            line_id.clone(),
            subword.start,
            subword.end,
            subword.text.clone(),
        );
        copy.shift(indent);
        subwords.push(copy);
    }
    Word::new(word_id, line_id.clone(), subwords)
}

/// Deep-copy a line with fresh ids, shifted by `indent`
fn reid_line(line: &Line, ids: &mut dyn IdGenerator, indent: Seconds) -> Line {
    let line_id = ids.next_id();
    let mut words = Vec::with_capacity(line.words.len());
    for word in &line.words {
        words.push(reid_word(word, &line_id, ids, indent));
    }
    let mut copy = Line::new(line_id, words);
    copy.singer = line.singer;
    copy
}

/// Earliest start among `starts`
fn earliest(starts: impl Iterator<Item = Seconds>) -> Option<Seconds> {
    starts.min_by(f64::total_cmp)
}

/// Paste copies of lines so the earliest one starts at `target_time`
#[derive(Debug, Clone, PartialEq)]
pub struct PasteLinesCommand {
    /// Where the earliest pasted line starts
    pub target_time: Seconds,
    /// Source lines, looked up in the current document
    pub line_ids: Vec<EntityId>,
    /// Remove the sources after pasting
    pub is_cut: bool,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl PasteLinesCommand {
    /// Create a new paste lines command
    pub fn new(target_time: Seconds, line_ids: Vec<EntityId>, is_cut: bool) -> Self {
        Self {
            target_time,
            line_ids,
            is_cut,
            description: None,
        }
    }

    /// Set a custom description for this command
    #[must_use]
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

impl EditorCommand for PasteLinesCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let sources = find_lines_by_id(document, &self.line_ids);
        let first = earliest(sources.iter().map(|l| l.start))?;
        let indent = self.target_time - first;

        let mut copies = Vec::with_capacity(sources.len());
        for line in &sources {
            copies.push(reid_line(line, ids, indent));
        }
        let select = copies
            .iter()
            .min_by(|a, b| a.start.total_cmp(&b.start))
            .map(|line| line.id.clone());

        let mut doc = document.clone();
        let lines = doc.lines_mut();
        if self.is_cut {
            let originals = id_set(&self.line_ids);
            lines.retain(|l| !originals.contains(&l.id));
        }
        lines.extend(copies);

        let output = CommandOutput::normalized(doc);
        Some(match select {
            Some(id) => output.with_select(EntityKind::Line, id),
            None => output,
        })
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(if self.is_cut {
            "Move lines"
        } else {
            "Paste lines"
        })
    }
}

/// Paste copies of words into the line playing at `target_time`
///
/// Nothing happens when no line covers the target time.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteWordsCommand {
    /// Time inside the receiving line; the earliest word starts here
    pub target_time: Seconds,
    /// Source words, possibly from several lines
    pub word_ids: Vec<EntityId>,
    /// Remove the sources after pasting
    pub is_cut: bool,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl PasteWordsCommand {
    /// Create a new paste words command
    pub fn new(target_time: Seconds, word_ids: Vec<EntityId>, is_cut: bool) -> Self {
        Self {
            target_time,
            word_ids,
            is_cut,
            description: None,
        }
    }

    /// Set a custom description for this command
    #[must_use]
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

impl EditorCommand for PasteWordsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let target_id = find_line_by_time(document, self.target_time)?.id.clone();
        let sources = find_words_by_id(document, &self.word_ids);
        let first = earliest(sources.iter().map(|w| w.start))?;
        let indent = self.target_time - first;

        let mut copies = Vec::with_capacity(sources.len());
        for word in &sources {
            copies.push(reid_word(word, &target_id, ids, indent));
        }
        let select = copies
            .iter()
            .min_by(|a, b| a.start.total_cmp(&b.start))
            .map(|word| word.id.clone());

        let mut doc = document.clone();
        if self.is_cut {
            let originals = id_set(&self.word_ids);
            for line in doc.lines_mut() {
                line.words.retain(|w| !originals.contains(&w.id));
            }
        }
        // Removing words never removes lines before normalization
        let target = doc.lines_mut().iter_mut().find(|l| l.id == target_id)?;
        target.words.extend(copies);

        let output = CommandOutput::normalized(doc);
        Some(match select {
            Some(id) => output.with_select(EntityKind::Word, id),
            None => output,
        })
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(if self.is_cut {
            "Move words"
        } else {
            "Paste words"
        })
    }
}

//! Subword-level commands
//!
//! Subwords carry the only primary times in the document, so most timing
//! edits end up here and cascade upward through normalization.

use super::{check_delta, check_range, id_set, is_effective_delta, CommandOutput, EditorCommand};
use crate::core::Result;
use kara_core::query::{find_word, locate_subword};
use kara_core::{AlignmentDocument, EntityId, EntityKind, IdGenerator, Seconds, Subword};

/// Append a subword to a word
///
/// The word must belong to the given line; otherwise nothing happens.
#[derive(Debug, Clone, PartialEq)]
pub struct AddSubwordCommand {
    /// Line that must own `word_id`
    pub line_id: EntityId,
    /// Word receiving the subword
    pub word_id: EntityId,
    /// Subword start
    pub start: Seconds,
    /// Subword end
    pub end: Seconds,
    /// Subword text
    pub text: String,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl AddSubwordCommand {
    /// Create a new add subword command
    pub fn new(
        line_id: EntityId,
        word_id: EntityId,
        start: Seconds,
        end: Seconds,
        text: impl Into<String>,
    ) -> Self {
        Self {
            line_id,
            word_id,
            start,
            end,
            text: text.into(),
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

impl EditorCommand for AddSubwordCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let location = find_word(document, &self.word_id)?;
        if location.word.line_id != self.line_id || self.text.is_empty() {
            return None;
        }

        let subword_id = ids.next_id();
        let subword = Subword::new(
            subword_id.clone(),
            self.word_id.clone(),
            self.line_id.clone(),
            self.start,
            self.end,
            self.text.clone(),
        );

        let mut doc = document.clone();
        doc.lines_mut()[location.line_index].words[location.word_index]
            .subwords
            .push(subword);
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Subword, subword_id))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Add subword")
    }

    fn check_ranges(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}

/// Set the primary times of one subword
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSubwordTimesCommand {
    /// Subword to retime
    pub subword_id: EntityId,
    /// New start
    pub start: Seconds,
    /// New end
    pub end: Seconds,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl UpdateSubwordTimesCommand {
    /// Create a new retime command
    pub fn new(subword_id: EntityId, start: Seconds, end: Seconds) -> Self {
        Self {
            subword_id,
            start,
            end,
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

impl EditorCommand for UpdateSubwordTimesCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let location = locate_subword(document, &self.subword_id)?;
        if location.subword.start == self.start && location.subword.end == self.end {
            return None;
        }

        let mut doc = document.clone();
        let subword = &mut doc.lines_mut()[location.line_index].words[location.word_index]
            .subwords[location.subword_index];
        subword.start = self.start;
        subword.end = self.end;
        Some(
            CommandOutput::normalized(doc)
                .with_select(EntityKind::Subword, self.subword_id.clone()),
        )
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Retime subword")
    }

    fn check_ranges(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}

/// Replace the text of one subword
///
/// The document is not normalized: clearing the text leaves the subword in
/// place until the next structural edit prunes it, so the author can type a
/// replacement without losing the timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSubwordTextCommand {
    /// Subword to retext
    pub subword_id: EntityId,
    /// Replacement text; empty text is kept until the next normalizing edit
    pub text: String,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl UpdateSubwordTextCommand {
    /// Create a new text update command
    pub fn new(subword_id: EntityId, text: impl Into<String>) -> Self {
        Self {
            subword_id,
            text: text.into(),
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

impl EditorCommand for UpdateSubwordTextCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let location = locate_subword(document, &self.subword_id)?;
        if location.subword.text == self.text {
            return None;
        }

        let mut doc = document.clone();
        doc.lines_mut()[location.line_index].words[location.word_index].subwords
            [location.subword_index]
            .text
            .clone_from(&self.text);
        Some(CommandOutput::new(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Edit subword text")
    }
}

/// Delete subwords; words and lines left empty are pruned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSubwordsCommand {
    /// Subwords to remove
    pub subword_ids: Vec<EntityId>,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl DeleteSubwordsCommand {
    /// Create a new delete subwords command
    pub fn new(subword_ids: Vec<EntityId>) -> Self {
        Self {
            subword_ids,
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

impl EditorCommand for DeleteSubwordsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.subword_ids);
        if !document.subwords().any(|s| targets.contains(&s.id)) {
            return None;
        }

        let mut doc = document.clone();
        for word in doc.lines_mut().iter_mut().flat_map(|l| l.words.iter_mut()) {
            word.subwords.retain(|s| !targets.contains(&s.id));
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Delete subwords")
    }
}

/// Translate the given subwords
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSubwordsCommand {
    /// Subwords to move
    pub subword_ids: Vec<EntityId>,
    /// Offset in seconds
    pub delta: Seconds,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl ShiftSubwordsCommand {
    /// Create a new shift subwords command
    pub fn new(subword_ids: Vec<EntityId>, delta: Seconds) -> Self {
        Self {
            subword_ids,
            delta,
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

impl EditorCommand for ShiftSubwordsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.subword_ids);
        if !is_effective_delta(self.delta) || !document.subwords().any(|s| targets.contains(&s.id))
        {
            return None;
        }

        let mut doc = document.clone();
        for subword in doc
            .lines_mut()
            .iter_mut()
            .flat_map(|l| l.words.iter_mut())
            .flat_map(|w| w.subwords.iter_mut())
            .filter(|s| targets.contains(&s.id))
        {
            subword.shift(self.delta);
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Shift subwords")
    }

    fn check_ranges(&self) -> Result<()> {
        check_delta(self.delta)
    }
}

/// Split a subword in two at a character index
///
/// The first part keeps the id; the second gets a fresh one. Time is divided
/// in proportion to the number of characters on each side. Indices at either
/// edge of the text (or past it) change nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSubwordCommand {
    /// Subword to split
    pub subword_id: EntityId,
    /// Character (not byte) index where the tail begins
    pub char_index: usize,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl SplitSubwordCommand {
    /// Create a new split subword command
    pub fn new(subword_id: EntityId, char_index: usize) -> Self {
        Self {
            subword_id,
            char_index,
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

impl EditorCommand for SplitSubwordCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let location = locate_subword(document, &self.subword_id)?;
        let original = location.subword;
        let chars = original.text.chars().count();
        if self.char_index == 0 || self.char_index >= chars {
            return None;
        }
        let byte_index = original
            .text
            .char_indices()
            .nth(self.char_index)
            .map(|(i, _)| i)?;

        let ratio = self.char_index as f64 / chars as f64;
        let split_at = original.start + original.duration() * ratio;
        let tail_id = ids.next_id();
        let tail = Subword::new(
            tail_id.clone(),
            original.word_id.clone(),
            original.line_id.clone(),
            split_at,
            original.end,
            &original.text[byte_index..],
        );

        let mut doc = document.clone();
        let subwords = &mut doc.lines_mut()[location.line_index].words[location.word_index].subwords;
        let head = &mut subwords[location.subword_index];
        head.text.truncate(byte_index);
        head.end = split_at;
        subwords.insert(location.subword_index + 1, tail);
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Subword, tail_id))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Split subword")
    }
}

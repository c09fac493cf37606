//! Line-level commands
//!
//! Creating, deleting, splitting, merging, shifting lines and assigning
//! singers.

use super::{check_delta, check_range, id_set, is_effective_delta, CommandOutput, EditorCommand};
use crate::core::Result;
use kara_core::query::{find_line_index, find_word};
use kara_core::{
    AlignmentDocument, EntityId, EntityKind, IdGenerator, Line, Seconds, SingerTag, Subword, Word,
};

/// Add a line holding a single word with a single subword
///
/// Lines may share a span with existing lines; normalization places the new
/// line after earlier lines with the same start.
#[derive(Debug, Clone, PartialEq)]
pub struct AddLineCommand {
    /// Start of the new line
    pub start: Seconds,
    /// End of the new line
    pub end: Seconds,
    /// Text of its single subword
    pub text: String,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl AddLineCommand {
    /// Create a new add line command
    pub fn new(start: Seconds, end: Seconds, text: impl Into<String>) -> Self {
        Self {
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

impl EditorCommand for AddLineCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        // An empty subword would be pruned straight away
        if self.text.is_empty() {
            return None;
        }

        let line_id = ids.next_id();
        let word_id = ids.next_id();
        let subword = Subword::new(
            ids.next_id(),
            word_id.clone(),
            line_id.clone(),
            self.start,
            self.end,
            self.text.clone(),
        );
        let word = Word::new(word_id, line_id.clone(), vec![subword]);

        let mut doc = document.clone();
        doc.lines_mut().push(Line::new(line_id.clone(), vec![word]));
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Line, line_id))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Add line")
    }

    fn check_ranges(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}

/// Delete whole lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteLinesCommand {
    /// Lines to remove
    pub line_ids: Vec<EntityId>,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl DeleteLinesCommand {
    /// Create a new delete lines command
    pub fn new(line_ids: Vec<EntityId>) -> Self {
        Self {
            line_ids,
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

impl EditorCommand for DeleteLinesCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.line_ids);
        if !document.lines().iter().any(|l| targets.contains(&l.id)) {
            return None;
        }

        let mut doc = document.clone();
        doc.lines_mut().retain(|l| !targets.contains(&l.id));
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Delete lines")
    }
}

/// Split a line in two, starting the second line at the given word
///
/// Both halves get fresh line ids and inherit the singer; word and subword
/// ids are kept. Nothing happens when the word is the first of its line,
/// since the first half would be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLineCommand {
    /// First word of the new second line
    pub word_id: EntityId,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl SplitLineCommand {
    /// Create a new split line command
    pub fn new(word_id: EntityId) -> Self {
        Self {
            word_id,
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

impl EditorCommand for SplitLineCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let location = find_word(document, &self.word_id)?;
        let line = &document.lines()[location.line_index];
        if line.words.len() < 2 || location.word_index == 0 {
            return None;
        }

        let mut doc = document.clone();
        let lines = doc.lines_mut();
        let original = lines.remove(location.line_index);
        let singer = original.singer;
        let mut head_words = original.words;
        let tail_words = head_words.split_off(location.word_index);

        let mut head = Line::new(ids.next_id(), head_words);
        head.singer = singer;
        let tail_id = ids.next_id();
        let mut tail = Line::new(tail_id.clone(), tail_words);
        tail.singer = singer;

        lines.insert(location.line_index, tail);
        lines.insert(location.line_index, head);
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Line, tail_id))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Split line")
    }
}

/// Move every word of a line onto the line that follows it
///
/// "Next" is by array position in the normalized document. The merged line
/// keeps the next line's id and singer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeLineWithNextLineCommand {
    /// Line that absorbs the words of the line after it
    pub line_id: EntityId,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl MergeLineWithNextLineCommand {
    /// Create a new merge command
    pub fn new(line_id: EntityId) -> Self {
        Self {
            line_id,
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

impl EditorCommand for MergeLineWithNextLineCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let index = find_line_index(document, &self.line_id)?;
        if index + 1 >= document.len() {
            return None;
        }

        let mut doc = document.clone();
        let lines = doc.lines_mut();
        let merged = lines.remove(index);
        let next = &mut lines[index];
        let target = next.id.clone();
        for mut word in merged.words {
            word.set_line_id(&target);
            next.words.push(word);
        }
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Line, target))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Merge lines")
    }
}

/// Translate the subwords of the given lines
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftLinesCommand {
    /// Lines to move
    pub line_ids: Vec<EntityId>,
    /// Offset in seconds
    pub delta: Seconds,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl ShiftLinesCommand {
    /// Create a new shift lines command
    pub fn new(line_ids: Vec<EntityId>, delta: Seconds) -> Self {
        Self {
            line_ids,
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

impl EditorCommand for ShiftLinesCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.line_ids);
        if !is_effective_delta(self.delta)
            || !document.lines().iter().any(|l| targets.contains(&l.id))
        {
            return None;
        }

        let mut doc = document.clone();
        for line in doc.lines_mut() {
            if targets.contains(&line.id) {
                line.shift(self.delta);
            }
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Shift lines")
    }

    fn check_ranges(&self) -> Result<()> {
        check_delta(self.delta)
    }
}

/// Assign (or clear) the singer of the given lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLineSingerCommand {
    /// Lines to tag
    pub line_ids: Vec<EntityId>,
    /// New singer, or `None` to clear
    pub singer: Option<SingerTag>,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl SetLineSingerCommand {
    /// Create a new singer assignment command
    pub fn new(line_ids: Vec<EntityId>, singer: Option<SingerTag>) -> Self {
        Self {
            line_ids,
            singer,
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

impl EditorCommand for SetLineSingerCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.line_ids);
        let changes = |l: &Line| targets.contains(&l.id) && l.singer != self.singer;
        if !document.lines().iter().any(changes) {
            return None;
        }

        let mut doc = document.clone();
        for line in doc.lines_mut() {
            if targets.contains(&line.id) {
                line.singer = self.singer;
            }
        }
        // Singers do not affect times or order
        Some(CommandOutput::new(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Set singer")
    }
}

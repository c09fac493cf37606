//! Word-level commands

use super::{check_delta, check_range, id_set, is_effective_delta, CommandOutput, EditorCommand};
use crate::core::Result;
use kara_core::query::find_line_index;
use kara_core::{AlignmentDocument, EntityId, EntityKind, IdGenerator, Seconds, Subword, Word};

/// Append a single-subword word to a line
#[derive(Debug, Clone, PartialEq)]
pub struct AddWordCommand {
    /// Line receiving the word
    pub line_id: EntityId,
    /// Word start
    pub start: Seconds,
    /// Word end
    pub end: Seconds,
    /// Text of its single subword
    pub text: String,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl AddWordCommand {
    /// Create a new add word command
    pub fn new(line_id: EntityId, start: Seconds, end: Seconds, text: impl Into<String>) -> Self {
        Self {
            line_id,
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

impl EditorCommand for AddWordCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let index = find_line_index(document, &self.line_id)?;
        if self.text.is_empty() {
            return None;
        }

        let word_id = ids.next_id();
        let subword = Subword::new(
            ids.next_id(),
            word_id.clone(),
            self.line_id.clone(),
            self.start,
            self.end,
            self.text.clone(),
        );

        let mut doc = document.clone();
        doc.lines_mut()[index]
            .words
            .push(Word::new(word_id.clone(), self.line_id.clone(), vec![subword]));
        Some(CommandOutput::normalized(doc).with_select(EntityKind::Word, word_id))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Add word")
    }

    fn check_ranges(&self) -> Result<()> {
        check_range(self.start, self.end)
    }
}

/// Delete words wherever they live; lines left empty are pruned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWordsCommand {
    /// Words to remove
    pub word_ids: Vec<EntityId>,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl DeleteWordsCommand {
    /// Create a new delete words command
    pub fn new(word_ids: Vec<EntityId>) -> Self {
        Self {
            word_ids,
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

impl EditorCommand for DeleteWordsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.word_ids);
        if !document.words().any(|w| targets.contains(&w.id)) {
            return None;
        }

        let mut doc = document.clone();
        for line in doc.lines_mut() {
            line.words.retain(|w| !targets.contains(&w.id));
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Delete words")
    }
}

/// Translate the subwords of the given words
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftWordsCommand {
    /// Words to move
    pub word_ids: Vec<EntityId>,
    /// Offset in seconds
    pub delta: Seconds,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl ShiftWordsCommand {
    /// Create a new shift words command
    pub fn new(word_ids: Vec<EntityId>, delta: Seconds) -> Self {
        Self {
            word_ids,
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

impl EditorCommand for ShiftWordsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.word_ids);
        if !is_effective_delta(self.delta) || !document.words().any(|w| targets.contains(&w.id)) {
            return None;
        }

        let mut doc = document.clone();
        for word in doc
            .lines_mut()
            .iter_mut()
            .flat_map(|l| l.words.iter_mut())
            .filter(|w| targets.contains(&w.id))
        {
            word.shift(self.delta);
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Shift words")
    }

    fn check_ranges(&self) -> Result<()> {
        check_delta(self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{ids, line_ids, sample_document};

    #[test]
    fn add_word_appends_and_sorts() {
        let output = AddWordCommand::new("l1".into(), 0.5, 0.7, "mid")
            .execute(&sample_document(), &mut ids())
            .unwrap();
        let line = &output.document.lines()[0];
        let words: Vec<_> = line.words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(words, vec!["w1", "n-1", "w2"]);
        assert_eq!(line.words[1].subwords[0].line_id.as_str(), "l1");
        assert_eq!(output.select.map(|h| h.kind), Some(EntityKind::Word));
    }

    #[test]
    fn add_word_extends_line_span() {
        let doc = AddWordCommand::new("l2".into(), 4.0, 5.0, "more")
            .execute(&sample_document(), &mut ids())
            .unwrap()
            .document;
        assert_eq!((doc.lines()[1].start, doc.lines()[1].end), (3.0, 5.0));
    }

    #[test]
    fn add_word_to_missing_line_is_no_op() {
        assert!(AddWordCommand::new("ghost".into(), 0.0, 1.0, "x")
            .execute(&sample_document(), &mut ids())
            .is_none());
    }

    #[test]
    fn delete_last_word_prunes_line() {
        let doc = DeleteWordsCommand::new(vec!["w3".into()])
            .execute(&sample_document(), &mut ids())
            .unwrap()
            .document;
        assert_eq!(line_ids(&doc), vec!["l1"]);
    }

    #[test]
    fn delete_word_rederives_line() {
        let doc = DeleteWordsCommand::new(vec!["w1".into()])
            .execute(&sample_document(), &mut ids())
            .unwrap()
            .document;
        assert_eq!((doc.lines()[0].start, doc.lines()[0].end), (1.0, 2.0));
    }

    #[test]
    fn shift_words_reorders_within_line() {
        let doc = ShiftWordsCommand::new(vec!["w1".into()], 1.5)
            .execute(&sample_document(), &mut ids())
            .unwrap()
            .document;
        let line = &doc.lines()[0];
        assert_eq!(line.words[0].id.as_str(), "w2");
        assert_eq!(line.words[1].start, 1.5);
        assert_eq!((line.start, line.end), (1.0, 2.5));
    }
}

//! Commands spanning every level of the document

use super::{check_delta, id_set, is_effective_delta, CommandOutput, EditorCommand};
use crate::core::Result;
use kara_core::{AlignmentDocument, EntityId, IdGenerator, Seconds};

/// Delete any listed entity, whatever its level
///
/// Used for "delete selection" where lines, words and subwords may be mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteByIdsCommand {
    /// Ids at any level; unknown ids are ignored
    pub ids: Vec<EntityId>,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl DeleteByIdsCommand {
    /// Create a new delete command
    pub fn new(ids: Vec<EntityId>) -> Self {
        Self {
            ids,
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

impl EditorCommand for DeleteByIdsCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let targets = id_set(&self.ids);
        if !document.ids().any(|id| targets.contains(id)) {
            return None;
        }

        let mut doc = document.clone();
        let lines = doc.lines_mut();
        lines.retain(|l| !targets.contains(&l.id));
        for line in lines.iter_mut() {
            line.words.retain(|w| !targets.contains(&w.id));
            for word in &mut line.words {
                word.subwords.retain(|s| !targets.contains(&s.id));
            }
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Delete")
    }
}

/// Translate the whole document
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftAlignmentCommand {
    /// Seconds added to every subword; may be negative
    pub delta: Seconds,
    /// Overrides the default undo description
    pub description: Option<String>,
}

impl ShiftAlignmentCommand {
    /// Create a new global shift command
    pub const fn new(delta: Seconds) -> Self {
        Self {
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

impl EditorCommand for ShiftAlignmentCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        _ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        if !is_effective_delta(self.delta) || document.is_empty() {
            return None;
        }

        let mut doc = document.clone();
        for line in doc.lines_mut() {
            line.shift(self.delta);
        }
        Some(CommandOutput::normalized(doc))
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("Shift alignment")
    }

    fn check_ranges(&self) -> Result<()> {
        check_delta(self.delta)
    }
}

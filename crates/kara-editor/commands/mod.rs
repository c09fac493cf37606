//! Command system for alignment edits
//!
//! Every command is a pure transform: it reads the current document, never
//! mutates it, and either returns a new normalized document or `None` when
//! the edit would change nothing (an id that does not resolve, a split with
//! nothing to split, a zero shift). Sessions record history only for
//! commands that returned a document.
//!
//! Commands that create entities mint ids from the [`IdGenerator`] they are
//! handed and report the entity the host should select next.

pub mod document_commands;
pub mod line_commands;
pub mod paste_commands;
pub mod subword_commands;
pub mod word_commands;

use crate::core::{EditorError, Result};
use ahash::AHashSet;
use kara_core::{normalize, AlignmentDocument, CoreError, EntityId, EntityKind, IdGenerator};

pub use document_commands::*;
pub use line_commands::*;
pub use paste_commands::*;
pub use subword_commands::*;
pub use word_commands::*;

/// Entity a command suggests selecting after it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHint {
    /// Level of the entity
    pub kind: EntityKind,
    /// Id of the entity
    pub id: EntityId,
}

impl SelectionHint {
    /// Create a hint
    pub const fn new(kind: EntityKind, id: EntityId) -> Self {
        Self { kind, id }
    }
}

/// Result of a command that changed the document
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The new document
    pub document: AlignmentDocument,

    /// Entity to select next, if the command touched one in particular
    pub select: Option<SelectionHint>,
}

impl CommandOutput {
    /// Wrap a document that is already in its final shape
    pub const fn new(document: AlignmentDocument) -> Self {
        Self {
            document,
            select: None,
        }
    }

    /// Normalize `document` and wrap it
    pub fn normalized(document: AlignmentDocument) -> Self {
        Self::new(normalize(document))
    }

    /// Attach a selection hint
    #[must_use]
    pub fn with_select(mut self, kind: EntityKind, id: EntityId) -> Self {
        self.select = Some(SelectionHint::new(kind, id));
        self
    }
}

/// Trait for commands that edit an alignment document
///
/// # Examples
///
/// Creating a custom command:
///
/// ```
/// use kara_core::{AlignmentDocument, IdGenerator};
/// use kara_editor::{CommandOutput, EditorCommand};
///
/// #[derive(Debug)]
/// struct UppercaseCommand;
///
/// impl EditorCommand for UppercaseCommand {
///     fn execute(
///         &self,
///         document: &AlignmentDocument,
///         _ids: &mut dyn IdGenerator,
///     ) -> Option<CommandOutput> {
///         if document.is_empty() {
///             return None;
///         }
///         let mut doc = document.clone();
///         for line in doc.lines_mut() {
///             for word in &mut line.words {
///                 for subword in &mut word.subwords {
///                     subword.text = subword.text.to_uppercase();
///                 }
///             }
///         }
///         Some(CommandOutput::new(doc))
///     }
///
///     fn description(&self) -> &str {
///         "Uppercase lyrics"
///     }
/// }
/// ```
pub trait EditorCommand: core::fmt::Debug + Send + Sync {
    /// Apply the command to `document`
    ///
    /// Returns `None` when the command has nothing to do. Implementations
    /// must return a normalized document unless they document otherwise.
    fn execute(&self, document: &AlignmentDocument, ids: &mut dyn IdGenerator)
        -> Option<CommandOutput>;

    /// Get a human-readable description of the command
    fn description(&self) -> &str;

    /// Check the time ranges this command would write
    ///
    /// Only called when the session enforces strict ranges; the default
    /// accepts everything.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTimeRange`] or a timing
    /// [`EditorError::Core`] error for ranges the command must not write.
    fn check_ranges(&self) -> Result<()> {
        Ok(())
    }
}

/// Several commands applied in order as one undoable edit
///
/// Each command sees the output of the previous one. The batch is a no-op
/// only when every command in it is.
#[derive(Debug)]
pub struct BatchCommand {
    /// Commands to execute in order
    pub commands: Vec<Box<dyn EditorCommand>>,
    /// Description of the batch operation
    pub description: String,
}

impl BatchCommand {
    /// Create a new batch command
    ///
    /// # Examples
    ///
    /// ```
    /// use kara_core::{AlignmentDocument, SequentialIdGenerator};
    /// use kara_editor::{AddLineCommand, BatchCommand, EditorCommand, ShiftAlignmentCommand};
    ///
    /// let batch = BatchCommand::new("Add and shift".to_string())
    ///     .add_command(Box::new(AddLineCommand::new(0.0, 1.0, "la")))
    ///     .add_command(Box::new(ShiftAlignmentCommand::new(2.0)));
    ///
    /// let mut ids = SequentialIdGenerator::new("t");
    /// let output = batch.execute(&AlignmentDocument::new(), &mut ids).unwrap();
    /// assert_eq!(output.document.lines()[0].start, 2.0);
    /// ```
    pub fn new(description: String) -> Self {
        Self {
            commands: Vec::new(),
            description,
        }
    }

    /// Add a command to the batch
    #[must_use]
    pub fn add_command(mut self, command: Box<dyn EditorCommand>) -> Self {
        self.commands.push(command);
        self
    }

    /// Add multiple commands to the batch
    #[must_use]
    pub fn add_commands(mut self, commands: Vec<Box<dyn EditorCommand>>) -> Self {
        self.commands.extend(commands);
        self
    }
}

impl EditorCommand for BatchCommand {
    fn execute(
        &self,
        document: &AlignmentDocument,
        ids: &mut dyn IdGenerator,
    ) -> Option<CommandOutput> {
        let mut current: Option<CommandOutput> = None;

        for command in &self.commands {
            let base = current.as_ref().map_or(document, |output| &output.document);
            let Some(mut output) = command.execute(base, ids) else {
                continue;
            };
            if output.select.is_none() {
                output.select = current.and_then(|previous| previous.select);
            }
            current = Some(output);
        }

        current
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check_ranges(&self) -> Result<()> {
        self.commands.iter().try_for_each(|command| command.check_ranges())
    }
}

/// Reject NaN/infinite bounds and `start > end`
pub(crate) fn check_range(start: f64, end: f64) -> Result<()> {
    CoreError::check_range(start, end).map_err(|err| match err {
        CoreError::InvalidTimeRange { start, end } => EditorError::InvalidTimeRange { start, end },
        other => EditorError::Core(other),
    })
}

/// Reject a non-finite shift
pub(crate) fn check_delta(delta: f64) -> Result<()> {
    if delta.is_finite() {
        Ok(())
    } else {
        Err(EditorError::Core(CoreError::InvalidTime(delta)))
    }
}

/// Whether a shift would move anything
pub(crate) fn is_effective_delta(delta: f64) -> bool {
    delta.is_finite() && delta != 0.0
}

/// Borrowed id set for membership tests
pub(crate) fn id_set(ids: &[EntityId]) -> AHashSet<&EntityId> {
    ids.iter().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use kara_core::{Line, SequentialIdGenerator, Subword, Word};

    /// `l1 [0,2]` = "one" "two", `l2 [3,4]` = "three" (two subwords)
    pub(crate) fn sample_document() -> AlignmentDocument {
        let sub = |id: &str, word: &str, line: &str, start: f64, end: f64, text: &str| {
            Subword::new(id.into(), word.into(), line.into(), start, end, text)
        };
        let l1 = Line::new(
            "l1".into(),
            vec![
                Word::new("w1".into(), "l1".into(), vec![sub("s1", "w1", "l1", 0.0, 1.0, "one")]),
                Word::new("w2".into(), "l1".into(), vec![sub("s2", "w2", "l1", 1.0, 2.0, "two")]),
            ],
        );
        let l2 = Line::new(
            "l2".into(),
            vec![Word::new(
                "w3".into(),
                "l2".into(),
                vec![
                    sub("s3", "w3", "l2", 3.0, 3.5, "thr"),
                    sub("s4", "w3", "l2", 3.5, 4.0, "ee"),
                ],
            )],
        );
        AlignmentDocument::from_lines(vec![l1, l2])
    }

    pub(crate) fn ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new("n")
    }

    pub(crate) fn line_ids(doc: &AlignmentDocument) -> Vec<&str> {
        doc.lines().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn batch_chains_outputs() {
        let batch = BatchCommand::new("Shift twice".to_string())
            .add_command(Box::new(ShiftAlignmentCommand::new(1.0)))
            .add_command(Box::new(ShiftAlignmentCommand::new(0.5)));
        let output = batch.execute(&sample_document(), &mut ids()).unwrap();
        assert_eq!(output.document.lines()[0].start, 1.5);
        assert_eq!(batch.description(), "Shift twice");
    }

    #[test]
    fn batch_of_no_ops_is_no_op() {
        let batch = BatchCommand::new("Nothing".to_string())
            .add_command(Box::new(DeleteLinesCommand::new(vec!["missing".into()])))
            .add_command(Box::new(ShiftAlignmentCommand::new(0.0)));
        assert!(batch.execute(&sample_document(), &mut ids()).is_none());
    }

    #[test]
    fn batch_keeps_last_selection_hint() {
        let batch = BatchCommand::new("Add then shift".to_string())
            .add_command(Box::new(AddLineCommand::new(10.0, 11.0, "new")))
            .add_command(Box::new(ShiftAlignmentCommand::new(1.0)));
        let output = batch.execute(&sample_document(), &mut ids()).unwrap();
        let hint = output.select.unwrap();
        assert_eq!(hint.kind, EntityKind::Line);
        assert_eq!(hint.id.as_str(), "n-1");
    }

    #[test]
    fn batch_checks_every_range() {
        let batch = BatchCommand::new("Bad".to_string())
            .add_command(Box::new(AddLineCommand::new(0.0, 1.0, "ok")))
            .add_command(Box::new(AddLineCommand::new(2.0, 1.0, "bad")));
        assert_eq!(
            batch.check_ranges(),
            Err(EditorError::InvalidTimeRange {
                start: 2.0,
                end: 1.0
            })
        );
    }

    #[test]
    fn range_helpers() {
        assert!(check_range(1.0, 1.0).is_ok());
        assert!(matches!(
            check_range(f64::NAN, 1.0),
            Err(EditorError::Core(CoreError::InvalidTime(_)))
        ));
        assert!(check_delta(f64::INFINITY).is_err());
        assert!(!is_effective_delta(0.0));
        assert!(!is_effective_delta(f64::NAN));
        assert!(is_effective_delta(-0.25));
    }
}

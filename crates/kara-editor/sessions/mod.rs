//! Editing sessions
//!
//! An [`EditorSession`] owns everything one open song needs: the current
//! document, its undo/redo history, the selection, the clipboard and the id
//! generator new entities are minted from. Hosts create one session per open
//! document instead of sharing global state.
//!
//! Every mutation goes through [`EditorSession::execute`], which applies the
//! command with ids the current document does not already use, records the
//! pre-mutation snapshot when the document changed and drops selected ids
//! that no longer exist.

use crate::commands::{
    AddLineCommand, AddSubwordCommand, AddWordCommand, DeleteByIdsCommand, DeleteLinesCommand,
    DeleteSubwordsCommand, DeleteWordsCommand, EditorCommand, MergeLineWithNextLineCommand,
    PasteLinesCommand, PasteWordsCommand, SelectionHint, SetLineSingerCommand,
    ShiftAlignmentCommand, ShiftLinesCommand, ShiftSubwordsCommand, ShiftWordsCommand,
    SplitLineCommand, SplitSubwordCommand, UpdateSubwordTextCommand, UpdateSubwordTimesCommand,
};
use crate::core::{
    Clipboard, HistoryStats, Result, SelectionState, UndoManager, UndoStackConfig,
    WordSelectionMode,
};
use crate::playback::{self, SegmentPlayer, Transport};
use kara_core::{
    find_line, find_line_by_time, find_subword, find_word, is_line_at_time, normalize,
    query::get_new_word_time_with, AlignmentDocument, DocumentStats, EntityId, IdGenerator,
    Seconds, SingerTag, Subword, TimeSpan, TimingDefaults, UnusedIds,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convenience result for session edits: the entity to select next, if any
pub type EditOutcome = Option<SelectionHint>;

/// Configuration for an editing session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Undo history limits
    pub history: UndoStackConfig,

    /// Reject `start > end` and non-finite times instead of storing them
    pub strict_ranges: bool,

    /// Seconds moved by the transport seek helpers
    pub seek_step: Seconds,

    /// How selecting a word fills the line selection
    pub word_selection: WordSelectionMode,

    /// Heuristics for placing new words
    pub timing: TimingDefaults,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history: UndoStackConfig::default(),
            strict_ranges: false,
            seek_step: 5.0,
            word_selection: WordSelectionMode::default(),
            timing: TimingDefaults::default(),
        }
    }
}

/// Statistics about a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// Entity counts and total duration of the document
    pub document: DocumentStats,

    /// Undo/redo depth and memory
    pub history: HistoryStats,

    /// Number of commands that changed the document
    pub operation_count: usize,
}

/// A single editing session
#[derive(Debug)]
pub struct EditorSession {
    document: AlignmentDocument,
    history: UndoManager,
    selection: SelectionState,
    clipboard: Clipboard,
    ids: Box<dyn IdGenerator>,
    config: SessionConfig,
    operation_count: usize,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Generator used when the host does not inject one
fn default_id_generator() -> Box<dyn IdGenerator> {
    #[cfg(feature = "uuid")]
    {
        Box::new(kara_core::UuidGenerator)
    }
    #[cfg(not(feature = "uuid"))]
    {
        Box::new(kara_core::SequentialIdGenerator::default())
    }
}

impl EditorSession {
    /// Create an empty session with default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create an empty session with custom configuration
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            document: AlignmentDocument::new(),
            history: UndoManager::with_config(config.history.clone()),
            selection: SelectionState::new(),
            clipboard: Clipboard::new(),
            ids: default_id_generator(),
            config,
            operation_count: 0,
        }
    }

    /// Create a session editing `document`
    ///
    /// The document is normalized first.
    pub fn from_document(document: AlignmentDocument) -> Self {
        let mut session = Self::new();
        session.document = normalize(document);
        session
    }

    /// Replace the id generator
    ///
    /// # Examples
    ///
    /// ```
    /// use kara_core::SequentialIdGenerator;
    /// use kara_editor::EditorSession;
    ///
    /// let mut session = EditorSession::new()
    ///     .with_id_generator(Box::new(SequentialIdGenerator::new("line")));
    /// let hint = session.add_line(0.0, 1.0, "hello").unwrap().unwrap();
    /// assert_eq!(hint.id.as_str(), "line-1");
    /// ```
    #[must_use]
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// The current document
    #[must_use]
    pub const fn document(&self) -> &AlignmentDocument {
        &self.document
    }

    /// Replace the document wholesale
    ///
    /// Used by persistence hosts. The document is normalized, and history,
    /// selection and clipboard are reset because their ids and snapshots
    /// belong to the old document.
    pub fn set_document(&mut self, document: AlignmentDocument) {
        self.document = normalize(document);
        self.history.clear();
        self.selection.clear();
        self.clipboard.clear();
        tracing::debug!(lines = self.document.len(), "document replaced");
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current clipboard
    #[must_use]
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: SessionConfig) {
        self.history.set_config(config.history.clone());
        self.config = config;
    }

    /// Apply a command
    ///
    /// Returns the entity the command suggests selecting. A command that
    /// changes nothing leaves history untouched and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// With [`SessionConfig::strict_ranges`] enabled, returns the error from
    /// [`EditorCommand::check_ranges`] without touching the document.
    pub fn execute(&mut self, command: &dyn EditorCommand) -> Result<EditOutcome> {
        let description = command.description();
        if self.config.strict_ranges {
            if let Err(err) = command.check_ranges() {
                tracing::warn!(command = description, error = %err, "rejected time range");
                return Err(err);
            }
        }

        let mut ids = UnusedIds::new(self.ids.as_mut(), &self.document);
        let Some(output) = command.execute(&self.document, &mut ids) else {
            tracing::trace!(command = description, "command changed nothing");
            return Ok(None);
        };

        let previous = core::mem::replace(&mut self.document, output.document);
        self.history.record_snapshot(previous, description);
        self.selection.retain_existing(&self.document);
        self.operation_count += 1;
        tracing::debug!(
            command = description,
            lines = self.document.len(),
            undo = self.history.stats().undo_count,
            "applied command"
        );
        Ok(output.select)
    }

    /// Add a line with one word and one subword
    ///
    /// # Errors
    ///
    /// Strict range checking rejects `start > end`.
    pub fn add_line(&mut self, start: Seconds, end: Seconds, text: &str) -> Result<EditOutcome> {
        self.execute(&AddLineCommand::new(start, end, text))
    }

    /// Add a line at `time` unless a line already plays there
    ///
    /// The span comes from the new-word placement heuristic.
    ///
    /// # Errors
    ///
    /// Strict range checking rejects an inverted heuristic span.
    pub fn add_line_at(&mut self, time: Seconds, text: &str) -> Result<EditOutcome> {
        if is_line_at_time(&self.document, time) {
            tracing::trace!(time, "line already present at time");
            return Ok(None);
        }
        let span = self.new_word_time(time);
        self.add_line(span.start, span.end, text)
    }

    /// Append a word to a line
    ///
    /// # Errors
    ///
    /// Strict range checking rejects `start > end`.
    pub fn add_word(
        &mut self,
        line_id: &EntityId,
        start: Seconds,
        end: Seconds,
        text: &str,
    ) -> Result<EditOutcome> {
        self.execute(&AddWordCommand::new(line_id.clone(), start, end, text))
    }

    /// Add a word to whichever line plays at `time`
    ///
    /// # Errors
    ///
    /// Strict range checking rejects an inverted heuristic span.
    pub fn add_word_at(&mut self, time: Seconds, text: &str) -> Result<EditOutcome> {
        let Some(line_id) = find_line_by_time(&self.document, time).map(|l| l.id.clone()) else {
            return Ok(None);
        };
        let span = self.new_word_time(time);
        self.add_word(&line_id, span.start, span.end, text)
    }

    /// Append a subword to a word
    ///
    /// # Errors
    ///
    /// Strict range checking rejects `start > end`.
    pub fn add_subword(
        &mut self,
        line_id: &EntityId,
        word_id: &EntityId,
        start: Seconds,
        end: Seconds,
        text: &str,
    ) -> Result<EditOutcome> {
        self.execute(&AddSubwordCommand::new(
            line_id.clone(),
            word_id.clone(),
            start,
            end,
            text,
        ))
    }

    /// Set the times of one subword
    ///
    /// # Errors
    ///
    /// Strict range checking rejects `start > end`.
    pub fn update_subword_times(
        &mut self,
        subword_id: &EntityId,
        start: Seconds,
        end: Seconds,
    ) -> Result<EditOutcome> {
        self.execute(&UpdateSubwordTimesCommand::new(subword_id.clone(), start, end))
    }

    /// Replace the text of one subword
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the session API uniform.
    pub fn update_subword_text(&mut self, subword_id: &EntityId, text: &str) -> Result<EditOutcome> {
        self.execute(&UpdateSubwordTextCommand::new(subword_id.clone(), text))
    }

    /// Split a subword at a character index
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn split_subword(&mut self, subword_id: &EntityId, char_index: usize) -> Result<EditOutcome> {
        self.execute(&SplitSubwordCommand::new(subword_id.clone(), char_index))
    }

    /// Delete lines
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn delete_lines(&mut self, line_ids: &[EntityId]) -> Result<EditOutcome> {
        self.execute(&DeleteLinesCommand::new(line_ids.to_vec()))
    }

    /// Delete words
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn delete_words(&mut self, word_ids: &[EntityId]) -> Result<EditOutcome> {
        self.execute(&DeleteWordsCommand::new(word_ids.to_vec()))
    }

    /// Delete subwords
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn delete_subwords(&mut self, subword_ids: &[EntityId]) -> Result<EditOutcome> {
        self.execute(&DeleteSubwordsCommand::new(subword_ids.to_vec()))
    }

    /// Delete entities at any level
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn delete_by_ids(&mut self, ids: &[EntityId]) -> Result<EditOutcome> {
        self.execute(&DeleteByIdsCommand::new(ids.to_vec()))
    }

    /// Delete everything selected and clear the selection
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn delete_selection(&mut self) -> Result<EditOutcome> {
        if self.selection.is_empty() {
            return Ok(None);
        }
        let ids = self.selection.all_ids();
        let outcome = self.execute(&DeleteByIdsCommand::new(ids).with_description(
            "Delete selection".to_string(),
        ))?;
        self.selection.clear();
        Ok(outcome)
    }

    /// Split the line owning `word_id` at that word
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn split_line(&mut self, word_id: &EntityId) -> Result<EditOutcome> {
        self.execute(&SplitLineCommand::new(word_id.clone()))
    }

    /// Merge a line into the next one
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn merge_line_with_next_line(&mut self, line_id: &EntityId) -> Result<EditOutcome> {
        self.execute(&MergeLineWithNextLineCommand::new(line_id.clone()))
    }

    /// Shift lines in time
    ///
    /// # Errors
    ///
    /// Strict range checking rejects a non-finite delta.
    pub fn shift_lines(&mut self, line_ids: &[EntityId], delta: Seconds) -> Result<EditOutcome> {
        self.execute(&ShiftLinesCommand::new(line_ids.to_vec(), delta))
    }

    /// Shift words in time
    ///
    /// # Errors
    ///
    /// Strict range checking rejects a non-finite delta.
    pub fn shift_words(&mut self, word_ids: &[EntityId], delta: Seconds) -> Result<EditOutcome> {
        self.execute(&ShiftWordsCommand::new(word_ids.to_vec(), delta))
    }

    /// Shift subwords in time
    ///
    /// # Errors
    ///
    /// Strict range checking rejects a non-finite delta.
    pub fn shift_subwords(
        &mut self,
        subword_ids: &[EntityId],
        delta: Seconds,
    ) -> Result<EditOutcome> {
        self.execute(&ShiftSubwordsCommand::new(subword_ids.to_vec(), delta))
    }

    /// Shift the whole document in time
    ///
    /// # Errors
    ///
    /// Strict range checking rejects a non-finite delta.
    pub fn shift_alignment(&mut self, delta: Seconds) -> Result<EditOutcome> {
        self.execute(&ShiftAlignmentCommand::new(delta))
    }

    /// Assign a singer to lines
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn set_line_singer(
        &mut self,
        line_ids: &[EntityId],
        singer: Option<SingerTag>,
    ) -> Result<EditOutcome> {
        self.execute(&SetLineSingerCommand::new(line_ids.to_vec(), singer))
    }

    /// Put lines on the clipboard for copying
    pub fn copy_lines(&mut self, line_ids: &[EntityId]) {
        self.clipboard.copy_lines(line_ids.to_vec());
    }

    /// Put lines on the clipboard for moving
    pub fn cut_lines(&mut self, line_ids: &[EntityId]) {
        self.clipboard.cut_lines(line_ids.to_vec());
    }

    /// Put words on the clipboard for copying
    pub fn copy_words(&mut self, word_ids: &[EntityId]) {
        self.clipboard.copy_words(word_ids.to_vec());
    }

    /// Put words on the clipboard for moving
    pub fn cut_words(&mut self, word_ids: &[EntityId]) {
        self.clipboard.cut_words(word_ids.to_vec());
    }

    /// Paste the clipboard lines so the earliest starts at `target_time`
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn paste_lines(&mut self, target_time: Seconds) -> Result<EditOutcome> {
        let command = PasteLinesCommand::new(
            target_time,
            self.clipboard.lines().to_vec(),
            self.clipboard.is_cut(),
        );
        self.execute(&command)
    }

    /// Paste the clipboard words into the line playing at `target_time`
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn paste_words(&mut self, target_time: Seconds) -> Result<EditOutcome> {
        let command = PasteWordsCommand::new(
            target_time,
            self.clipboard.words().to_vec(),
            self.clipboard.is_cut(),
        );
        self.execute(&command)
    }

    /// Select exactly one line
    pub fn select_line(&mut self, line_id: &EntityId) {
        self.selection.select_line(line_id.clone());
    }

    /// Select exactly one word, using the configured line coupling
    pub fn select_word(&mut self, word_id: &EntityId) -> bool {
        self.selection
            .select_word(&self.document, word_id, self.config.word_selection)
    }

    /// Select exactly one subword with its word and line
    pub fn select_subword(&mut self, subword_id: &EntityId) -> bool {
        self.selection.select_subword(&self.document, subword_id)
    }

    /// Toggle a line in the multi-selection
    pub fn toggle_line(&mut self, line_id: &EntityId) {
        self.selection.toggle_line(line_id);
    }

    /// Toggle a word in the multi-selection
    pub fn toggle_word(&mut self, word_id: &EntityId) {
        self.selection.toggle_word(word_id);
    }

    /// Toggle a subword in the multi-selection
    pub fn toggle_subword(&mut self, subword_id: &EntityId) -> bool {
        self.selection.toggle_subword(&self.document, subword_id)
    }

    /// Select whatever a command hinted at
    pub fn apply_hint(&mut self, hint: &SelectionHint) -> bool {
        match hint.kind {
            kara_core::EntityKind::Line => {
                self.select_line(&hint.id);
                true
            }
            kara_core::EntityKind::Word => self.select_word(&hint.id),
            kara_core::EntityKind::Subword => self.select_subword(&hint.id),
        }
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Undo the last edit; returns `false` when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        if undone {
            self.selection.retain_existing(&self.document);
        }
        undone
    }

    /// Redo the last undone edit; returns `false` when there is nothing to
    /// redo
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        if redone {
            self.selection.retain_existing(&self.document);
        }
        redone
    }

    /// Check if undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Description of the edit undo would revert
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.history.next_undo_description()
    }

    /// Description of the edit redo would re-apply
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.history.next_redo_description()
    }

    /// Undo/redo depth and memory
    #[must_use]
    pub fn history_stats(&self) -> HistoryStats {
        self.history.stats()
    }

    /// Session statistics
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            document: self.document.stats(),
            history: self.history.stats(),
            operation_count: self.operation_count,
        }
    }

    /// Span a new word at `time` would get under the session's heuristics
    #[must_use]
    pub fn new_word_time(&self, time: Seconds) -> TimeSpan {
        get_new_word_time_with(&self.document, time, &self.config.timing)
    }

    /// Time span of any line, word or subword
    #[must_use]
    pub fn segment_of(&self, id: &EntityId) -> Option<TimeSpan> {
        if let Some(line) = find_line(&self.document, id) {
            return Some(line.span());
        }
        if let Some(location) = find_word(&self.document, id) {
            return Some(location.word.span());
        }
        find_subword(&self.document, id).map(Subword::span)
    }

    /// Play the span of an entity through `transport`
    ///
    /// Returns `Ok(false)` when the id does not resolve.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn play_entity<T: Transport + ?Sized>(
        &self,
        player: &mut SegmentPlayer,
        transport: &mut T,
        id: &EntityId,
    ) -> Result<bool> {
        let Some(segment) = self.segment_of(id) else {
            return Ok(false);
        };
        player.start(transport, segment)?;
        Ok(true)
    }

    /// Seek forward by the configured step
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn seek_forward<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<Seconds> {
        playback::seek_forward(transport, self.config.seek_step)
    }

    /// Seek backward by the configured step, stopping at zero
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn seek_backward<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<Seconds> {
        playback::seek_backward(transport, self.config.seek_step)
    }

    /// Lint the current document
    #[cfg(feature = "analysis")]
    #[must_use]
    pub fn lint(&self) -> Vec<kara_core::LintIssue> {
        kara_core::lint(&self.document)
    }

    /// Serialize the current document
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::SerializationError`] if encoding fails.
    #[cfg(feature = "serde")]
    pub fn snapshot_json(&self) -> Result<String> {
        crate::formats::json::to_json(&self.document)
    }

    /// Load a serialized document, resetting history, selection and clipboard
    ///
    /// # Errors
    ///
    /// Returns a serialization or validation error and keeps the current
    /// document when `json` cannot be loaded.
    #[cfg(feature = "serde")]
    pub fn restore_json(&mut self, json: &str) -> Result<()> {
        let document = crate::formats::json::from_json(json)?;
        self.set_document(document);
        Ok(())
    }
}

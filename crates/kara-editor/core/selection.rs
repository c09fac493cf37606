//! Selection state over the three entity levels
//!
//! Selecting at a coarse level resets the finer levels; selecting a subword
//! expands upward so its word and line are highlighted as well.

use ahash::AHashSet;
use kara_core::query::locate_subword;
use kara_core::{find_word, AlignmentDocument, EntityId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How single-selecting a word fills the line selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WordSelectionMode {
    /// Select the word's owning line
    #[default]
    Fixed,
    /// Put the word's own id into the line selection
    ///
    /// Reproduces what older hosts expect; the line selection then holds an
    /// id that is not a line.
    Legacy,
}

/// Selected line, word and subword ids in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    lines: Vec<EntityId>,
    words: Vec<EntityId>,
    subwords: Vec<EntityId>,
}

/// Add `id` unless already present
fn push_unique(ids: &mut Vec<EntityId>, id: &EntityId) {
    if !ids.contains(id) {
        ids.push(id.clone());
    }
}

/// Remove `id` if present, add it otherwise
fn toggle(ids: &mut Vec<EntityId>, id: &EntityId) {
    if let Some(position) = ids.iter().position(|x| x == id) {
        ids.remove(position);
    } else {
        ids.push(id.clone());
    }
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected line ids
    #[must_use]
    pub fn lines(&self) -> &[EntityId] {
        &self.lines
    }

    /// Selected word ids
    #[must_use]
    pub fn words(&self) -> &[EntityId] {
        &self.words
    }

    /// Selected subword ids
    #[must_use]
    pub fn subwords(&self) -> &[EntityId] {
        &self.subwords
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.words.is_empty() && self.subwords.is_empty()
    }

    /// Whether `id` is selected at any level
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.lines.contains(id) || self.words.contains(id) || self.subwords.contains(id)
    }

    /// Every selected id, lines first, without duplicates
    #[must_use]
    pub fn all_ids(&self) -> Vec<EntityId> {
        let mut all = Vec::with_capacity(self.lines.len() + self.words.len() + self.subwords.len());
        for id in self.lines.iter().chain(&self.words).chain(&self.subwords) {
            push_unique(&mut all, id);
        }
        all
    }

    /// Select exactly one line
    pub fn select_line(&mut self, line_id: EntityId) {
        self.lines = vec![line_id];
        self.words.clear();
        self.subwords.clear();
    }

    /// Select exactly one word
    ///
    /// Returns `false` and keeps the selection when the word does not exist.
    pub fn select_word(
        &mut self,
        doc: &AlignmentDocument,
        word_id: &EntityId,
        mode: WordSelectionMode,
    ) -> bool {
        let Some(location) = find_word(doc, word_id) else {
            return false;
        };
        let line_entry = match mode {
            WordSelectionMode::Fixed => location.word.line_id.clone(),
            WordSelectionMode::Legacy => location.word.id.clone(),
        };
        self.lines = vec![line_entry];
        self.words = vec![location.word.id.clone()];
        self.subwords.clear();
        true
    }

    /// Select exactly one subword together with its word and line
    ///
    /// Returns `false` and keeps the selection when the subword does not
    /// exist.
    pub fn select_subword(&mut self, doc: &AlignmentDocument, subword_id: &EntityId) -> bool {
        let Some(location) = locate_subword(doc, subword_id) else {
            return false;
        };
        let subword = location.subword;
        self.lines = vec![subword.line_id.clone()];
        self.words = vec![subword.word_id.clone()];
        self.subwords = vec![subword.id.clone()];
        true
    }

    /// Add or remove a line from the multi-selection
    pub fn toggle_line(&mut self, line_id: &EntityId) {
        toggle(&mut self.lines, line_id);
    }

    /// Add or remove a word from the multi-selection
    pub fn toggle_word(&mut self, word_id: &EntityId) {
        toggle(&mut self.words, word_id);
    }

    /// Add or remove a subword from the multi-selection
    ///
    /// The parent word and line are added if missing but never removed, so
    /// deselecting one subword keeps its siblings' parents highlighted.
    pub fn toggle_subword(&mut self, doc: &AlignmentDocument, subword_id: &EntityId) -> bool {
        let Some(location) = locate_subword(doc, subword_id) else {
            return false;
        };
        let subword = location.subword;
        toggle(&mut self.subwords, &subword.id);
        push_unique(&mut self.words, &subword.word_id);
        push_unique(&mut self.lines, &subword.line_id);
        true
    }

    /// Drop ids that no longer exist in `doc`
    pub fn retain_existing(&mut self, doc: &AlignmentDocument) {
        let live: AHashSet<&EntityId> = doc.ids().collect();
        self.lines.retain(|id| live.contains(id));
        self.words.retain(|id| live.contains(id));
        self.subwords.retain(|id| live.contains(id));
    }

    /// Clear every level
    pub fn clear(&mut self) {
        self.lines.clear();
        self.words.clear();
        self.subwords.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::sample_document;

    fn ids(list: &[EntityId]) -> Vec<&str> {
        list.iter().map(EntityId::as_str).collect()
    }

    #[test]
    fn select_line_resets_finer_levels() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        assert!(selection.select_subword(&doc, &"s1".into()));
        selection.select_line("l2".into());
        assert_eq!(ids(selection.lines()), vec!["l2"]);
        assert!(selection.words().is_empty());
        assert!(selection.subwords().is_empty());
    }

    #[test]
    fn select_word_fixed_selects_owning_line() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        assert!(selection.select_word(&doc, &"w2".into(), WordSelectionMode::Fixed));
        assert_eq!(ids(selection.lines()), vec!["l1"]);
        assert_eq!(ids(selection.words()), vec!["w2"]);
    }

    #[test]
    fn select_word_legacy_reuses_word_id() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        assert!(selection.select_word(&doc, &"w2".into(), WordSelectionMode::Legacy));
        assert_eq!(ids(selection.lines()), vec!["w2"]);
    }

    #[test]
    fn select_missing_word_keeps_selection() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        selection.select_line("l1".into());
        assert!(!selection.select_word(&doc, &"nope".into(), WordSelectionMode::Fixed));
        assert_eq!(ids(selection.lines()), vec!["l1"]);
    }

    #[test]
    fn select_subword_expands_upward() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        assert!(selection.select_subword(&doc, &"s4".into()));
        assert_eq!(ids(selection.lines()), vec!["l2"]);
        assert_eq!(ids(selection.words()), vec!["w3"]);
        assert_eq!(ids(selection.subwords()), vec!["s4"]);
    }

    #[test]
    fn toggles_stay_at_their_level() {
        let mut selection = SelectionState::new();
        selection.toggle_line(&"l1".into());
        selection.toggle_line(&"l2".into());
        selection.toggle_line(&"l1".into());
        assert_eq!(ids(selection.lines()), vec!["l2"]);

        selection.toggle_word(&"w1".into());
        assert_eq!(ids(selection.words()), vec!["w1"]);
        assert_eq!(ids(selection.lines()), vec!["l2"]);
    }

    #[test]
    fn toggle_subword_pushes_parents_without_toggling() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        assert!(selection.toggle_subword(&doc, &"s3".into()));
        assert!(selection.toggle_subword(&doc, &"s4".into()));
        assert_eq!(ids(selection.subwords()), vec!["s3", "s4"]);
        assert_eq!(ids(selection.words()), vec!["w3"]);
        assert_eq!(ids(selection.lines()), vec!["l2"]);

        assert!(selection.toggle_subword(&doc, &"s3".into()));
        assert_eq!(ids(selection.subwords()), vec!["s4"]);
        assert_eq!(ids(selection.words()), vec!["w3"]);
        assert!(!selection.toggle_subword(&doc, &"ghost".into()));
    }

    #[test]
    fn all_ids_deduplicates() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        selection.select_word(&doc, &"w1".into(), WordSelectionMode::Legacy);
        selection.toggle_line(&"l1".into());
        assert_eq!(
            selection.all_ids(),
            vec![EntityId::from("w1"), EntityId::from("l1")]
        );
    }

    #[test]
    fn retain_existing_drops_stale_ids() {
        let doc = sample_document();
        let mut selection = SelectionState::new();
        selection.select_subword(&doc, &"s1".into());
        selection.toggle_line(&"gone".into());

        selection.retain_existing(&doc);
        assert_eq!(ids(selection.lines()), vec!["l1"]);
        assert!(selection.contains(&"s1".into()));
        assert!(!selection.contains(&"gone".into()));
    }
}

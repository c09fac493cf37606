//! Id-based clipboard
//!
//! The clipboard only stores ids. They are resolved against the document at
//! paste time, so copying is free and a cut leaves the document untouched
//! until the paste that completes it.

use kara_core::EntityId;

/// Copied line and word ids plus the cut flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    lines: Vec<EntityId>,
    words: Vec<EntityId>,
    is_cut: bool,
}

impl Clipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Store line ids for a later copy-paste
    pub fn copy_lines(&mut self, ids: Vec<EntityId>) {
        self.lines = ids;
        self.is_cut = false;
    }

    /// Store line ids for a later move
    pub fn cut_lines(&mut self, ids: Vec<EntityId>) {
        self.lines = ids;
        self.is_cut = true;
    }

    /// Store word ids for a later copy-paste
    pub fn copy_words(&mut self, ids: Vec<EntityId>) {
        self.words = ids;
        self.is_cut = false;
    }

    /// Store word ids for a later move
    pub fn cut_words(&mut self, ids: Vec<EntityId>) {
        self.words = ids;
        self.is_cut = true;
    }

    /// Copied line ids
    #[must_use]
    pub fn lines(&self) -> &[EntityId] {
        &self.lines
    }

    /// Copied word ids
    #[must_use]
    pub fn words(&self) -> &[EntityId] {
        &self.words
    }

    /// Whether the last copy was a cut
    #[must_use]
    pub const fn is_cut(&self) -> bool {
        self.is_cut
    }

    /// Whether nothing has been copied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.words.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_and_cut_toggle_flag() {
        let mut clipboard = Clipboard::new();
        assert!(clipboard.is_empty());

        clipboard.cut_lines(vec!["l1".into()]);
        assert!(clipboard.is_cut());
        assert_eq!(clipboard.lines(), &[EntityId::from("l1")]);

        clipboard.copy_words(vec!["w1".into(), "w2".into()]);
        assert!(!clipboard.is_cut());
        // Lines stay around independently of words
        assert_eq!(clipboard.lines().len(), 1);
        assert_eq!(clipboard.words().len(), 2);

        clipboard.clear();
        assert!(clipboard.is_empty());
        assert!(!clipboard.is_cut());
    }
}

//! Structural invariant checking
//!
//! Verifies everything [`crate::normalize`] and the editor commands promise:
//! sorted siblings, derived spans, no empty nodes, globally unique ids and
//! consistent back-references.

use crate::analysis::{IssueCategory, IssueSeverity, LintIssue, LintRule};
use crate::model::{AlignmentDocument, EntityId, TimeSpan};
use ahash::AHashSet;

/// Rule reporting every broken tree invariant
pub struct StructureRule;

impl StructureRule {
    /// Build an issue for this rule
    fn issue(&self, message: String, entity: &EntityId) -> LintIssue {
        LintIssue::new(self.default_severity(), self.category(), self.id(), message)
            .with_entity(entity)
    }

    /// Record `id` as seen, reporting it when it was already claimed
    fn claim<'a>(
        &self,
        seen: &mut AHashSet<&'a EntityId>,
        id: &'a EntityId,
        issues: &mut Vec<LintIssue>,
    ) {
        if !seen.insert(id) {
            issues.push(self.issue("duplicate id".to_string(), id));
        }
    }
}

/// Whether `starts` is non-decreasing
fn is_sorted(mut starts: impl Iterator<Item = f64>) -> bool {
    let Some(mut previous) = starts.next() else {
        return true;
    };
    for start in starts {
        if start < previous {
            return false;
        }
        previous = start;
    }
    true
}

/// Smallest span covering all `spans`
fn covering(spans: impl Iterator<Item = TimeSpan>) -> Option<TimeSpan> {
    spans.reduce(|acc, span| acc.union(&span))
}

impl LintRule for StructureRule {
    fn id(&self) -> &'static str {
        "structure"
    }

    fn description(&self) -> &'static str {
        "Detects broken ordering, derivation, emptiness, id and back-reference invariants"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Error
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Structure
    }

    fn check(&self, doc: &AlignmentDocument) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        let mut seen: AHashSet<&EntityId> = AHashSet::new();

        if !is_sorted(doc.lines().iter().map(|l| l.start)) {
            issues.push(LintIssue::new(
                self.default_severity(),
                self.category(),
                self.id(),
                "lines are not sorted by start".to_string(),
            ));
        }

        for line in doc.lines() {
            self.claim(&mut seen, &line.id, &mut issues);
            if line.words.is_empty() {
                issues.push(self.issue("line has no words".to_string(), &line.id));
                continue;
            }
            if !is_sorted(line.words.iter().map(|w| w.start)) {
                issues.push(self.issue("words are not sorted by start".to_string(), &line.id));
            }
            if covering(line.words.iter().map(|w| w.span())) != Some(line.span()) {
                issues.push(self.issue("line span does not match its words".to_string(), &line.id));
            }

            for word in &line.words {
                self.claim(&mut seen, &word.id, &mut issues);
                if word.line_id != line.id {
                    issues.push(self.issue(format!("word points at line {}", word.line_id), &word.id));
                }
                if word.subwords.is_empty() {
                    issues.push(self.issue("word has no subwords".to_string(), &word.id));
                    continue;
                }
                if !is_sorted(word.subwords.iter().map(|s| s.start)) {
                    issues.push(self.issue("subwords are not sorted by start".to_string(), &word.id));
                }
                if covering(word.subwords.iter().map(|s| s.span())) != Some(word.span()) {
                    issues.push(self.issue("word span does not match its subwords".to_string(), &word.id));
                }

                for subword in &word.subwords {
                    self.claim(&mut seen, &subword.id, &mut issues);
                    if subword.text.is_empty() {
                        issues.push(self.issue("subword has empty text".to_string(), &subword.id));
                    }
                    if subword.word_id != word.id || subword.line_id != line.id {
                        issues.push(self.issue(
                            format!(
                                "subword points at word {} / line {}",
                                subword.word_id, subword.line_id
                            ),
                            &subword.id,
                        ));
                    }
                }
            }
        }

        issues
    }
}

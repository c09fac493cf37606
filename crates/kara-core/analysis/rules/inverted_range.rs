//! Inverted subword range detection
//!
//! The editor accepts `start > end` on a resize unless the host enables
//! strict ranges, so such subwords can exist in a live document.

use crate::analysis::{IssueCategory, IssueSeverity, LintIssue, LintRule};
use crate::model::AlignmentDocument;

/// Rule flagging subwords whose start lies after their end
pub struct InvertedRangeRule;

impl LintRule for InvertedRangeRule {
    fn id(&self) -> &'static str {
        "inverted-range"
    }

    fn description(&self) -> &'static str {
        "Detects subwords whose start time is after their end time"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Warning
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Timing
    }

    fn check(&self, doc: &AlignmentDocument) -> Vec<LintIssue> {
        doc.subwords()
            .filter(|s| s.start > s.end)
            .map(|s| {
                LintIssue::new(
                    self.default_severity(),
                    self.category(),
                    self.id(),
                    format!("start {} > end {} for \"{}\"", s.start, s.end, s.text),
                )
                .with_entity(&s.id)
            })
            .collect()
    }
}

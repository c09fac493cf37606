//! Overlapping line detection

use crate::analysis::{IssueCategory, IssueSeverity, LintIssue, LintRule};
use crate::model::AlignmentDocument;

/// Rule flagging lines that start before the previous line has ended
///
/// Overlap is legal (duets) but usually an authoring slip, hence `Info`.
pub struct LineOverlapRule;

impl LintRule for LineOverlapRule {
    fn id(&self) -> &'static str {
        "line-overlap"
    }

    fn description(&self) -> &'static str {
        "Detects lines that overlap the preceding line"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Info
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Timing
    }

    fn check(&self, doc: &AlignmentDocument) -> Vec<LintIssue> {
        doc.lines()
            .windows(2)
            .filter(|pair| pair[1].start < pair[0].end)
            .map(|pair| {
                LintIssue::new(
                    self.default_severity(),
                    self.category(),
                    self.id(),
                    format!(
                        "line starts at {} before previous line ends at {}",
                        pair[1].start, pair[0].end
                    ),
                )
                .with_entity(&pair[1].id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Subword, Word};

    fn line(id: &str, start: f64, end: f64) -> Line {
        let word_id = format!("{id}-w");
        let sub_id = format!("{id}-s");
        let word = Word::new(
            word_id.as_str().into(),
            id.into(),
            vec![Subword::new(sub_id.into(), word_id.into(), id.into(), start, end, "x")],
        );
        Line::new(id.into(), vec![word])
    }

    #[test]
    fn overlap_detected() {
        let doc = AlignmentDocument::from_lines(vec![line("a", 0.0, 2.0), line("b", 1.5, 3.0)]);
        let issues = LineOverlapRule.check(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].entity(), Some("b"));
    }

    #[test]
    fn touching_lines_are_fine() {
        let doc = AlignmentDocument::from_lines(vec![line("a", 0.0, 2.0), line("b", 2.0, 3.0)]);
        assert!(LineOverlapRule.check(&doc).is_empty());
    }
}

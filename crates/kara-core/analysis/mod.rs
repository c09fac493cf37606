//! Linting for alignment documents
//!
//! Rules inspect a document and report [`LintIssue`]s. The structural rule
//! checks the tree invariants (ordering, derived spans, non-emptiness,
//! id uniqueness, back-references) and is what guards documents loaded from
//! a host snapshot. The timing rules flag content an author probably wants
//! to fix but that the editor itself tolerates.
//!
//! # Built-in Rules
//!
//! - `structure`: any violated tree invariant
//! - `inverted-range`: subwords with `start > end`
//! - `line-overlap`: a line starting before the previous line ends

use crate::model::AlignmentDocument;
use crate::utils::{CoreError, Result};
use core::fmt;

pub mod rules;

pub use rules::{BuiltinRules, InvertedRangeRule, LineOverlapRule, StructureRule};

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    /// Informational message - no action required
    Info,
    /// Warning - should be addressed but the document is usable
    Warning,
    /// Error - the document breaks an invariant the editor relies on
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Category of lint issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Timing-related issues
    Timing,
    /// Tree shape and id issues
    Structure,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timing => write!(f, "timing"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    severity: IssueSeverity,
    category: IssueCategory,
    rule_id: &'static str,
    message: String,
    entity: Option<String>,
}

impl LintIssue {
    /// Create a new issue
    #[must_use]
    pub fn new(
        severity: IssueSeverity,
        category: IssueCategory,
        rule_id: &'static str,
        message: String,
    ) -> Self {
        Self {
            severity,
            category,
            rule_id,
            message,
            entity: None,
        }
    }

    /// Attach the id of the offending entity
    #[must_use]
    pub fn with_entity(mut self, id: impl fmt::Display) -> Self {
        self.entity = Some(id.to_string());
        self
    }

    /// Severity of this issue
    #[must_use]
    pub const fn severity(&self) -> IssueSeverity {
        self.severity
    }

    /// Category of this issue
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.category
    }

    /// Id of the rule that produced this issue
    #[must_use]
    pub const fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offending entity id, when known
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.rule_id, self.message)?;
        if let Some(entity) = &self.entity {
            write!(f, " ({entity})")?;
        }
        Ok(())
    }
}

/// A lint rule over a whole document
pub trait LintRule: Send + Sync {
    /// Stable identifier
    fn id(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Severity used for issues this rule reports
    fn default_severity(&self) -> IssueSeverity;

    /// Category used for issues this rule reports
    fn category(&self) -> IssueCategory;

    /// Inspect `doc` and report issues
    fn check(&self, doc: &AlignmentDocument) -> Vec<LintIssue>;
}

/// Run every built-in rule
#[must_use]
pub fn lint(doc: &AlignmentDocument) -> Vec<LintIssue> {
    BuiltinRules::all()
        .iter()
        .flat_map(|rule| rule.check(doc))
        .collect()
}

/// Check the structural invariants, failing on the first violation
///
/// # Errors
///
/// Returns [`CoreError::Validation`] describing the first broken invariant.
pub fn validate_structure(doc: &AlignmentDocument) -> Result<()> {
    match StructureRule.check(doc).into_iter().next() {
        Some(issue) => Err(CoreError::validation(issue)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Subword, Word};

    #[test]
    fn issue_display_includes_entity() {
        let issue = LintIssue::new(
            IssueSeverity::Warning,
            IssueCategory::Timing,
            "line-overlap",
            "overlap".to_string(),
        )
        .with_entity("l2");
        assert_eq!(issue.to_string(), "[warning] line-overlap: overlap (l2)");
        assert_eq!(issue.entity(), Some("l2"));
    }

    #[test]
    fn clean_document_has_no_issues() {
        let word = Word::new(
            "w1".into(),
            "l1".into(),
            vec![Subword::new("s1".into(), "w1".into(), "l1".into(), 0.0, 1.0, "a")],
        );
        let doc = AlignmentDocument::from_lines(vec![Line::new("l1".into(), vec![word])]);
        assert!(lint(&doc).is_empty());
        assert!(validate_structure(&doc).is_ok());
    }

    #[test]
    fn validate_structure_reports_first_violation() {
        let word = Word::new(
            "w1".into(),
            "l1".into(),
            vec![Subword::new("s1".into(), "w1".into(), "l1".into(), 0.0, 1.0, "")],
        );
        let doc = AlignmentDocument::from_lines(vec![Line::new("l1".into(), vec![word])]);
        let err = validate_structure(&doc).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

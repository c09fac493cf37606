//! Built-in lint rules

pub mod inverted_range;
pub mod line_overlap;
pub mod structure;

pub use inverted_range::InvertedRangeRule;
pub use line_overlap::LineOverlapRule;
pub use structure::StructureRule;

use super::LintRule;

/// Registry of the rules shipped with kara-core
pub struct BuiltinRules;

impl BuiltinRules {
    /// Every built-in rule, structure first
    #[must_use]
    pub fn all() -> Vec<Box<dyn LintRule>> {
        vec![
            Box::new(StructureRule),
            Box::new(InvertedRangeRule),
            Box::new(LineOverlapRule),
        ]
    }

    /// Look a rule up by id
    #[must_use]
    pub fn by_id(id: &str) -> Option<Box<dyn LintRule>> {
        Self::all().into_iter().find(|rule| rule.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_ids_are_unique() {
        let rules = BuiltinRules::all();
        let mut ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn lookup_by_id() {
        assert!(BuiltinRules::by_id("line-overlap").is_some());
        assert!(BuiltinRules::by_id("no-such-rule").is_none());
    }
}

//! Built-in lint rules
//!
//! Each rule lives in its own module and is registered in [`BuiltinRules`].

use super::{IssueCategory, LintRule};

pub mod empty_paragraph;
pub mod missing_source;
pub mod paragraph_structure;
pub mod zero_duration;

pub use empty_paragraph::EmptyParagraphRule;
pub use missing_source::MissingSourceRule;
pub use paragraph_structure::ParagraphStructureRule;
pub use zero_duration::ZeroDurationRule;

/// Built-in lint rules registry
pub struct BuiltinRules;

impl BuiltinRules {
    /// All built-in rules, in reporting order
    ///
    /// ```rust
    /// use transcript_core::analysis::linting::BuiltinRules;
    ///
    /// assert_eq!(BuiltinRules::all_rules().len(), 4);
    /// ```
    #[must_use]
    pub fn all_rules() -> Vec<Box<dyn LintRule>> {
        vec![
            Box::new(ParagraphStructureRule),
            Box::new(ZeroDurationRule),
            Box::new(MissingSourceRule),
            Box::new(EmptyParagraphRule),
        ]
    }

    /// Rules checking one category
    #[must_use]
    pub fn rules_for_category(category: IssueCategory) -> Vec<Box<dyn LintRule>> {
        Self::all_rules()
            .into_iter()
            .filter(|rule| rule.category() == category)
            .collect()
    }

    /// Rule with the given id
    #[must_use]
    pub fn rule_by_id(id: &str) -> Option<Box<dyn LintRule>> {
        Self::all_rules().into_iter().find(|rule| rule.id() == id)
    }

    /// Ids of all built-in rules
    #[must_use]
    pub fn rule_ids() -> Vec<&'static str> {
        Self::all_rules().iter().map(|rule| rule.id()).collect()
    }
}

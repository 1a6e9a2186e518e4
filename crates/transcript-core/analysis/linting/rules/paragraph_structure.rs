//! Paragraph structure rule
//!
//! Wraps the structural automaton. It reports at most one issue because the
//! automaton stops at the first violation.

use crate::analysis::linting::{IssueCategory, IssueSeverity, LintContext, LintIssue, LintRule};
use crate::analysis::validate_structure;

/// Rule rejecting streams the structural automaton refuses
pub struct ParagraphStructureRule;

impl LintRule for ParagraphStructureRule {
    fn id(&self) -> &'static str {
        "paragraph-structure"
    }

    fn name(&self) -> &'static str {
        "Paragraph Structure"
    }

    fn description(&self) -> &'static str {
        "Checks that paragraphs are balanced and all content lies inside one"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Error
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Structure
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<LintIssue> {
        match validate_structure(context.items) {
            Ok(()) => Vec::new(),
            Err(error) => vec![LintIssue::new(
                self.default_severity(),
                self.category(),
                self.id(),
                error.rule.to_string(),
            )
            .with_index(error.index)],
        }
    }
}

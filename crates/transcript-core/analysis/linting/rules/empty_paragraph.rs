//! Empty paragraph rule

use crate::analysis::linting::{IssueCategory, IssueSeverity, LintContext, LintIssue, LintRule};

/// Rule flagging paragraphs with no content between their boundaries
pub struct EmptyParagraphRule;

impl LintRule for EmptyParagraphRule {
    fn id(&self) -> &'static str {
        "empty-paragraph"
    }

    fn name(&self) -> &'static str {
        "Empty Paragraph"
    }

    fn description(&self) -> &'static str {
        "Detects paragraphs that contain no words or silences"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Hint
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Structure
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<LintIssue> {
        context
            .items
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].is_paragraph_start() && pair[1].is_paragraph_end())
            .map(|(index, pair)| {
                let speaker = pair[0].speaker().unwrap_or_default();
                LintIssue::new(
                    self.default_severity(),
                    self.category(),
                    self.id(),
                    format!("paragraph by '{speaker}' is empty"),
                )
                .with_index(index)
                .with_suggested_fix("remove the paragraph")
            })
            .collect()
    }
}

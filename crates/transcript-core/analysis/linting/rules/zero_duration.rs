//! Zero duration rule
//!
//! Content items shorter than [`EPSILON`] are editing leftovers. They render as
//! nothing and are pruned on save.

use crate::analysis::linting::{IssueCategory, IssueSeverity, LintContext, LintIssue, LintRule};
use crate::utils::EPSILON;

/// Rule flagging degenerate content items
pub struct ZeroDurationRule;

impl LintRule for ZeroDurationRule {
    fn id(&self) -> &'static str {
        "zero-duration"
    }

    fn name(&self) -> &'static str {
        "Zero Duration"
    }

    fn description(&self) -> &'static str {
        "Detects words and silences without measurable duration"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Warning
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Timing
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<LintIssue> {
        context
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_content() && item.duration() < EPSILON)
            .map(|(index, item)| {
                let severity = if item.duration() < 0.0 {
                    IssueSeverity::Error
                } else {
                    self.default_severity()
                };
                LintIssue::new(
                    severity,
                    self.category(),
                    self.id(),
                    format!("{} has duration {:.4}s", item.kind(), item.duration()),
                )
                .with_index(index)
                .with_suggested_fix("remove the item")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    #[test]
    fn negative_durations_are_errors() {
        let items = [
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 0.0),
            Item::artificial_silence(-0.5),
            Item::silence("s", 0.0, 0.5),
            Item::paragraph_end(),
        ];
        let issues = ZeroDurationRule.check(&LintContext::new(&items));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity(), IssueSeverity::Warning);
        assert_eq!(issues[1].severity(), IssueSeverity::Error);
        assert_eq!(issues[1].index(), Some(2));
    }
}

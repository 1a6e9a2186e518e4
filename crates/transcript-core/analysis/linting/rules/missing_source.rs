//! Missing source rule

use crate::analysis::linting::{IssueCategory, IssueSeverity, LintContext, LintIssue, LintRule};

/// Rule flagging items whose source id has no entry in the source table
///
/// Needs a source table in the context; without one it reports nothing.
pub struct MissingSourceRule;

impl LintRule for MissingSourceRule {
    fn id(&self) -> &'static str {
        "missing-source"
    }

    fn name(&self) -> &'static str {
        "Missing Source"
    }

    fn description(&self) -> &'static str {
        "Detects words and silences referencing an unknown source"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Error
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Sources
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<LintIssue> {
        let Some(sources) = context.sources else {
            return Vec::new();
        };

        context
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let (id, _) = item.source()?;
                (!sources.contains(id)).then(|| {
                    LintIssue::new(
                        self.default_severity(),
                        self.category(),
                        self.id(),
                        format!("source '{id}' is not in the source table"),
                    )
                    .with_index(index)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, Source, SourceTable};

    #[test]
    fn flags_each_reference() {
        let mut sources = SourceTable::new();
        sources.insert("known", Source::new(vec![1_u8]));
        let items = [
            Item::paragraph_start("A"),
            Item::word("a", "known", 0.0, 1.0),
            Item::word("b", "gone", 0.0, 1.0),
            Item::silence("gone", 1.0, 1.0),
            Item::paragraph_end(),
        ];
        let issues = MissingSourceRule.check(&LintContext::new(&items).with_sources(&sources));
        let indices: Vec<_> = issues.iter().filter_map(LintIssue::index).collect();
        assert_eq!(indices, vec![2, 3]);
        assert!(issues[0].message().contains("gone"));
    }

    #[test]
    fn silent_without_table() {
        let items = [Item::word("b", "gone", 0.0, 1.0)];
        assert!(MissingSourceRule.check(&LintContext::new(&items)).is_empty());
    }
}

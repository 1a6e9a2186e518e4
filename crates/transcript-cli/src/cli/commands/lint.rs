//! Lint command handler.

use std::path::Path;

use anyhow::{bail, Context, Result};
use transcript_core::analysis::linting::BuiltinRules;
use transcript_core::analysis::{lint_items, IssueSeverity, LintConfig, LintContext};

pub fn run(path: &Path, min_severity: IssueSeverity, max_issues: usize, disabled: &[String]) -> Result<()> {
    let mut config = LintConfig::default()
        .with_min_severity(min_severity)
        .with_max_issues(max_issues);
    for id in disabled {
        let rule = BuiltinRules::rule_by_id(id).with_context(|| {
            format!(
                "unknown rule '{id}' (known: {})",
                BuiltinRules::rule_ids().join(", ")
            )
        })?;
        config = config.without_rule(rule.id());
    }

    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    // Structure and missing sources are lint findings here, not load failures
    let (stream, sources) = transcript_editor::formats::load_unchecked(&bytes)
        .with_context(|| format!("load {}", path.display()))?;

    let context = LintContext::new(stream.items()).with_sources(&sources);
    let issues = lint_items(&context, &config);
    for issue in &issues {
        println!("{}: {issue}", path.display());
        if let Some(fix) = issue.suggested_fix() {
            println!("  fix: {fix}");
        }
    }

    let errors = issues
        .iter()
        .filter(|issue| issue.severity() == IssueSeverity::Error)
        .count();
    if errors > 0 {
        bail!("{errors} error(s) in {}", path.display());
    }
    if issues.is_empty() {
        println!("{}: no issues", path.display());
    }
    Ok(())
}

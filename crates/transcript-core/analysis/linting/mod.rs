//! Linting for transcript item streams
//!
//! Where [`validate_structure`](super::validate_structure) stops at the first
//! violation, the lint pass collects every diagnostic it can find so tools can
//! report them all at once. Rules are trait objects and can be filtered by id
//! and severity through [`LintConfig`].

use core::fmt;

use crate::model::{Item, SourceTable};

pub mod rules;

pub use rules::BuiltinRules;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    /// Informational message, no action required
    Info,
    /// Optional improvement
    Hint,
    /// Should be addressed before export
    Warning,
    /// The document cannot be saved or rendered as is
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Category of lint issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Paragraph and heading layout
    Structure,
    /// Item durations
    Timing,
    /// Source table integrity
    Sources,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Timing => write!(f, "timing"),
            Self::Sources => write!(f, "sources"),
        }
    }
}

/// A single lint issue
#[derive(Debug, Clone, PartialEq)]
pub struct LintIssue {
    severity: IssueSeverity,
    category: IssueCategory,
    rule_id: &'static str,
    message: String,
    /// Offending item, if the issue is tied to one
    index: Option<usize>,
    suggested_fix: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    #[must_use]
    pub const fn new(
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
            index: None,
            suggested_fix: None,
        }
    }

    /// Attach the offending item index
    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attach a suggested fix
    #[must_use]
    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    #[must_use]
    pub const fn severity(&self) -> IssueSeverity {
        self.severity
    }

    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.category
    }

    #[must_use]
    pub const fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn suggested_fix(&self) -> Option<&str> {
        self.suggested_fix.as_deref()
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.rule_id, self.message)?;
        if let Some(index) = self.index {
            write!(f, " (item {index})")?;
        }
        Ok(())
    }
}

/// Configuration for linting behavior
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Minimum severity level to report
    pub min_severity: IssueSeverity,
    /// Maximum number of issues to report (0 = unlimited)
    pub max_issues: usize,
    /// Enabled rule IDs (empty = all enabled)
    pub enabled_rules: Vec<&'static str>,
    /// Disabled rule IDs
    pub disabled_rules: Vec<&'static str>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_severity: IssueSeverity::Info,
            max_issues: 0,
            enabled_rules: Vec::new(),
            disabled_rules: Vec::new(),
        }
    }
}

impl LintConfig {
    /// Set minimum severity level
    #[must_use]
    pub const fn with_min_severity(mut self, severity: IssueSeverity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Set maximum number of issues
    #[must_use]
    pub const fn with_max_issues(mut self, max: usize) -> Self {
        self.max_issues = max;
        self
    }

    /// Disable a rule by id
    #[must_use]
    pub fn without_rule(mut self, rule_id: &'static str) -> Self {
        self.disabled_rules.push(rule_id);
        self
    }

    /// Check if a rule is enabled
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.disabled_rules.contains(&rule_id) {
            return false;
        }
        self.enabled_rules.is_empty() || self.enabled_rules.contains(&rule_id)
    }

    /// Check if severity should be reported
    #[must_use]
    pub fn should_report_severity(&self, severity: IssueSeverity) -> bool {
        severity >= self.min_severity
    }
}

/// What a rule gets to look at
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    pub items: &'a [Item],
    /// Source table, when one is available
    pub sources: Option<&'a SourceTable>,
}

impl<'a> LintContext<'a> {
    #[must_use]
    pub const fn new(items: &'a [Item]) -> Self {
        Self {
            items,
            sources: None,
        }
    }

    #[must_use]
    pub const fn with_sources(mut self, sources: &'a SourceTable) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// Trait for implementing lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Rule description
    fn description(&self) -> &'static str;

    /// Default severity level
    fn default_severity(&self) -> IssueSeverity;

    /// Issue category
    fn category(&self) -> IssueCategory;

    /// Check the items and return issues
    fn check(&self, context: &LintContext<'_>) -> Vec<LintIssue>;
}

/// Lint items with the given configuration
///
/// Runs all enabled built-in rules and returns the issues found, respecting
/// the configured severity floor and issue limit.
///
/// # Example
///
/// ```rust
/// use transcript_core::analysis::{lint_items, LintConfig, LintContext};
/// use transcript_core::Item;
///
/// let items = [Item::paragraph_start("A"), Item::word("hi", "s", 0.0, 0.0), Item::paragraph_end()];
/// let issues = lint_items(&LintContext::new(&items), &LintConfig::default());
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues[0].rule_id(), "zero-duration");
/// ```
#[must_use]
pub fn lint_items(context: &LintContext<'_>, config: &LintConfig) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    for rule in BuiltinRules::all_rules() {
        if !config.is_rule_enabled(rule.id()) {
            continue;
        }

        let mut rule_issues = rule.check(context);
        rule_issues.retain(|issue| config.should_report_severity(issue.severity()));
        issues.extend(rule_issues);

        if config.max_issues > 0 && issues.len() >= config.max_issues {
            issues.truncate(config.max_issues);
            break;
        }
    }

    issues
}

//! Structural analysis of item streams
//!
//! [`structure`] holds the well-formedness automaton every edited stream must
//! pass. [`linting`] layers configurable diagnostics on top of it for tooling
//! that wants every problem in a document rather than the first one.

pub mod linting;
pub mod structure;

pub use linting::{lint_items, IssueSeverity, LintConfig, LintContext, LintIssue, LintRule};
pub use structure::{validate_structure, StructureError, StructureRule, StructureState};

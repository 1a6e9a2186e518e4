//! Structural well-formedness automaton
//!
//! A stream is well formed when it opens with a paragraph start, closes with a
//! paragraph end, paragraphs do not nest, every content item sits inside a
//! paragraph and headings only appear between paragraphs.

use core::fmt;

use thiserror::Error;

use crate::model::{Boundary, Item};

/// Automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureState {
    /// Nothing consumed yet
    Start,
    /// Between paragraphs
    OutsideParagraph,
    /// Inside an open paragraph
    InParagraph,
    Accept,
    Reject,
}

/// The rule a rejected stream broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureRule {
    EmptyDocument,
    MissingLeadingStart,
    /// The last item closes nothing, e.g. a trailing heading
    MissingTrailingEnd,
    NestedParagraph,
    UnmatchedEnd,
    ContentOutsideParagraph,
    HeadingInsideParagraph,
    UnterminatedParagraph,
}

impl fmt::Display for StructureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EmptyDocument => "document contains no items",
            Self::MissingLeadingStart => "document must begin with a paragraph start",
            Self::MissingTrailingEnd => "document must end with a paragraph end",
            Self::NestedParagraph => "paragraph started inside another paragraph",
            Self::UnmatchedEnd => "paragraph end without a matching start",
            Self::ContentOutsideParagraph => "content item outside of a paragraph",
            Self::HeadingInsideParagraph => "heading inside a paragraph",
            Self::UnterminatedParagraph => "paragraph is never closed",
        };
        f.write_str(message)
    }
}

/// Diagnostic for a rejected stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{rule} (at item {index})")]
pub struct StructureError {
    pub rule: StructureRule,
    /// Index of the offending item, or the stream length for end-of-stream rules
    pub index: usize,
}

impl StructureError {
    /// Create a diagnostic
    #[must_use]
    pub const fn new(rule: StructureRule, index: usize) -> Self {
        Self { rule, index }
    }
}

impl StructureState {
    /// Feed one item
    ///
    /// Returns the next state, or the violated rule.
    pub fn step(self, item: &Item) -> Result<Self, StructureRule> {
        use StructureState::{Accept, InParagraph, OutsideParagraph, Reject, Start};

        match (self, item) {
            (Start, Item::ParagraphBoundary(Boundary::Start { .. }))
            | (OutsideParagraph, Item::ParagraphBoundary(Boundary::Start { .. })) => {
                Ok(InParagraph)
            }
            (Start, _) => Err(StructureRule::MissingLeadingStart),

            (InParagraph, Item::ParagraphBoundary(Boundary::End)) => Ok(OutsideParagraph),
            (InParagraph, Item::ParagraphBoundary(Boundary::Start { .. })) => {
                Err(StructureRule::NestedParagraph)
            }
            (InParagraph, Item::Heading { .. }) => Err(StructureRule::HeadingInsideParagraph),
            (InParagraph, _) => Ok(InParagraph),

            (OutsideParagraph, Item::Heading { .. }) => Ok(OutsideParagraph),
            (OutsideParagraph, Item::ParagraphBoundary(Boundary::End)) => {
                Err(StructureRule::UnmatchedEnd)
            }
            (OutsideParagraph, _) => Err(StructureRule::ContentOutsideParagraph),

            (Accept | Reject, _) => Ok(self),
        }
    }

    /// Resolve the state once the stream is exhausted
    pub fn finish(self, last: Option<&Item>) -> Result<Self, StructureRule> {
        match self {
            Self::Start => Err(StructureRule::EmptyDocument),
            Self::InParagraph => Err(StructureRule::UnterminatedParagraph),
            Self::OutsideParagraph if last.is_some_and(Item::is_paragraph_end) => Ok(Self::Accept),
            Self::OutsideParagraph => Err(StructureRule::MissingTrailingEnd),
            Self::Accept | Self::Reject => Ok(self),
        }
    }
}

/// Run the automaton over `items`
///
/// # Errors
///
/// Returns the first violated rule together with the offending index. Rules
/// detected at end of stream report `items.len()`.
///
/// # Example
///
/// ```rust
/// use transcript_core::{validate_structure, Item, StructureRule};
///
/// let orphan = [Item::word("hi", "s", 0.0, 1.0)];
/// let err = validate_structure(&orphan).unwrap_err();
/// assert_eq!(err.rule, StructureRule::MissingLeadingStart);
/// assert_eq!(err.index, 0);
/// ```
pub fn validate_structure(items: &[Item]) -> Result<(), StructureError> {
    let mut state = StructureState::Start;
    for (index, item) in items.iter().enumerate() {
        state = state
            .step(item)
            .map_err(|rule| StructureError::new(rule, index))?;
    }
    state
        .finish(items.last())
        .map(|_| ())
        .map_err(|rule| StructureError::new(rule, items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_of(items: &[Item]) -> Option<(StructureRule, usize)> {
        validate_structure(items).err().map(|e| (e.rule, e.index))
    }

    #[test]
    fn accepts_paragraphs_and_headings() {
        let items = [
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 1.0),
            Item::paragraph_end(),
            Item::heading("Part two"),
            Item::heading("Subsection"),
            Item::paragraph_start("B"),
            Item::artificial_silence(1.0),
            Item::paragraph_end(),
        ];
        assert_eq!(rule_of(&items), None);
    }

    #[test]
    fn empty_paragraph_is_well_formed() {
        let items = [Item::paragraph_start("A"), Item::paragraph_end()];
        assert_eq!(rule_of(&items), None);
    }

    #[test]
    fn rejects_empty_document() {
        assert_eq!(rule_of(&[]), Some((StructureRule::EmptyDocument, 0)));
    }

    #[test]
    fn rejects_leading_heading() {
        let items = [
            Item::heading("Intro"),
            Item::paragraph_start("A"),
            Item::paragraph_end(),
        ];
        assert_eq!(rule_of(&items), Some((StructureRule::MissingLeadingStart, 0)));
    }

    #[test]
    fn rejects_nesting() {
        let items = [
            Item::paragraph_start("A"),
            Item::paragraph_start("B"),
            Item::paragraph_end(),
        ];
        assert_eq!(rule_of(&items), Some((StructureRule::NestedParagraph, 1)));
    }

    #[test]
    fn rejects_orphan_content() {
        let items = [
            Item::paragraph_start("A"),
            Item::paragraph_end(),
            Item::silence("s", 0.0, 1.0),
        ];
        assert_eq!(
            rule_of(&items),
            Some((StructureRule::ContentOutsideParagraph, 2))
        );
    }

    #[test]
    fn rejects_heading_inside_paragraph() {
        let items = [
            Item::paragraph_start("A"),
            Item::heading("oops"),
            Item::paragraph_end(),
        ];
        assert_eq!(
            rule_of(&items),
            Some((StructureRule::HeadingInsideParagraph, 1))
        );
    }

    #[test]
    fn rejects_dangling_end() {
        let items = [
            Item::paragraph_start("A"),
            Item::paragraph_end(),
            Item::paragraph_end(),
        ];
        assert_eq!(rule_of(&items), Some((StructureRule::UnmatchedEnd, 2)));
    }

    #[test]
    fn rejects_unclosed_and_trailing_heading() {
        let unclosed = [Item::paragraph_start("A"), Item::word("a", "s", 0.0, 1.0)];
        assert_eq!(
            rule_of(&unclosed),
            Some((StructureRule::UnterminatedParagraph, 2))
        );

        let trailing = [
            Item::paragraph_start("A"),
            Item::paragraph_end(),
            Item::heading("Outro"),
        ];
        assert_eq!(
            rule_of(&trailing),
            Some((StructureRule::MissingTrailingEnd, 3))
        );
    }

    #[test]
    fn diagnostic_names_rule_and_index() {
        let err = StructureError::new(StructureRule::NestedParagraph, 4);
        assert_eq!(
            err.to_string(),
            "paragraph started inside another paragraph (at item 4)"
        );
    }
}

//! Time indexer
//!
//! Derives per-item attributes from the raw item sequence: the absolute start
//! time (sum of all preceding durations), the positional index, and the
//! paragraph the item lies in. Derived values are never stored; every read
//! recomputes them in a single O(n) pass.

use std::sync::Arc;

use crate::model::{Boundary, Item};
use crate::utils::EPSILON;

/// Paragraph an item belongs to
///
/// `start_index` is the absolute index of the paragraph's `Start` boundary and
/// doubles as the grouping key when a sequence is collected back into a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParagraphRef {
    pub start_index: usize,
    pub speaker: Arc<str>,
}

impl ParagraphRef {
    /// Create a paragraph reference
    pub fn new(start_index: usize, speaker: impl Into<Arc<str>>) -> Self {
        Self {
            start_index,
            speaker: speaker.into(),
        }
    }
}

/// An item with its derived timing
#[derive(Debug, Clone, PartialEq)]
pub struct TimedItem {
    pub item: Item,
    /// Sum of the durations of all preceding items
    pub absolute_start: f64,
    /// Position in the stream the item was indexed from
    pub absolute_index: usize,
    /// Enclosing paragraph, `None` outside paragraphs
    pub paragraph: Option<ParagraphRef>,
}

impl TimedItem {
    /// Duration of the wrapped item
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.item.duration()
    }

    /// End of the item's timed span
    #[must_use]
    pub fn absolute_end(&self) -> f64 {
        self.absolute_start + self.item.duration()
    }

    /// Speaker of the enclosing paragraph
    #[must_use]
    pub fn speaker(&self) -> Option<&str> {
        self.paragraph.as_ref().map(|p| &*p.speaker)
    }

    /// Drop the derived fields
    #[must_use]
    pub fn into_item(self) -> Item {
        self.item
    }
}

/// Lazy indexing iterator over a borrowed item slice
#[derive(Debug, Clone)]
pub struct Indexer<'a> {
    items: core::iter::Enumerate<core::slice::Iter<'a, Item>>,
    elapsed: f64,
    paragraph: Option<ParagraphRef>,
}

impl<'a> Indexer<'a> {
    /// Start indexing `items` at time zero
    #[must_use]
    pub fn new(items: &'a [Item]) -> Self {
        Self {
            items: items.iter().enumerate(),
            elapsed: 0.0,
            paragraph: None,
        }
    }
}

impl Iterator for Indexer<'_> {
    type Item = TimedItem;

    fn next(&mut self) -> Option<TimedItem> {
        let (index, item) = self.items.next()?;

        if let Item::ParagraphBoundary(Boundary::Start { speaker }) = item {
            self.paragraph = Some(ParagraphRef::new(index, speaker.as_str()));
        }
        let paragraph = match item {
            Item::ParagraphBoundary(Boundary::End) => self.paragraph.take(),
            Item::Heading { .. } => None,
            _ => self.paragraph.clone(),
        };

        if item.is_content() && item.duration() < EPSILON {
            tracing::debug!(index, kind = %item.kind(), "really short item");
        }

        let timed = TimedItem {
            item: item.clone(),
            absolute_start: self.elapsed,
            absolute_index: index,
            paragraph,
        };
        self.elapsed += item.duration();
        Some(timed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for Indexer<'_> {}

/// Index a raw item sequence
///
/// Total and O(n); an empty input yields an empty vector.
#[must_use]
pub fn index(items: &[Item]) -> Vec<TimedItem> {
    Indexer::new(items).collect()
}

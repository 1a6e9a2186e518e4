//! Owned item stream
//!
//! `ItemStream` is the document value every edit replaces wholesale. It is
//! deliberately a thin wrapper over `Vec<Item>`; derived views are produced on
//! demand through [`ItemStream::timed`].

use std::collections::BTreeSet;

use super::Item;
use crate::analysis::{validate_structure, StructureError};
use crate::stream::{self, ParagraphView, Sequence};
use crate::timing::{Indexer, TimedItem};
use crate::utils::EPSILON;

/// Ordered sequence of transcript items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStream {
    items: Vec<Item>,
}

impl ItemStream {
    /// Create an empty stream
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Wrap an item vector
    #[must_use]
    pub const fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Borrow the raw items
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume into the raw item vector
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stream has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Iterate over raw items
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Lazy timed view of the stream
    #[must_use]
    pub fn timed(&self) -> Sequence<Indexer<'_>> {
        Sequence::new(Indexer::new(&self.items))
    }

    /// Materialized timed view of the stream
    #[must_use]
    pub fn index(&self) -> Vec<TimedItem> {
        crate::timing::index(&self.items)
    }

    /// Content grouped by paragraph
    #[must_use]
    pub fn paragraphs(&self) -> Vec<ParagraphView> {
        stream::paragraphs(&self.items)
    }

    /// Distinct speakers in order of first appearance
    #[must_use]
    pub fn speakers(&self) -> Vec<&str> {
        stream::speakers(&self.items)
    }

    /// Total duration in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.items.iter().map(Item::duration).sum()
    }

    /// Run the structural automaton over the stream
    ///
    /// # Errors
    ///
    /// Returns the first violated rule and the offending index.
    pub fn validate(&self) -> Result<(), StructureError> {
        validate_structure(&self.items)
    }

    /// Distinct source ids referenced by words and silences, sorted
    #[must_use]
    pub fn source_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.source().map(|(id, _)| id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Point every word and silence backed by `from` at `to`
    ///
    /// Returns the number of items rewritten.
    pub fn rename_source(&mut self, from: &str, to: &str) -> usize {
        let mut renamed = 0;
        for item in &mut self.items {
            match item {
                Item::Word { source_id, .. } | Item::Silence { source_id, .. }
                    if *source_id == from =>
                {
                    *source_id = to.to_string();
                    renamed += 1;
                }
                _ => {}
            }
        }
        renamed
    }

    /// Remove content items whose duration is below [`EPSILON`]
    ///
    /// Returns the number of items removed.
    pub fn prune_zero_length(&mut self) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.is_structural() || item.duration() >= EPSILON);
        let removed = before - self.items.len();
        if removed > 0 {
            tracing::warn!(removed, "pruned zero-length items");
        }
        removed
    }

    /// Return a copy with zero-length content pruned
    #[must_use]
    pub fn pruned(mut self) -> Self {
        self.prune_zero_length();
        self
    }
}

impl From<Vec<Item>> for ItemStream {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for ItemStream {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ItemStream {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemStream {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

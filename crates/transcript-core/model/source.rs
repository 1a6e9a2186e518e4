//! Source table: raw media bytes keyed by source id
//!
//! Items reference sources by id only. The bytes are shared behind an `Arc`,
//! so subsetting or merging tables never copies media.

use ahash::AHashMap;
use std::sync::Arc;

use super::ItemStream;

/// Raw bytes of one media source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    bytes: Arc<[u8]>,
}

impl Source {
    /// Wrap raw media bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Media bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the source holds no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Mapping from source id to media
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    sources: AHashMap<String, Source>,
}

impl SourceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a source
    pub fn insert(&mut self, id: impl Into<String>, source: Source) -> Option<Source> {
        self.sources.insert(id.into(), source)
    }

    /// Look up a source by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// Whether `id` is present
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Number of sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source ids in sorted order
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over `(id, source)` pairs in sorted id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Source)> {
        let mut entries: Vec<(&str, &Source)> = self
            .sources
            .iter()
            .map(|(id, source)| (id.as_str(), source))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Sources referenced by `stream` that are absent from this table, sorted
    #[must_use]
    pub fn missing_for<'s>(&self, stream: &'s ItemStream) -> Vec<&'s str> {
        stream
            .source_ids()
            .into_iter()
            .filter(|id| !self.contains(id))
            .collect()
    }

    /// Table restricted to the sources `stream` references
    #[must_use]
    pub fn referenced_by(&self, stream: &ItemStream) -> Self {
        let sources = stream
            .source_ids()
            .into_iter()
            .filter_map(|id| self.sources.get(id).map(|s| (id.to_string(), s.clone())))
            .collect();
        Self { sources }
    }

    /// Move the source stored under `from` to `to`
    ///
    /// Returns `false` when there is nothing under `from`. An entry already
    /// stored under `to` is replaced.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
        match self.sources.remove(from) {
            Some(source) => {
                self.sources.insert(to.into(), source);
                true
            }
            None => false,
        }
    }

    /// Add every source of `other` not already present
    ///
    /// Ids present in both tables keep this table's bytes; callers pasting
    /// foreign content resolve conflicting ids before merging.
    pub fn merge(&mut self, other: &Self) {
        for (id, source) in &other.sources {
            self.sources
                .entry(id.clone())
                .or_insert_with(|| source.clone());
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Source)> for SourceTable {
    fn from_iter<T: IntoIterator<Item = (K, Source)>>(iter: T) -> Self {
        Self {
            sources: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn stream() -> ItemStream {
        ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("a", "one", 0.0, 1.0),
            Item::silence("two", 0.0, 1.0),
            Item::paragraph_end(),
        ])
    }

    #[test]
    fn referenced_subset_shares_bytes() {
        let table: SourceTable = [
            ("one", Source::new(vec![1_u8, 2])),
            ("two", Source::new(vec![3_u8])),
            ("unused", Source::new(vec![4_u8])),
        ]
        .into_iter()
        .collect();

        let subset = table.referenced_by(&stream());
        assert_eq!(subset.ids(), vec!["one", "two"]);
        assert!(std::ptr::eq(
            subset.get("one").unwrap().bytes(),
            table.get("one").unwrap().bytes()
        ));
    }

    #[test]
    fn reports_missing_sources() {
        let mut table = SourceTable::new();
        table.insert("one", Source::new(vec![0_u8]));
        assert_eq!(table.missing_for(&stream()), vec!["two"]);
    }

    #[test]
    fn rename_moves_bytes_to_new_id() {
        let mut table = SourceTable::new();
        table.insert("a", Source::new(vec![1_u8]));

        assert!(table.rename("a", "a~2"));
        assert!(!table.contains("a"));
        assert_eq!(table.get("a~2").unwrap().bytes(), &[1]);
        assert!(!table.rename("missing", "b"));
    }

    #[test]
    fn merge_keeps_existing_entries() {
        let mut left = SourceTable::new();
        left.insert("a", Source::new(vec![1_u8]));
        let mut right = SourceTable::new();
        right.insert("a", Source::new(vec![9_u8]));
        right.insert("b", Source::new(vec![2_u8]));

        left.merge(&right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.get("a").unwrap().bytes(), &[1]);
    }
}

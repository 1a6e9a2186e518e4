//! Copy and paste by value
//!
//! A clip is a self-contained slice of a document: a structurally valid item
//! stream plus exactly the sources it references. Clips are plain values, so
//! they can move between documents without sharing anything.

use tracing::debug;
use transcript_core::{Item, ItemStream, Source, SourceTable};

/// A copied slice of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clip {
    pub stream: ItemStream,
    pub sources: SourceTable,
}

impl Clip {
    /// Copy `[start, start + length)` out of `stream`
    ///
    /// Items straddling either edge are cut at the edge, paragraph boundaries
    /// are rebuilt around the copied content and slivers shorter than the
    /// comparison tolerance are dropped. Headings at either end of the slice
    /// are left out so the clip starts and ends on a paragraph boundary.
    #[must_use]
    pub fn copy_range(stream: &ItemStream, sources: &SourceTable, start: f64, length: f64) -> Self {
        let mut items = stream
            .timed()
            .exact_from(start)
            .exact_until(start + length)
            .collect()
            .pruned()
            .into_items();
        let leading = items
            .iter()
            .take_while(|item| matches!(item, Item::Heading { .. }))
            .count();
        items.drain(..leading);
        while matches!(items.last(), Some(Item::Heading { .. })) {
            items.pop();
        }

        let stream = ItemStream::from_items(items);
        let sources = sources.referenced_by(&stream);
        Self { stream, sources }
    }

    /// Prepare the clip for pasting into a document backed by `target`
    ///
    /// A clip source whose id is taken in `target` by different bytes moves
    /// to a fresh id, and the clip's items follow it. Sources shared with
    /// identical bytes keep their id.
    #[must_use]
    pub fn rebased_onto(&self, target: &SourceTable) -> Self {
        let mut clip = self.clone();
        for id in self.sources.ids() {
            let (Some(ours), Some(theirs)) = (self.sources.get(id), target.get(id)) else {
                continue;
            };
            if ours == theirs {
                continue;
            }
            let fresh = fresh_source_id(id, ours, target, &clip.sources);
            let items = clip.stream.rename_source(id, &fresh);
            clip.sources.rename(id, fresh.as_str());
            debug!(from = id, to = %fresh, items, "renamed conflicting clip source");
        }
        clip
    }

    /// Whether the clip carries no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Playing time of the clip
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.stream.duration()
    }
}

/// First `<id>~<n>` that is free in both tables or already holds `source`
/// in `target`
fn fresh_source_id(
    id: &str,
    source: &Source,
    target: &SourceTable,
    clip: &SourceTable,
) -> String {
    let mut n = 2;
    loop {
        let candidate = format!("{id}~{n}");
        let reusable = match target.get(&candidate) {
            Some(existing) => existing == source,
            None => true,
        };
        if reusable && !clip.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Holds the most recent copy
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    clip: Option<Clip>,
}

impl Clipboard {
    /// Create an empty clipboard
    #[must_use]
    pub const fn new() -> Self {
        Self { clip: None }
    }

    /// Replace the clipboard contents
    pub fn put(&mut self, clip: Clip) {
        self.clip = Some(clip);
    }

    /// Current clip, if anything was copied
    #[must_use]
    pub const fn clip(&self) -> Option<&Clip> {
        self.clip.as_ref()
    }

    /// Forget the current clip
    pub fn clear(&mut self) {
        self.clip = None;
    }

    /// Whether nothing was copied yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.clip.is_none()
    }
}

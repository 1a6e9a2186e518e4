//! Selection engine
//!
//! A selection covers a time range and remembers the item it was started on
//! (the anchor). The range always includes the anchor's own span and extends
//! past it on at most one side, so directional extension either grows that
//! side outward or pulls it back in. Repeated left and right extensions around
//! a fixed anchor therefore undo each other.

use transcript_core::{TimedItem, EPSILON};

/// A selected time range anchored at an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Absolute index of the anchor item
    pub start_item_index: usize,
    pub range_start: f64,
    pub range_length: f64,
}

impl Selection {
    /// Select exactly `item`
    #[must_use]
    pub fn of_item(item: &TimedItem) -> Self {
        Self {
            start_item_index: item.absolute_index,
            range_start: item.absolute_start,
            range_length: item.duration(),
        }
    }

    /// End of the selected range
    #[must_use]
    pub fn range_end(&self) -> f64 {
        self.range_start + self.range_length
    }

    /// Whether `item` lies entirely inside the range
    #[must_use]
    pub fn contains(&self, item: &TimedItem) -> bool {
        item.absolute_start >= self.range_start - EPSILON
            && item.absolute_end() <= self.range_end() + EPSILON
    }

    fn with_range(self, start: f64, end: f64) -> Self {
        Self {
            start_item_index: self.start_item_index,
            range_start: start,
            range_length: end - start,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    index: usize,
    start: f64,
    end: f64,
}

/// Neighbor lookups over the duration-bearing items of a document
///
/// Built once per document state; every query is a binary search.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    spans: Vec<Span>,
}

impl SelectionEngine {
    /// Index the duration-bearing items of `timed`
    #[must_use]
    pub fn new(timed: &[TimedItem]) -> Self {
        let spans = timed
            .iter()
            .filter(|t| t.item.is_content() && t.duration() > EPSILON)
            .map(|t| Span {
                index: t.absolute_index,
                start: t.absolute_start,
                end: t.absolute_end(),
            })
            .collect();
        Self { spans }
    }

    /// Last item starting before `time`
    fn last_starting_before(&self, time: f64) -> Option<Span> {
        let after = self.spans.partition_point(|s| s.start < time - EPSILON);
        after.checked_sub(1).map(|i| self.spans[i])
    }

    /// First item ending after `time`
    fn first_ending_after(&self, time: f64) -> Option<Span> {
        let before = self.spans.partition_point(|s| s.end <= time + EPSILON);
        self.spans.get(before).copied()
    }

    fn anchor(&self, selection: &Selection) -> (f64, f64) {
        self.spans
            .binary_search_by_key(&selection.start_item_index, |s| s.index)
            .map_or(
                (selection.range_start, selection.range_end()),
                |i| (self.spans[i].start, self.spans[i].end),
            )
    }

    fn select(span: Span) -> Selection {
        Selection {
            start_item_index: span.index,
            range_start: span.start,
            range_length: span.end - span.start,
        }
    }

    /// Extend towards the start of the document
    ///
    /// Without a selection this selects the item left of `cursor_time`. If the
    /// range reaches past the anchor on the right, the right end shrinks by one
    /// item; otherwise the left end grows by one item. At the document start
    /// the selection is returned unchanged.
    #[must_use]
    pub fn extend_left(&self, selection: Option<&Selection>, cursor_time: f64) -> Option<Selection> {
        let Some(selection) = selection else {
            return self.last_starting_before(cursor_time).map(Self::select);
        };
        let (_, anchor_end) = self.anchor(selection);
        let (start, end) = (selection.range_start, selection.range_end());

        if end > anchor_end + EPSILON {
            let last = self.last_starting_before(end);
            let new_end = last.map_or(anchor_end, |span| span.start.max(anchor_end));
            return Some(selection.with_range(start, new_end));
        }
        match self.last_starting_before(start) {
            Some(previous) => Some(selection.with_range(previous.start, end)),
            None => Some(*selection),
        }
    }

    /// Extend towards the end of the document
    ///
    /// Mirror image of [`SelectionEngine::extend_left`].
    #[must_use]
    pub fn extend_right(
        &self,
        selection: Option<&Selection>,
        cursor_time: f64,
    ) -> Option<Selection> {
        let Some(selection) = selection else {
            return self.first_ending_after(cursor_time).map(Self::select);
        };
        let (anchor_start, _) = self.anchor(selection);
        let (start, end) = (selection.range_start, selection.range_end());

        if start < anchor_start - EPSILON {
            let first = self.first_ending_after(start);
            let new_start = first.map_or(anchor_start, |span| span.end.min(anchor_start));
            return Some(selection.with_range(new_start, end));
        }
        match self.first_ending_after(end) {
            Some(next) => Some(selection.with_range(start, next.end)),
            None => Some(*selection),
        }
    }

    /// Resize the range to exactly reach `item`, keeping the anchor covered
    #[must_use]
    pub fn include_fully(&self, selection: Option<&Selection>, item: &TimedItem) -> Selection {
        let Some(selection) = selection else {
            return Selection::of_item(item);
        };
        let (anchor_start, anchor_end) = self.anchor(selection);

        if item.absolute_start < anchor_start - EPSILON {
            selection.with_range(item.absolute_start, anchor_end)
        } else if item.absolute_end() > anchor_end + EPSILON {
            selection.with_range(anchor_start, item.absolute_end())
        } else {
            selection.with_range(anchor_start, anchor_end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_core::{index, Item};

    fn words() -> Vec<TimedItem> {
        index(&[
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 1.0),
            Item::word("b", "s", 1.0, 1.0),
            Item::paragraph_end(),
            Item::paragraph_start("A"),
            Item::word("c", "s", 2.0, 1.0),
            Item::word("d", "s", 3.0, 1.0),
            Item::paragraph_end(),
        ])
    }

    fn range(selection: Option<Selection>) -> (f64, f64) {
        let s = selection.unwrap();
        (s.range_start, s.range_end())
    }

    #[test]
    fn first_extension_selects_neighbor_of_cursor() {
        let engine = SelectionEngine::new(&words());
        let left = engine.extend_left(None, 2.0).unwrap();
        assert_eq!(left.start_item_index, 2);
        assert_eq!(range(Some(left)), (1.0, 2.0));

        let right = engine.extend_right(None, 2.0).unwrap();
        assert_eq!(right.start_item_index, 5);

        assert!(engine.extend_left(None, 0.0).is_none());
        assert!(engine.extend_right(None, 4.0).is_none());
    }

    #[test]
    fn grows_then_shrinks_around_anchor() {
        let timed = words();
        let engine = SelectionEngine::new(&timed);
        let anchor = Some(Selection::of_item(&timed[5]));

        let grown = engine.extend_left(anchor.as_ref(), 0.0);
        assert_eq!(range(grown), (1.0, 3.0));
        let grown = engine.extend_left(grown.as_ref(), 0.0);
        assert_eq!(range(grown), (0.0, 3.0));
        let at_start = engine.extend_left(grown.as_ref(), 0.0);
        assert_eq!(range(at_start), (0.0, 3.0));

        let shrunk = engine.extend_right(grown.as_ref(), 0.0);
        assert_eq!(range(shrunk), (1.0, 3.0));
        let shrunk = engine.extend_right(shrunk.as_ref(), 0.0);
        assert_eq!(range(shrunk), (2.0, 3.0));
        let grown_right = engine.extend_right(shrunk.as_ref(), 0.0);
        assert_eq!(range(grown_right), (2.0, 4.0));
        let back = engine.extend_left(grown_right.as_ref(), 0.0);
        assert_eq!(range(back), (2.0, 3.0));
    }

    #[test]
    fn include_fully_keeps_anchor() {
        let timed = words();
        let engine = SelectionEngine::new(&timed);
        let anchor = Selection::of_item(&timed[2]);

        let left = engine.include_fully(Some(&anchor), &timed[1]);
        assert_eq!((left.range_start, left.range_end()), (0.0, 2.0));

        let right = engine.include_fully(Some(&left), &timed[6]);
        assert_eq!((right.range_start, right.range_end()), (1.0, 4.0));
        assert_eq!(right.start_item_index, 2);

        let back = engine.include_fully(Some(&right), &timed[2]);
        assert_eq!((back.range_start, back.range_end()), (1.0, 2.0));
    }

    #[test]
    fn contains_is_exact_containment() {
        let timed = words();
        let selection = Selection {
            start_item_index: 2,
            range_start: 0.5,
            range_length: 2.5,
        };
        let inside: Vec<usize> = timed
            .iter()
            .filter(|t| t.item.is_content() && selection.contains(t))
            .map(|t| t.absolute_index)
            .collect();
        assert_eq!(inside, vec![2, 5]);
    }
}

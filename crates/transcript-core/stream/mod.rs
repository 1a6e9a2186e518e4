//! Lazy query algebra over timed items
//!
//! [`Sequence`] wraps any iterator and composes operations by wrapping the
//! inner iterator, never by subclassing. Everything is pull-based: nothing runs
//! ahead of the consumer and a sequence can be dropped mid-traversal.
//!
//! ```rust
//! use transcript_core::{Item, ItemStream};
//!
//! let stream = ItemStream::from_items(vec![
//!     Item::paragraph_start("A"),
//!     Item::word("one", "s", 0.0, 1.0),
//!     Item::word("two", "s", 1.0, 1.0),
//!     Item::paragraph_end(),
//! ]);
//!
//! // The second half-second of "one" plus all of "two"
//! let tail = stream.timed().exact_from(0.5).collect();
//! assert_eq!(tail.len(), 4);
//! assert!((tail.duration() - 1.5).abs() < 1e-9);
//! ```

pub mod exact;
pub mod paragraphs;

use core::iter::{Chain, Filter, Map};

use crate::model::{Boundary, Item, ItemStream};
use crate::render::RenderSegments;
use crate::timing::{index, ParagraphRef, TimedItem};
use crate::utils::EPSILON;

pub use exact::{ExactFrom, ExactUntil};
pub use paragraphs::{paragraphs, speakers, ParagraphView};

/// Anything occupying a span on the document timeline
pub trait TimeSpan {
    /// Start on the document timeline
    fn absolute_start(&self) -> f64;

    /// Length of the span
    fn duration(&self) -> f64;

    /// End of the span
    fn absolute_end(&self) -> f64 {
        self.absolute_start() + self.duration()
    }

    /// Zero-duration items that open a group travel with the later side of a cut
    fn opens_group(&self) -> bool {
        false
    }

    /// Drop `by` seconds from the leading edge
    fn trim_leading(&mut self, by: f64);

    /// Shorten the span to `duration`
    fn trim_trailing(&mut self, duration: f64);
}

impl TimeSpan for TimedItem {
    fn absolute_start(&self) -> f64 {
        self.absolute_start
    }

    fn duration(&self) -> f64 {
        self.item.duration()
    }

    fn opens_group(&self) -> bool {
        matches!(
            self.item,
            Item::ParagraphBoundary(Boundary::Start { .. }) | Item::Heading { .. }
        )
    }

    fn trim_leading(&mut self, by: f64) {
        self.item.trim_leading(by);
        self.absolute_start += by;
    }

    fn trim_trailing(&mut self, duration: f64) {
        self.item.set_duration(duration);
    }
}

/// Whether `item`'s span contains `time`
///
/// Duration-bearing spans are half-open and shifted by [`EPSILON`], so a time on
/// the edge between two items belongs to the later one only. Zero-duration
/// items match when they sit on `time`.
pub(crate) fn covers<T: TimeSpan>(item: &T, time: f64) -> bool {
    let start = item.absolute_start();
    if item.duration() <= 0.0 {
        (start - time).abs() <= EPSILON
    } else {
        start - EPSILON <= time && time < item.absolute_end() - EPSILON
    }
}

/// Lazy, composable sequence
#[derive(Debug, Clone)]
#[must_use = "sequences are lazy and do nothing unless consumed"]
pub struct Sequence<I> {
    inner: I,
}

impl<I: Iterator> Sequence<I> {
    /// Wrap an iterator
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: iter.into_iter(),
        }
    }

    /// Keep items matching `predicate`, preserving order
    pub fn filter<P>(self, predicate: P) -> Sequence<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Sequence {
            inner: self.inner.filter(predicate),
        }
    }

    /// Transform each item in place of order
    pub fn map<B, F>(self, f: F) -> Sequence<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Sequence {
            inner: self.inner.map(f),
        }
    }

    /// Concatenate with `other`
    ///
    /// Absolute attributes are not renormalized; re-derive them afterwards
    /// (for timed items, [`Sequence::collect_timed`]).
    pub fn chain<J>(self, other: J) -> Sequence<Chain<I, J::IntoIter>>
    where
        J: IntoIterator<Item = I::Item>,
    {
        Sequence {
            inner: self.inner.chain(other),
        }
    }

    /// Materialize the items as they are
    #[must_use]
    pub fn to_vec(self) -> Vec<I::Item> {
        self.inner.collect()
    }
}

impl<I> Sequence<I>
where
    I: Iterator,
    I::Item: TimeSpan,
{
    /// Drop everything before `time`, truncating the item straddling it
    pub fn exact_from(self, time: f64) -> Sequence<ExactFrom<I>> {
        Sequence {
            inner: ExactFrom::new(self.inner, time),
        }
    }

    /// Drop everything after `time`, truncating the item straddling it
    pub fn exact_until(self, time: f64) -> Sequence<ExactUntil<I>> {
        Sequence {
            inner: ExactUntil::new(self.inner, time),
        }
    }

    /// Items whose span contains `time`
    ///
    /// Scans to the first covering item and stops after the covering run.
    /// A run made only of zero-duration items (e.g. the closing boundary at
    /// the very end of the document) counts as no match.
    #[must_use]
    pub fn items_at_time(self, time: f64) -> Vec<I::Item> {
        let run: Vec<I::Item> = self
            .inner
            .skip_while(|item| !covers(item, time))
            .take_while(|item| covers(item, time))
            .collect();
        if run.iter().any(|item| item.duration() > 0.0) {
            run
        } else {
            Vec::new()
        }
    }
}

impl<I> Sequence<I>
where
    I: Iterator<Item = TimedItem>,
{
    /// Materialize into an item stream, re-deriving paragraph boundaries
    ///
    /// Boundaries are re-emitted from paragraph keys rather than copied: a
    /// `Start`/`End` pair surrounds every run of items sharing a key. A start
    /// boundary opens its paragraph even when no content follows, so empty
    /// paragraphs survive. An end boundary only closes the paragraph it
    /// belongs to. Content items without a paragraph are passed through
    /// unchanged so validation can reject them.
    #[must_use]
    pub fn collect(self) -> ItemStream {
        let mut items = Vec::new();
        let mut open: Option<usize> = None;

        for timed in self.inner {
            match timed.item {
                Item::ParagraphBoundary(Boundary::Start { .. }) => {
                    if let Some(paragraph) = &timed.paragraph {
                        open_paragraph(&mut items, &mut open, paragraph);
                    }
                }
                Item::ParagraphBoundary(Boundary::End) => {
                    let closes = timed
                        .paragraph
                        .as_ref()
                        .is_some_and(|paragraph| open == Some(paragraph.start_index));
                    if closes {
                        items.push(Item::paragraph_end());
                        open = None;
                    }
                }
                Item::Heading { .. } => {
                    if open.take().is_some() {
                        items.push(Item::paragraph_end());
                    }
                    items.push(timed.item);
                }
                Item::Word { .. } | Item::Silence { .. } | Item::ArtificialSilence { .. } => {
                    match &timed.paragraph {
                        Some(paragraph) => open_paragraph(&mut items, &mut open, paragraph),
                        None => {
                            if open.take().is_some() {
                                items.push(Item::paragraph_end());
                            }
                        }
                    }
                    items.push(timed.item);
                }
            }
        }
        if open.is_some() {
            items.push(Item::paragraph_end());
        }
        ItemStream::from_items(items)
    }

    /// Materialize and re-index
    #[must_use]
    pub fn collect_timed(self) -> Vec<TimedItem> {
        index(self.collect().items())
    }

    /// Coalesce into render segments
    pub fn render_segments(self) -> RenderSegments<I> {
        RenderSegments::new(self.inner)
    }
}

/// Close whatever paragraph is open and open `paragraph`, unless it already is
fn open_paragraph(items: &mut Vec<Item>, open: &mut Option<usize>, paragraph: &ParagraphRef) {
    if *open == Some(paragraph.start_index) {
        return;
    }
    if open.is_some() {
        items.push(Item::paragraph_end());
    }
    items.push(Item::paragraph_start(&*paragraph.speaker));
    *open = Some(paragraph.start_index);
}

impl<I: Iterator> IntoIterator for Sequence<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.inner
    }
}

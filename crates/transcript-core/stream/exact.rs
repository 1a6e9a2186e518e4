//! Sub-item exact slicing by time
//!
//! Cutting a sequence at time `t` places every item on one side of the cut.
//! Items ending at or before `t` go left, items starting at or after `t` go
//! right and the single item straddling `t` is split in two. Zero-duration
//! items that open a group (paragraph starts, headings) go right when they sit
//! on the cut, closing boundaries go left. Because the classification is
//! shared, `exact_until(t)` and `exact_from(t)` are exact complements.

use super::TimeSpan;
use crate::utils::EPSILON;

/// Where an item falls relative to a cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Before,
    After,
    Straddles,
}

pub(crate) fn place<T: TimeSpan>(item: &T, time: f64) -> Placement {
    let start = item.absolute_start();
    if item.opens_group() && start >= time - EPSILON {
        return Placement::After;
    }
    if item.absolute_end() <= time + EPSILON {
        Placement::Before
    } else if start >= time - EPSILON {
        Placement::After
    } else {
        Placement::Straddles
    }
}

/// Iterator adapter dropping everything before a time
///
/// Created by [`super::Sequence::exact_from`].
#[derive(Debug, Clone)]
#[must_use = "sequences are lazy and do nothing unless consumed"]
pub struct ExactFrom<I> {
    inner: I,
    time: f64,
}

impl<I> ExactFrom<I> {
    pub(crate) const fn new(inner: I, time: f64) -> Self {
        Self { inner, time }
    }
}

impl<I> Iterator for ExactFrom<I>
where
    I: Iterator,
    I::Item: TimeSpan,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut item = self.inner.next()?;
            match place(&item, self.time) {
                Placement::Before => continue,
                Placement::After => return Some(item),
                Placement::Straddles => {
                    let overlap = self.time - item.absolute_start();
                    item.trim_leading(overlap);
                    return Some(item);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Iterator adapter dropping everything after a time
///
/// Created by [`super::Sequence::exact_until`].
#[derive(Debug, Clone)]
#[must_use = "sequences are lazy and do nothing unless consumed"]
pub struct ExactUntil<I> {
    inner: I,
    time: f64,
}

impl<I> ExactUntil<I> {
    pub(crate) const fn new(inner: I, time: f64) -> Self {
        Self { inner, time }
    }
}

impl<I> Iterator for ExactUntil<I>
where
    I: Iterator,
    I::Item: TimeSpan,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut item = self.inner.next()?;
            match place(&item, self.time) {
                Placement::Before => return Some(item),
                Placement::After => continue,
                Placement::Straddles => {
                    let kept = self.time - item.absolute_start();
                    item.trim_trailing(kept);
                    return Some(item);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

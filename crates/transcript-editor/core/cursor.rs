//! Cursor positioning
//!
//! The cursor is either placed by the user between items or driven by the
//! player as a free-running time. Valid user positions are in front of a
//! content item or in front of a paragraph end, i.e. never on a paragraph start
//! or heading.

use transcript_core::{Item, TimedItem, EPSILON};

/// Where the cursor is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cursor {
    /// Placed by the user in front of the item at `index`
    User { index: usize },
    /// Driven by playback
    Player { time: f64 },
}

impl Default for Cursor {
    fn default() -> Self {
        Self::User { index: 0 }
    }
}

/// Whether the cursor may rest in front of `item`
#[must_use]
pub const fn is_cursor_position(item: &Item) -> bool {
    item.is_content() || item.is_paragraph_end()
}

/// First valid user position in `items`
#[must_use]
pub fn first_possible_cursor_position(items: &[Item]) -> usize {
    items.iter().position(is_cursor_position).unwrap_or(0)
}

impl Cursor {
    /// Index of the item under the cursor
    ///
    /// For a player cursor this is the last item starting at or before the
    /// cursor time.
    #[must_use]
    pub fn current_index(&self, timed: &[TimedItem]) -> Option<usize> {
        if timed.is_empty() {
            return None;
        }
        match *self {
            Self::User { index } => Some(index.min(timed.len() - 1)),
            Self::Player { time } => {
                let after = timed.partition_point(|t| t.absolute_start <= time + EPSILON);
                Some(after.saturating_sub(1))
            }
        }
    }

    /// Item under the cursor
    #[must_use]
    pub fn current_item<'a>(&self, timed: &'a [TimedItem]) -> Option<&'a TimedItem> {
        self.current_index(timed).and_then(|index| timed.get(index))
    }

    /// Cursor time on the document timeline
    #[must_use]
    pub fn current_time(&self, timed: &[TimedItem]) -> f64 {
        match *self {
            Self::Player { time } => time,
            Self::User { .. } => self
                .current_item(timed)
                .map_or(0.0, |item| item.absolute_start),
        }
    }

    /// Nearest valid user position at or after the cursor
    #[must_use]
    pub fn position(&self, timed: &[TimedItem]) -> Option<usize> {
        let current = self.current_index(timed)?;
        timed[current..]
            .iter()
            .find(|t| is_cursor_position(&t.item))
            .map(|t| t.absolute_index)
    }

    /// Move one position to the left
    ///
    /// A player cursor inside an item first snaps to that item's start.
    #[must_use]
    pub fn go_left(&self, timed: &[TimedItem]) -> Self {
        let Some(current) = self.current_index(timed) else {
            return *self;
        };
        if let Self::Player { time } = *self {
            let item = &timed[current];
            if is_cursor_position(&item.item) && time > item.absolute_start + EPSILON {
                return Self::User { index: current };
            }
        }
        timed[..current]
            .iter()
            .rev()
            .find(|t| is_cursor_position(&t.item))
            .map_or(*self, |t| Self::User {
                index: t.absolute_index,
            })
    }

    /// Move one position to the right
    #[must_use]
    pub fn go_right(&self, timed: &[TimedItem]) -> Self {
        let Some(current) = self.current_index(timed) else {
            return *self;
        };
        timed[current + 1..]
            .iter()
            .find(|t| is_cursor_position(&t.item))
            .map_or(*self, |t| Self::User {
                index: t.absolute_index,
            })
    }
}

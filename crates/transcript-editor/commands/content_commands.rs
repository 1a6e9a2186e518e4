//! Content commands
//!
//! Deleting time ranges, retexting words and pasting clips. None of these
//! ever removes a paragraph boundary; paste adds boundaries when it has to
//! split a paragraph.

use super::{CommandResult, TranscriptCommand};
use crate::core::{Clip, Result};
use transcript_core::{rough_eq, Item, ItemStream, EPSILON};

/// Remove the content items lying entirely inside a time range
///
/// Items only partly inside the range are kept whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteRange {
    pub start: f64,
    pub length: f64,
}

impl DeleteRange {
    /// Create a new delete range command
    #[must_use]
    pub const fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }
}

impl TranscriptCommand for DeleteRange {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        let end = self.start + self.length;
        let mut first_removed = None;
        let mut kept = Vec::with_capacity(stream.len());

        for timed in stream.timed() {
            let inside = timed.item.is_content()
                && timed.absolute_start >= self.start - EPSILON
                && timed.absolute_end() <= end + EPSILON;
            if inside {
                first_removed.get_or_insert(kept.len());
            } else {
                kept.push(timed.into_item());
            }
        }

        Ok(match first_removed {
            Some(cursor) => CommandResult::changed(kept.into()).with_cursor(cursor),
            None => CommandResult::unchanged(),
        })
    }

    fn description(&self) -> &str {
        "Delete range"
    }
}

/// Replace the text of the word starting at a time
#[derive(Debug, Clone, PartialEq)]
pub struct RetextWord {
    pub absolute_start: f64,
    pub text: String,
}

impl RetextWord {
    /// Create a new retext command
    pub fn new(absolute_start: f64, text: impl Into<String>) -> Self {
        Self {
            absolute_start,
            text: text.into(),
        }
    }
}

impl TranscriptCommand for RetextWord {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        let target = stream.timed().into_iter().find(|timed| {
            matches!(timed.item, Item::Word { .. })
                && rough_eq(timed.absolute_start, self.absolute_start)
        });
        let Some(target) = target else {
            return Ok(CommandResult::unchanged());
        };

        let mut items = stream.items().to_vec();
        if let Item::Word { text, .. } = &mut items[target.absolute_index] {
            if *text == self.text {
                return Ok(CommandResult::unchanged());
            }
            text.clone_from(&self.text);
        }
        Ok(CommandResult::changed(items.into()))
    }

    fn description(&self) -> &str {
        "Retext word"
    }
}

/// Insert a clip in front of the item at `index`
///
/// Inside a paragraph the paragraph is split around the clip, with the part
/// after the clip keeping the original speaker. Right after a paragraph start
/// or right before a paragraph end the clip goes next to the paragraph
/// instead of splitting off an empty part. Sources are merged by the
/// document, not by this command.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteClip {
    pub index: usize,
    pub clip: Clip,
}

impl PasteClip {
    /// Create a new paste command
    #[must_use]
    pub const fn new(index: usize, clip: Clip) -> Self {
        Self { index, clip }
    }
}

impl TranscriptCommand for PasteClip {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        if self.clip.is_empty() {
            return Ok(CommandResult::unchanged());
        }
        let items = stream.items();
        let index = self.index.min(items.len());
        let clip = self.clip.stream.items();
        let mut edited = Vec::with_capacity(items.len() + clip.len() + 2);

        let after_start = index > 0 && items[index - 1].is_paragraph_start();
        let before_end = items.get(index).is_some_and(Item::is_paragraph_end);
        let speaker = if after_start || before_end {
            None
        } else {
            stream
                .timed()
                .into_iter()
                .nth(index)
                .filter(|timed| timed.item.is_content())
                .and_then(|timed| timed.paragraph)
                .map(|paragraph| paragraph.speaker)
        };

        let cursor = match speaker {
            Some(speaker) => {
                edited.extend_from_slice(&items[..index]);
                edited.push(Item::paragraph_end());
                edited.extend_from_slice(clip);
                edited.push(Item::paragraph_start(&*speaker));
                let cursor = edited.len();
                edited.extend_from_slice(&items[index..]);
                cursor
            }
            None => {
                let at = if after_start {
                    index - 1
                } else if before_end {
                    index + 1
                } else {
                    index
                };
                edited.extend_from_slice(&items[..at]);
                edited.extend_from_slice(clip);
                let cursor = edited.len();
                edited.extend_from_slice(&items[at..]);
                cursor
            }
        };

        Ok(CommandResult::changed(edited.into()).with_cursor(cursor))
    }

    fn description(&self) -> &str {
        "Paste"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stream() -> ItemStream {
        ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("one", "s", 0.0, 1.0),
            Item::silence("s", 1.0, 0.5),
            Item::word("two", "s", 1.5, 1.0),
            Item::paragraph_end(),
        ])
    }

    fn clip() -> Clip {
        Clip {
            stream: ItemStream::from_items(vec![
                Item::paragraph_start("B"),
                Item::word("new", "t", 0.0, 1.0),
                Item::paragraph_end(),
            ]),
            ..Clip::default()
        }
    }

    #[test]
    fn delete_keeps_partial_overlaps() {
        let result = DeleteRange::new(0.5, 1.5).apply(&stream()).unwrap();
        assert_eq!(result.new_cursor, Some(2));
        assert_eq!(
            result.stream.unwrap().into_items(),
            vec![
                Item::paragraph_start("A"),
                Item::word("one", "s", 0.0, 1.0),
                Item::word("two", "s", 1.5, 1.0),
                Item::paragraph_end(),
            ]
        );
        assert!(!DeleteRange::new(0.2, 0.5).apply(&stream()).unwrap().content_changed);
    }

    #[test]
    fn delete_never_drops_boundaries() {
        let result = DeleteRange::new(0.0, 10.0).apply(&stream()).unwrap();
        let items = result.stream.unwrap();
        assert_eq!(
            items.items(),
            &[Item::paragraph_start("A"), Item::paragraph_end()]
        );
        assert!(items.validate().is_ok());
    }

    #[test]
    fn retext_matches_start_time() {
        let result = RetextWord::new(1.5005, "too").apply(&stream()).unwrap();
        let items = result.stream.unwrap();
        assert_eq!(items.get(3).and_then(Item::text), Some("too"));

        assert!(!RetextWord::new(1.0, "x").apply(&stream()).unwrap().content_changed);
        assert!(!RetextWord::new(1.5, "two").apply(&stream()).unwrap().content_changed);
    }

    #[test]
    fn paste_splits_paragraph() {
        let result = PasteClip::new(2, clip()).apply(&stream()).unwrap();
        assert_eq!(result.new_cursor, Some(7));
        let items = result.stream.unwrap();
        assert_eq!(
            items.items(),
            &[
                Item::paragraph_start("A"),
                Item::word("one", "s", 0.0, 1.0),
                Item::paragraph_end(),
                Item::paragraph_start("B"),
                Item::word("new", "t", 0.0, 1.0),
                Item::paragraph_end(),
                Item::paragraph_start("A"),
                Item::silence("s", 1.0, 0.5),
                Item::word("two", "s", 1.5, 1.0),
                Item::paragraph_end(),
            ]
        );
        assert!(items.validate().is_ok());
    }

    #[test]
    fn paste_at_paragraph_edges_does_not_split() {
        let front = PasteClip::new(1, clip()).apply(&stream()).unwrap();
        let front = front.stream.unwrap();
        assert_eq!(front.items()[0], Item::paragraph_start("B"));
        assert_eq!(front.len(), 8);
        assert!(front.validate().is_ok());

        let back = PasteClip::new(4, clip()).apply(&stream()).unwrap();
        let back = back.stream.unwrap();
        assert_eq!(back.items()[5], Item::paragraph_start("B"));
        assert!(back.validate().is_ok());

        let empty = PasteClip::new(1, Clip::default()).apply(&stream()).unwrap();
        assert!(!empty.content_changed);
    }
}

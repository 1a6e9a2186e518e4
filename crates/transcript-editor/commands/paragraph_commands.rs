//! Paragraph structure commands
//!
//! Inserting and removing paragraph breaks, and rewriting the speakers that
//! paragraph starts carry.

use super::{CommandResult, TranscriptCommand};
use crate::core::{EditorError, Result};
use transcript_core::{rough_eq, Boundary, Item, ItemStream, TimedItem};

/// First content item whose span contains `time`
fn content_at_time(stream: &ItemStream, time: f64) -> Option<TimedItem> {
    stream
        .timed()
        .items_at_time(time)
        .into_iter()
        .find(|t| t.item.is_content())
}

/// Split the paragraph at `time` into two with the same speaker
///
/// Breaks are only placed between whole items: a time inside an item snaps to
/// whichever edge of that item is nearer. A break at an existing paragraph
/// edge changes nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertParagraphBreak {
    pub time: f64,
}

impl InsertParagraphBreak {
    /// Create a new insert paragraph break command
    #[must_use]
    pub const fn new(time: f64) -> Self {
        Self { time }
    }
}

impl TranscriptCommand for InsertParagraphBreak {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        let Some(hit) = content_at_time(stream, self.time) else {
            if rough_eq(self.time, stream.duration()) {
                return Ok(CommandResult::unchanged());
            }
            return Err(EditorError::NoItemAtTime { time: self.time });
        };
        let Some(speaker) = hit.speaker() else {
            return Ok(CommandResult::unchanged());
        };

        let at = if self.time - hit.absolute_start <= hit.absolute_end() - self.time {
            hit.absolute_index
        } else {
            hit.absolute_index + 1
        };
        let items = stream.items();
        let after_start = at > 0 && items[at - 1].is_paragraph_start();
        let before_end = items.get(at).is_some_and(Item::is_paragraph_end);
        if after_start || before_end {
            return Ok(CommandResult::unchanged());
        }

        let mut edited = Vec::with_capacity(items.len() + 2);
        edited.extend_from_slice(&items[..at]);
        edited.push(Item::paragraph_end());
        edited.push(Item::paragraph_start(speaker));
        edited.extend_from_slice(&items[at..]);
        Ok(CommandResult::changed(edited.into()).with_cursor(at + 2))
    }

    fn description(&self) -> &str {
        "Insert paragraph break"
    }
}

/// Where a paragraph break to remove is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakLocation {
    /// The break in front of the paragraph containing this time
    Time(f64),
    /// The break in front of the paragraph starting at this item index
    Paragraph(usize),
}

/// Merge a paragraph into the one before it
///
/// Fails with a conflict when the paragraphs have different speakers, when a
/// heading separates them or when there is no previous paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoveParagraphBreak {
    pub location: BreakLocation,
}

impl RemoveParagraphBreak {
    /// Remove the break in front of the paragraph at `time`
    #[must_use]
    pub const fn at_time(time: f64) -> Self {
        Self {
            location: BreakLocation::Time(time),
        }
    }

    /// Remove the break in front of the paragraph starting at `index`
    #[must_use]
    pub const fn before_paragraph(index: usize) -> Self {
        Self {
            location: BreakLocation::Paragraph(index),
        }
    }

    fn paragraph_start(&self, stream: &ItemStream) -> Result<usize> {
        match self.location {
            BreakLocation::Time(time) => content_at_time(stream, time)
                .and_then(|hit| hit.paragraph)
                .map(|paragraph| paragraph.start_index)
                .ok_or(EditorError::NoItemAtTime { time }),
            BreakLocation::Paragraph(index) => {
                if stream.get(index).is_some_and(Item::is_paragraph_start) {
                    Ok(index)
                } else {
                    Err(EditorError::NotAParagraphStart { index })
                }
            }
        }
    }
}

impl TranscriptCommand for RemoveParagraphBreak {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        let start = self.paragraph_start(stream)?;
        let items = stream.items();
        if start == 0 {
            return Err(EditorError::NoPreviousParagraph);
        }
        match &items[start - 1] {
            Item::Heading { .. } => return Err(EditorError::HeadingBetweenParagraphs),
            Item::ParagraphBoundary(Boundary::End) => {}
            _ => return Err(EditorError::NoPreviousParagraph),
        }

        let left = items[..start - 1]
            .iter()
            .rev()
            .find_map(Item::speaker)
            .ok_or(EditorError::NoPreviousParagraph)?;
        let right = items[start].speaker().unwrap_or_default();
        if left != right {
            return Err(EditorError::SpeakerMismatch {
                left: left.to_string(),
                right: right.to_string(),
            });
        }

        let mut edited = Vec::with_capacity(items.len() - 2);
        edited.extend_from_slice(&items[..start - 1]);
        edited.extend_from_slice(&items[start + 1..]);
        Ok(CommandResult::changed(edited.into()).with_cursor(start - 1))
    }

    fn description(&self) -> &str {
        "Remove paragraph break"
    }
}

/// Give one paragraph a different speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignSpeaker {
    /// Index of the paragraph's start boundary
    pub paragraph_index: usize,
    pub speaker: String,
}

impl ReassignSpeaker {
    /// Create a new reassign speaker command
    pub fn new(paragraph_index: usize, speaker: impl Into<String>) -> Self {
        Self {
            paragraph_index,
            speaker: speaker.into(),
        }
    }
}

impl TranscriptCommand for ReassignSpeaker {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        let index = self.paragraph_index;
        match stream.get(index).and_then(Item::speaker) {
            None => Err(EditorError::NotAParagraphStart { index }),
            Some(current) if current == self.speaker => Ok(CommandResult::unchanged()),
            Some(_) => {
                let mut items = stream.items().to_vec();
                items[index] = Item::paragraph_start(self.speaker.as_str());
                Ok(CommandResult::changed(items.into()))
            }
        }
    }

    fn description(&self) -> &str {
        "Reassign speaker"
    }
}

/// Rename a speaker everywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSpeaker {
    pub from: String,
    pub to: String,
}

impl RenameSpeaker {
    /// Create a new rename speaker command
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl TranscriptCommand for RenameSpeaker {
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
        if self.from == self.to || !stream.speakers().contains(&self.from.as_str()) {
            return Ok(CommandResult::unchanged());
        }
        let items: ItemStream = stream
            .iter()
            .map(|item| match item.speaker() {
                Some(speaker) if speaker == self.from => Item::paragraph_start(self.to.as_str()),
                _ => item.clone(),
            })
            .collect();
        Ok(CommandResult::changed(items))
    }

    fn description(&self) -> &str {
        "Rename speaker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_paragraphs(second: &str) -> ItemStream {
        ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("hi", "s", 0.0, 1.0),
            Item::paragraph_end(),
            Item::paragraph_start(second),
            Item::word("there", "s", 1.0, 1.0),
            Item::paragraph_end(),
        ])
    }

    fn edited(result: CommandResult) -> Vec<Item> {
        result.stream.unwrap().into_items()
    }

    #[test]
    fn remove_break_merges_same_speaker() {
        let result = RemoveParagraphBreak::at_time(1.0)
            .apply(&two_paragraphs("A"))
            .unwrap();
        assert_eq!(result.new_cursor, Some(2));
        assert_eq!(
            edited(result),
            vec![
                Item::paragraph_start("A"),
                Item::word("hi", "s", 0.0, 1.0),
                Item::word("there", "s", 1.0, 1.0),
                Item::paragraph_end(),
            ]
        );
    }

    #[test]
    fn remove_break_rejects_other_speaker() {
        let err = RemoveParagraphBreak::at_time(1.0)
            .apply(&two_paragraphs("B"))
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::SpeakerMismatch {
                left: "A".to_string(),
                right: "B".to_string()
            }
        );
    }

    #[test]
    fn remove_break_conflicts() {
        let stream = two_paragraphs("A");
        assert_eq!(
            RemoveParagraphBreak::at_time(0.5).apply(&stream).unwrap_err(),
            EditorError::NoPreviousParagraph
        );
        assert_eq!(
            RemoveParagraphBreak::before_paragraph(1)
                .apply(&stream)
                .unwrap_err(),
            EditorError::NotAParagraphStart { index: 1 }
        );

        let with_heading = ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("hi", "s", 0.0, 1.0),
            Item::paragraph_end(),
            Item::heading("Part two"),
            Item::paragraph_start("A"),
            Item::word("there", "s", 1.0, 1.0),
            Item::paragraph_end(),
        ]);
        assert_eq!(
            RemoveParagraphBreak::before_paragraph(4)
                .apply(&with_heading)
                .unwrap_err(),
            EditorError::HeadingBetweenParagraphs
        );
    }

    #[test]
    fn insert_break_snaps_to_nearest_edge() {
        let stream = ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("one", "s", 0.0, 1.0),
            Item::word("two", "s", 1.0, 1.0),
            Item::paragraph_end(),
        ]);
        let expected = vec![
            Item::paragraph_start("A"),
            Item::word("one", "s", 0.0, 1.0),
            Item::paragraph_end(),
            Item::paragraph_start("A"),
            Item::word("two", "s", 1.0, 1.0),
            Item::paragraph_end(),
        ];

        let late = InsertParagraphBreak::new(0.8).apply(&stream).unwrap();
        assert_eq!(late.new_cursor, Some(4));
        assert_eq!(edited(late), expected);
        let early = InsertParagraphBreak::new(1.2).apply(&stream).unwrap();
        assert_eq!(edited(early), expected);
    }

    #[test]
    fn insert_break_at_paragraph_edges_is_noop() {
        let stream = two_paragraphs("A");
        for time in [0.0, 0.2, 0.9, 1.0, 2.0] {
            let result = InsertParagraphBreak::new(time).apply(&stream).unwrap();
            assert!(!result.content_changed, "break at {time}");
        }
        assert_eq!(
            InsertParagraphBreak::new(5.0).apply(&stream).unwrap_err(),
            EditorError::NoItemAtTime { time: 5.0 }
        );
    }

    #[test]
    fn speakers_are_rewritten() {
        let stream = two_paragraphs("B");
        let reassigned = edited(ReassignSpeaker::new(3, "A").apply(&stream).unwrap());
        assert_eq!(reassigned[3], Item::paragraph_start("A"));
        assert_eq!(
            ReassignSpeaker::new(1, "A").apply(&stream).unwrap_err(),
            EditorError::NotAParagraphStart { index: 1 }
        );

        let renamed = edited(RenameSpeaker::new("A", "Ada").apply(&stream).unwrap());
        assert_eq!(renamed[0], Item::paragraph_start("Ada"));
        assert_eq!(renamed[3], Item::paragraph_start("B"));
        assert!(
            !RenameSpeaker::new("Zed", "Ada")
                .apply(&stream)
                .unwrap()
                .content_changed
        );
    }
}

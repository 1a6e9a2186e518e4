//! Render coalescing
//!
//! Collapses a timed item sequence into the fewest segments a playback or
//! export backend has to schedule. Consecutive words and silences that play a
//! contiguous stretch of the same source for the same speaker become one
//! [`RenderKind::Media`] segment; editorial silences become
//! [`RenderKind::Silence`] segments.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{StructureError, StructureRule};
use crate::model::{Boundary, Item};
use crate::stream::{Sequence, TimeSpan};
use crate::timing::TimedItem;
use crate::utils::{rough_eq, EPSILON};

/// What a segment plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RenderKind {
    /// A stretch of a backing source
    Media,
    /// Generated silence
    Silence,
}

/// A maximal contiguous run of playable material
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderSegment {
    pub kind: RenderKind,
    pub absolute_start: f64,
    pub duration: f64,
    /// Backing source, set for media segments only
    pub source_id: Option<String>,
    /// Position in the backing source, set for media segments only
    pub source_offset: Option<f64>,
    /// Speaker of the paragraph played, set for media segments only
    ///
    /// Silence segments never carry a speaker, even inside a paragraph, and
    /// merge across speaker changes.
    pub speaker: Option<Arc<str>>,
}

impl RenderSegment {
    /// A generated silence
    #[must_use]
    pub const fn silence(absolute_start: f64, duration: f64) -> Self {
        Self {
            kind: RenderKind::Silence,
            absolute_start,
            duration,
            source_id: None,
            source_offset: None,
            speaker: None,
        }
    }

    /// A stretch of `source_id`
    #[must_use]
    pub fn media(
        absolute_start: f64,
        duration: f64,
        source_id: impl Into<String>,
        source_offset: f64,
        speaker: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            kind: RenderKind::Media,
            absolute_start,
            duration,
            source_id: Some(source_id.into()),
            source_offset: Some(source_offset),
            speaker: Some(speaker.into()),
        }
    }

    /// Whether `next` continues this segment without a gap
    fn continues_with(&self, next: &Self) -> bool {
        if self.kind != next.kind || !rough_eq(self.absolute_end(), next.absolute_start) {
            return false;
        }
        match self.kind {
            RenderKind::Silence => true,
            RenderKind::Media => {
                self.source_id == next.source_id
                    && self.speaker == next.speaker
                    && match (self.source_offset, next.source_offset) {
                        (Some(offset), Some(next_offset)) => {
                            rough_eq(offset + self.duration, next_offset)
                        }
                        _ => false,
                    }
            }
        }
    }
}

impl TimeSpan for RenderSegment {
    fn absolute_start(&self) -> f64 {
        self.absolute_start
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn trim_leading(&mut self, by: f64) {
        self.absolute_start += by;
        self.duration -= by;
        if let Some(offset) = self.source_offset.as_mut() {
            *offset += by;
        }
    }

    fn trim_trailing(&mut self, duration: f64) {
        self.duration = duration;
    }
}

/// Coalescing iterator over timed items
///
/// Yields an error and stops if content shows up outside any paragraph.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RenderSegments<I> {
    inner: I,
    speaker: Option<Arc<str>>,
    pending: Option<RenderSegment>,
    failed: bool,
}

impl<I> RenderSegments<I>
where
    I: Iterator<Item = TimedItem>,
{
    pub(crate) const fn new(inner: I) -> Self {
        Self {
            inner,
            speaker: None,
            pending: None,
            failed: false,
        }
    }

    fn segment_for(&self, timed: TimedItem) -> Result<Option<RenderSegment>, StructureError> {
        let index = timed.absolute_index;
        let speaker = timed
            .paragraph
            .map(|p| p.speaker)
            .or_else(|| self.speaker.clone());

        let segment = match timed.item {
            Item::ParagraphBoundary(_) | Item::Heading { .. } => return Ok(None),
            Item::ArtificialSilence { duration } => {
                if speaker.is_none() {
                    return Err(StructureError::new(StructureRule::ContentOutsideParagraph, index));
                }
                RenderSegment::silence(timed.absolute_start, duration)
            }
            Item::Word {
                source_id,
                source_offset,
                duration,
                ..
            }
            | Item::Silence {
                source_id,
                source_offset,
                duration,
            } => {
                let Some(speaker) = speaker else {
                    return Err(StructureError::new(StructureRule::ContentOutsideParagraph, index));
                };
                RenderSegment::media(timed.absolute_start, duration, source_id, source_offset, speaker)
            }
        };

        if segment.duration <= EPSILON {
            return Ok(None);
        }
        Ok(Some(segment))
    }
}

impl<I> Iterator for RenderSegments<I>
where
    I: Iterator<Item = TimedItem>,
{
    type Item = Result<RenderSegment, StructureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some(timed) = self.inner.next() {
            if let Item::ParagraphBoundary(Boundary::Start { speaker }) = &timed.item {
                self.speaker = Some(Arc::from(speaker.as_str()));
                continue;
            }
            let segment = match self.segment_for(timed) {
                Ok(Some(segment)) => segment,
                Ok(None) => continue,
                Err(error) => {
                    self.failed = true;
                    self.pending = None;
                    return Some(Err(error));
                }
            };
            match self.pending.as_mut() {
                Some(running) if running.continues_with(&segment) => {
                    running.duration += segment.duration;
                }
                _ => {
                    if let Some(done) = self.pending.replace(segment) {
                        return Some(Ok(done));
                    }
                }
            }
        }
        self.pending.take().map(Ok)
    }
}

/// Coalesce a timed sequence into render segments
///
/// # Errors
///
/// Fails with [`StructureRule::ContentOutsideParagraph`] if a content item is
/// met before any paragraph start.
///
/// # Example
///
/// ```rust
/// use transcript_core::{render_segments, Item, ItemStream, RenderKind};
///
/// let stream = ItemStream::from_items(vec![
///     Item::paragraph_start("A"),
///     Item::word("one", "s", 0.0, 0.5),
///     Item::artificial_silence(0.25),
///     Item::word("two", "s", 0.5, 0.5),
///     Item::paragraph_end(),
/// ]);
/// let segments = render_segments(stream.timed())?;
/// let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [RenderKind::Media, RenderKind::Silence, RenderKind::Media]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_segments<I>(sequence: Sequence<I>) -> Result<Vec<RenderSegment>, StructureError>
where
    I: Iterator<Item = TimedItem>,
{
    sequence.render_segments().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemStream;
    use pretty_assertions::assert_eq;

    fn render(items: Vec<Item>) -> Result<Vec<RenderSegment>, StructureError> {
        render_segments(ItemStream::from_items(items).timed())
    }

    #[test]
    fn contiguous_words_merge() {
        let segments = render(vec![
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 0.5),
            Item::word("b", "s", 0.5, 0.5),
            Item::paragraph_end(),
        ])
        .unwrap();
        assert_eq!(segments, vec![RenderSegment::media(0.0, 1.0, "s", 0.0, "A")]);
    }

    #[test]
    fn source_gap_splits() {
        let segments = render(vec![
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 0.5),
            Item::word("b", "s", 2.0, 0.5),
            Item::paragraph_end(),
        ])
        .unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].source_offset, Some(2.0));
        assert!((segments[1].absolute_start - 0.5).abs() < 1e-12);
    }

    #[test]
    fn speaker_change_splits_and_headings_are_ignored() {
        let segments = render(vec![
            Item::paragraph_start("A"),
            Item::word("a", "s", 0.0, 0.5),
            Item::paragraph_end(),
            Item::heading("Next"),
            Item::paragraph_start("A"),
            Item::word("b", "s", 0.5, 0.5),
            Item::paragraph_end(),
            Item::paragraph_start("B"),
            Item::word("c", "s", 1.0, 0.5),
            Item::paragraph_end(),
        ])
        .unwrap();
        assert_eq!(
            segments,
            vec![
                RenderSegment::media(0.0, 1.0, "s", 0.0, "A"),
                RenderSegment::media(1.0, 0.5, "s", 1.0, "B"),
            ]
        );
    }

    #[test]
    fn artificial_silences_merge_and_zero_length_vanishes() {
        let segments = render(vec![
            Item::paragraph_start("A"),
            Item::artificial_silence(0.5),
            Item::word("x", "s", 0.0, 0.0),
            Item::artificial_silence(0.5),
            Item::paragraph_end(),
        ])
        .unwrap();
        assert_eq!(segments, vec![RenderSegment::silence(0.0, 1.0)]);
    }

    #[test]
    fn empty_stream_has_no_segments() {
        assert_eq!(render(Vec::new()).unwrap(), Vec::new());
    }

    #[test]
    fn orphan_content_fails_like_the_validator() {
        let err = render(vec![Item::word("a", "s", 0.0, 1.0)]).unwrap_err();
        assert_eq!(err.rule, StructureRule::ContentOutsideParagraph);
        assert_eq!(err.index, 0);
    }

    #[test]
    fn silence_never_carries_a_speaker() {
        let segments = render(vec![
            Item::paragraph_start("A"),
            Item::artificial_silence(0.5),
            Item::paragraph_end(),
            Item::paragraph_start("B"),
            Item::artificial_silence(0.5),
            Item::paragraph_end(),
        ])
        .unwrap();
        assert_eq!(segments, vec![RenderSegment::silence(0.0, 1.0)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn segments_serialize_with_snake_case_kinds() {
        let segments = vec![
            RenderSegment::media(0.0, 1.5, "a.wav", 2.0, "Ada"),
            RenderSegment::silence(1.5, 0.5),
        ];
        let json = serde_json::to_value(&segments).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "kind": "media",
                    "absolute_start": 0.0,
                    "duration": 1.5,
                    "source_id": "a.wav",
                    "source_offset": 2.0,
                    "speaker": "Ada"
                },
                {
                    "kind": "silence",
                    "absolute_start": 1.5,
                    "duration": 0.5,
                    "source_id": null,
                    "source_offset": null,
                    "speaker": null
                }
            ])
        );
        let back: Vec<RenderSegment> = serde_json::from_value(json).unwrap();
        assert_eq!(back, segments);
    }

    #[test]
    fn segments_can_be_sliced() {
        let segments = vec![
            RenderSegment::media(0.0, 2.0, "s", 10.0, "A"),
            RenderSegment::silence(2.0, 1.0),
        ];
        let sliced = Sequence::new(segments).exact_from(1.5).to_vec();
        assert_eq!(
            sliced,
            vec![
                RenderSegment::media(1.5, 0.5, "s", 11.5, "A"),
                RenderSegment::silence(2.0, 1.0),
            ]
        );
    }
}

//! Main document type for the editor
//!
//! `EditorDocument` owns one transcript: its item stream, the sources the
//! stream references, the cursor and the current selection. Every state the
//! document can be in is structurally valid. Edits go through
//! [`EditorDocument::apply`], which replaces the stream only after the edited
//! version passes validation.

use std::path::Path;

use tracing::{debug, error};

use super::clipboard::{Clip, Clipboard};
use super::cursor::Cursor;
use super::errors::{CorruptDocumentError, EditorError, Result};
use super::selection::{Selection, SelectionEngine};
use crate::commands::{
    BreakLocation, CommandResult, DeleteRange, InsertParagraphBreak, PasteClip, ReassignSpeaker,
    RemoveParagraphBreak, RenameSpeaker, RetextWord, TranscriptCommand,
};
use crate::playback::{AudioExporter, MonotonicProgress, PlaybackEngine};
use transcript_core::{
    render_segments, ItemStream, ParagraphView, RenderSegment, SourceTable, TimedItem,
};

/// A transcript open for editing
#[derive(Debug, Clone)]
pub struct EditorDocument {
    stream: ItemStream,
    sources: SourceTable,
    cursor: Cursor,
    selection: Option<Selection>,
}

impl EditorDocument {
    /// Open `stream`, without any sources
    ///
    /// # Errors
    ///
    /// Fails when `stream` is not structurally valid.
    pub fn new(stream: ItemStream) -> Result<Self> {
        stream.validate()?;
        Ok(Self::from_valid(stream, SourceTable::new()))
    }

    /// Open `stream` backed by `sources`
    ///
    /// # Errors
    ///
    /// Fails when `stream` is not structurally valid or references a source
    /// missing from `sources`.
    pub fn from_parts(stream: ItemStream, sources: SourceTable) -> Result<Self> {
        stream
            .validate()
            .map_err(CorruptDocumentError::InvalidStructure)?;
        if let Some(source_id) = sources.missing_for(&stream).first() {
            return Err(CorruptDocumentError::MissingSource {
                source_id: (*source_id).to_string(),
            }
            .into());
        }
        Ok(Self::from_valid(stream, sources))
    }

    fn from_valid(stream: ItemStream, sources: SourceTable) -> Self {
        let index = super::cursor::first_possible_cursor_position(stream.items());
        Self {
            stream,
            sources,
            cursor: Cursor::User { index },
            selection: None,
        }
    }

    /// Give up the document, keeping stream and sources
    #[must_use]
    pub fn into_parts(self) -> (ItemStream, SourceTable) {
        (self.stream, self.sources)
    }

    /// Current item stream
    #[must_use]
    pub const fn stream(&self) -> &ItemStream {
        &self.stream
    }

    /// Sources backing the stream
    #[must_use]
    pub const fn sources(&self) -> &SourceTable {
        &self.sources
    }

    /// Current cursor
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Items with derived timing
    #[must_use]
    pub fn timed(&self) -> Vec<TimedItem> {
        self.stream.index()
    }

    /// Total duration in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.stream.duration()
    }

    /// Paragraphs in document order
    #[must_use]
    pub fn paragraphs(&self) -> Vec<ParagraphView> {
        self.stream.paragraphs()
    }

    /// Speakers in order of first appearance
    #[must_use]
    pub fn speakers(&self) -> Vec<&str> {
        self.stream.speakers()
    }

    /// Item under the cursor
    #[must_use]
    pub fn current_item(&self) -> Option<TimedItem> {
        let timed = self.timed();
        self.cursor.current_item(&timed).cloned()
    }

    /// Cursor time on the document timeline
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.cursor.current_time(&self.timed())
    }

    /// Speaker of the paragraph under the cursor
    #[must_use]
    pub fn current_speaker(&self) -> Option<String> {
        self.current_item()
            .and_then(|timed| timed.speaker().map(str::to_string))
    }

    /// Let playback drive the cursor; clears the selection
    pub fn set_time(&mut self, time: f64) {
        self.cursor = Cursor::Player {
            time: time.clamp(0.0, self.duration()),
        };
        self.selection = None;
    }

    /// Put the cursor in front of the item at `index`; clears the selection
    ///
    /// Indices that are not valid cursor positions move forward to the next
    /// valid one.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = self.normalized(Cursor::User { index });
        self.selection = None;
    }

    /// Move the cursor one position left; clears the selection
    pub fn go_left(&mut self) {
        self.cursor = self.cursor.go_left(&self.timed());
        self.selection = None;
    }

    /// Move the cursor one position right; clears the selection
    pub fn go_right(&mut self) {
        self.cursor = self.cursor.go_right(&self.timed());
        self.selection = None;
    }

    fn normalized(&self, cursor: Cursor) -> Cursor {
        let timed = self.timed();
        match cursor {
            Cursor::User { .. } => cursor
                .position(&timed)
                .or_else(|| {
                    timed
                        .iter()
                        .rev()
                        .find(|t| super::cursor::is_cursor_position(&t.item))
                        .map(|t| t.absolute_index)
                })
                .map_or_else(Cursor::default, |index| Cursor::User { index }),
            Cursor::Player { time } => Cursor::Player {
                time: time.clamp(0.0, self.duration()),
            },
        }
    }

    /// Grow or shrink the selection by one item on the left
    pub fn extend_selection_left(&mut self) {
        let timed = self.timed();
        let time = self.cursor.current_time(&timed);
        self.selection = SelectionEngine::new(&timed).extend_left(self.selection.as_ref(), time);
    }

    /// Grow or shrink the selection by one item on the right
    pub fn extend_selection_right(&mut self) {
        let timed = self.timed();
        let time = self.cursor.current_time(&timed);
        self.selection = SelectionEngine::new(&timed).extend_right(self.selection.as_ref(), time);
    }

    /// Resize the selection to reach the item at `index`
    ///
    /// Structural items cannot be selected and are ignored.
    pub fn select_item(&mut self, index: usize) {
        let timed = self.timed();
        let Some(item) = timed.get(index).filter(|t| t.item.is_content()) else {
            return;
        };
        let engine = SelectionEngine::new(&timed);
        self.selection = Some(engine.include_fully(self.selection.as_ref(), item));
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Content items entirely inside the selection
    #[must_use]
    pub fn selected_items(&self) -> Vec<TimedItem> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };
        self.stream
            .timed()
            .filter(|t| t.item.is_content() && selection.contains(t))
            .to_vec()
    }

    /// Run `command` against the document
    ///
    /// The edited stream replaces the current one only if it is structurally
    /// valid. Successful edits clear the selection and move the cursor to
    /// where the command points it.
    ///
    /// # Errors
    ///
    /// Conflicts reported by the command are passed through unchanged. An
    /// invalid result is reported as [`EditorError::StructuralViolation`] and
    /// the document stays as it was.
    pub fn apply(&mut self, command: &dyn TranscriptCommand) -> Result<CommandResult> {
        let mut result = command.apply(&self.stream)?;
        let Some(stream) = result.stream.take() else {
            debug!(command = command.description(), "command left document unchanged");
            return Ok(result);
        };
        if let Err(violation) = stream.validate() {
            error!(
                command = command.description(),
                %violation,
                "edit rejected by structural validator"
            );
            return Err(EditorError::structural_violation(
                command.description(),
                violation,
            ));
        }

        self.stream = stream;
        self.selection = None;
        let cursor = result
            .new_cursor
            .map_or(self.cursor, |index| Cursor::User { index });
        self.cursor = self.normalized(cursor);
        debug!(
            command = command.description(),
            items = self.stream.len(),
            "applied edit"
        );
        Ok(result)
    }

    /// Split the paragraph at `time`
    ///
    /// # Errors
    ///
    /// See [`InsertParagraphBreak`].
    pub fn insert_paragraph_break(&mut self, time: f64) -> Result<CommandResult> {
        self.apply(&InsertParagraphBreak::new(time))
    }

    /// Merge a paragraph into the previous one
    ///
    /// # Errors
    ///
    /// See [`RemoveParagraphBreak`].
    pub fn remove_paragraph_break(&mut self, location: BreakLocation) -> Result<CommandResult> {
        self.apply(&RemoveParagraphBreak { location })
    }

    /// Delete the content items inside the selection
    ///
    /// # Errors
    ///
    /// [`EditorError::NoSelection`] when nothing is selected.
    pub fn delete_selection(&mut self) -> Result<CommandResult> {
        let selection = self.selection.ok_or(EditorError::NoSelection)?;
        self.apply(&DeleteRange::new(
            selection.range_start,
            selection.range_length,
        ))
    }

    /// Backspace
    ///
    /// With a selection, deletes it. At the start of a paragraph, merges the
    /// paragraph into the previous one. Otherwise selects the item left of
    /// the cursor so the next call deletes it.
    ///
    /// # Errors
    ///
    /// Merge conflicts from [`RemoveParagraphBreak`].
    pub fn delete_something(&mut self) -> Result<CommandResult> {
        if self.selection.is_some() {
            return self.delete_selection();
        }
        let timed = self.timed();
        let Some(index) = self.cursor.position(&timed) else {
            return Ok(CommandResult::unchanged());
        };
        if index > 0 && timed[index - 1].item.is_paragraph_start() {
            return self.remove_paragraph_break(BreakLocation::Paragraph(index - 1));
        }
        self.extend_selection_left();
        Ok(CommandResult::unchanged().with_message("selected item left of cursor"))
    }

    /// Replace the text of the word starting at `absolute_start`
    ///
    /// # Errors
    ///
    /// Only structural violations, which indicate a bug.
    pub fn retext_word(&mut self, absolute_start: f64, text: &str) -> Result<CommandResult> {
        self.apply(&RetextWord::new(absolute_start, text))
    }

    /// Give the paragraph starting at `paragraph_index` another speaker
    ///
    /// # Errors
    ///
    /// [`EditorError::NotAParagraphStart`] for a bad index.
    pub fn reassign_speaker(
        &mut self,
        paragraph_index: usize,
        speaker: &str,
    ) -> Result<CommandResult> {
        self.apply(&ReassignSpeaker::new(paragraph_index, speaker))
    }

    /// Rename a speaker in every paragraph
    ///
    /// # Errors
    ///
    /// Only structural violations, which indicate a bug.
    pub fn rename_speaker(&mut self, from: &str, to: &str) -> Result<CommandResult> {
        self.apply(&RenameSpeaker::new(from, to))
    }

    /// Copy `[start, start + length)` with the sources it needs
    #[must_use]
    pub fn copy_range(&self, start: f64, length: f64) -> Clip {
        Clip::copy_range(&self.stream, &self.sources, start, length)
    }

    /// Copy the selection into `clipboard`
    ///
    /// # Errors
    ///
    /// [`EditorError::NoSelection`] when nothing is selected.
    pub fn copy(&self, clipboard: &mut Clipboard) -> Result<()> {
        let selection = self.selection.ok_or(EditorError::NoSelection)?;
        let clip = self.copy_range(selection.range_start, selection.range_length);
        debug!(
            items = clip.stream.len(),
            duration = clip.duration(),
            "copied selection"
        );
        clipboard.put(clip);
        Ok(())
    }

    /// Paste the clipboard at the cursor and adopt the clip's sources
    ///
    /// Clip sources whose id is already used here for other media are pasted
    /// under a fresh id, see [`Clip::rebased_onto`].
    ///
    /// # Errors
    ///
    /// [`EditorError::EmptyClipboard`] when nothing was copied.
    pub fn paste(&mut self, clipboard: &Clipboard) -> Result<CommandResult> {
        let clip = clipboard
            .clip()
            .ok_or(EditorError::EmptyClipboard)?
            .rebased_onto(&self.sources);
        let index = self
            .cursor
            .position(&self.timed())
            .unwrap_or(self.stream.len());
        let result = self.apply(&PasteClip::new(index, clip.clone()))?;
        if result.content_changed {
            self.sources.merge(&clip.sources);
        }
        Ok(result)
    }

    /// Render segments for the whole document
    ///
    /// # Errors
    ///
    /// Never fails for a document in a valid state.
    pub fn render_segments(&self) -> Result<Vec<RenderSegment>> {
        Ok(render_segments(self.stream.timed())?)
    }

    /// Render segments for the selection
    ///
    /// # Errors
    ///
    /// [`EditorError::NoSelection`] when nothing is selected.
    pub fn selection_segments(&self) -> Result<Vec<RenderSegment>> {
        let selection = self.selection.ok_or(EditorError::NoSelection)?;
        let sliced = self
            .stream
            .timed()
            .exact_from(selection.range_start)
            .exact_until(selection.range_end());
        Ok(render_segments(sliced)?)
    }

    /// Play from the cursor, or only the selection if there is one
    ///
    /// Progress reported by the engine is passed on to `on_progress`, clamped
    /// so that it never decreases.
    ///
    /// # Errors
    ///
    /// Whatever the engine reports.
    pub fn play(
        &self,
        engine: &mut dyn PlaybackEngine,
        on_progress: impl FnMut(f64),
    ) -> Result<()> {
        let (segments, start_time) = match self.selection {
            Some(selection) => (self.selection_segments()?, selection.range_start),
            None => {
                let start_time = self.current_time();
                let segments = render_segments(self.stream.timed().exact_from(start_time))?;
                (segments, start_time)
            }
        };
        debug!(segments = segments.len(), start_time, "starting playback");
        let mut progress = MonotonicProgress::new(on_progress);
        engine.schedule_playback(&segments, &self.sources, start_time, &mut |time| {
            progress.report(time);
        })
    }

    /// Write the selection as audio through `exporter`
    ///
    /// # Errors
    ///
    /// [`EditorError::NoSelection`] when nothing is selected, otherwise
    /// whatever the exporter reports.
    pub fn export_selection(&self, exporter: &dyn AudioExporter, path: &Path) -> Result<()> {
        let segments = self.selection_segments()?;
        debug!(segments = segments.len(), path = %path.display(), "exporting selection");
        exporter.export(&segments, &self.sources, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_core::{Item, Source, StructureRule};

    fn document() -> EditorDocument {
        let stream = ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("one", "s", 0.0, 1.0),
            Item::word("two", "s", 1.0, 1.0),
            Item::paragraph_end(),
            Item::paragraph_start("A"),
            Item::word("three", "s", 2.0, 1.0),
            Item::paragraph_end(),
        ]);
        let sources = [("s", Source::new(vec![0u8; 8]))].into_iter().collect();
        EditorDocument::from_parts(stream, sources).unwrap()
    }

    #[derive(Debug)]
    struct Unbalance;

    impl TranscriptCommand for Unbalance {
        fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
            let mut items = stream.items().to_vec();
            items.pop();
            Ok(CommandResult::changed(items.into()))
        }

        fn description(&self) -> &str {
            "Unbalance"
        }
    }

    #[test]
    fn opens_at_first_cursor_position() {
        let doc = document();
        assert_eq!(doc.cursor(), Cursor::User { index: 1 });
        assert_eq!(doc.current_speaker().as_deref(), Some("A"));
        assert!((doc.duration() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_missing_sources() {
        let stream = ItemStream::from_items(vec![
            Item::paragraph_start("A"),
            Item::word("one", "gone.wav", 0.0, 1.0),
            Item::paragraph_end(),
        ]);
        let err = EditorDocument::from_parts(stream, SourceTable::new()).unwrap_err();
        assert_eq!(
            err,
            EditorError::CorruptDocument(CorruptDocumentError::MissingSource {
                source_id: "gone.wav".to_string()
            })
        );
    }

    #[test]
    fn invalid_edits_are_not_applied() {
        let mut doc = document();
        let before = doc.stream().clone();
        let err = doc.apply(&Unbalance).unwrap_err();
        assert!(matches!(
            err,
            EditorError::StructuralViolation { ref error, .. }
                if error.rule == StructureRule::UnterminatedParagraph
        ));
        assert_eq!(doc.stream(), &before);
    }

    #[test]
    fn moving_the_cursor_clears_selection() {
        let mut doc = document();
        doc.set_cursor(5);
        doc.extend_selection_left();
        assert!(doc.selection().is_some());
        doc.go_right();
        assert!(doc.selection().is_none());

        doc.extend_selection_right();
        doc.set_time(1.5);
        assert!(doc.selection().is_none());
        assert_eq!(doc.cursor(), Cursor::Player { time: 1.5 });
        doc.set_time(10.0);
        assert_eq!(doc.cursor(), Cursor::Player { time: 3.0 });
    }

    #[test]
    fn set_cursor_skips_structural_items() {
        let mut doc = document();
        doc.set_cursor(4);
        assert_eq!(doc.cursor(), Cursor::User { index: 5 });
        doc.set_cursor(100);
        assert_eq!(doc.cursor(), Cursor::User { index: 6 });
    }

    #[test]
    fn delete_without_selection_is_a_conflict() {
        let mut doc = document();
        assert_eq!(doc.delete_selection().unwrap_err(), EditorError::NoSelection);
        assert!(doc.selection_segments().is_err());
    }
}

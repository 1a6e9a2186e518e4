//! Playback and audio export collaborators
//!
//! The editor never decodes or mixes audio itself. It computes the render
//! segments for what should be heard and hands them, together with the source
//! table, to an engine constructed and owned by the surrounding application.

use std::path::Path;

use crate::core::{EditorError, Result};
use transcript_core::{RenderKind, RenderSegment, SourceTable};

/// Something that can play render segments
pub trait PlaybackEngine {
    /// Play `segments` starting at document time `start_time`
    ///
    /// `progress` receives the current document time while playing.
    fn schedule_playback(
        &mut self,
        segments: &[RenderSegment],
        sources: &SourceTable,
        start_time: f64,
        progress: &mut dyn FnMut(f64),
    ) -> Result<()>;

    /// Stop whatever is playing
    fn stop(&mut self) {}
}

/// Something that can write render segments to an audio file
pub trait AudioExporter {
    /// Write `segments`, in order, to a single file at `path`
    fn export(&self, segments: &[RenderSegment], sources: &SourceTable, path: &Path)
        -> Result<()>;
}

/// Progress callback wrapper that never reports a time earlier than before
pub struct MonotonicProgress<F> {
    inner: F,
    last: Option<f64>,
}

impl<F: FnMut(f64)> MonotonicProgress<F> {
    /// Wrap `inner`
    pub const fn new(inner: F) -> Self {
        Self { inner, last: None }
    }

    /// Report `time`, clamped to the latest time reported so far
    pub fn report(&mut self, time: f64) {
        let time = self.last.map_or(time, |last| last.max(time));
        self.last = Some(time);
        (self.inner)(time);
    }

    /// Latest time reported
    #[must_use]
    pub const fn last(&self) -> Option<f64> {
        self.last
    }
}

impl<F> core::fmt::Debug for MonotonicProgress<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MonotonicProgress")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

/// Check that every media segment's source is in `sources`
///
/// # Errors
///
/// Returns [`EditorError::Playback`] naming the first missing source.
pub fn ensure_sources(segments: &[RenderSegment], sources: &SourceTable) -> Result<()> {
    let missing = segments
        .iter()
        .filter(|segment| segment.kind == RenderKind::Media)
        .filter_map(|segment| segment.source_id.as_deref())
        .find(|id| !sources.contains(id));
    match missing {
        Some(id) => Err(EditorError::playback(format!("source '{id}' is not loaded"))),
        None => Ok(()),
    }
}

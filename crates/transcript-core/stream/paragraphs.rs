//! Grouped paragraph view

use std::sync::Arc;

use crate::model::Item;
use crate::timing::{Indexer, TimedItem};

/// One paragraph with its content items
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphView {
    /// Absolute index of the paragraph's `Start` boundary
    pub start_index: usize,
    pub speaker: Arc<str>,
    pub absolute_start: f64,
    pub duration: f64,
    /// Content items, boundaries excluded
    pub items: Vec<TimedItem>,
}

impl ParagraphView {
    /// End of the paragraph on the document timeline
    #[must_use]
    pub fn absolute_end(&self) -> f64 {
        self.absolute_start + self.duration
    }

    /// Words joined by single spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter_map(|timed| timed.item.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group `items` into paragraphs, in document order
///
/// Content outside any paragraph is skipped.
#[must_use]
pub fn paragraphs(items: &[Item]) -> Vec<ParagraphView> {
    let mut views: Vec<ParagraphView> = Vec::new();

    for timed in Indexer::new(items) {
        let Some(paragraph) = timed.paragraph.clone() else {
            continue;
        };
        let opens = views
            .last()
            .map_or(true, |view| view.start_index != paragraph.start_index);
        if opens {
            views.push(ParagraphView {
                start_index: paragraph.start_index,
                speaker: paragraph.speaker,
                absolute_start: timed.absolute_start,
                duration: 0.0,
                items: Vec::new(),
            });
        }
        if timed.item.is_content() {
            if let Some(view) = views.last_mut() {
                view.duration += timed.duration();
                view.items.push(timed);
            }
        }
    }
    views
}

/// Distinct speakers in order of first appearance
#[must_use]
pub fn speakers(items: &[Item]) -> Vec<&str> {
    let mut seen = Vec::new();
    for speaker in items.iter().filter_map(Item::speaker) {
        if !seen.contains(&speaker) {
            seen.push(speaker);
        }
    }
    seen
}

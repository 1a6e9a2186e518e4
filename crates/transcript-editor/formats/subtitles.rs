//! Cue building shared by the subtitle exporters
//!
//! A cue is one paragraph, or one line of a paragraph when a maximum line
//! length is set. Lines are made by giving the items of a paragraph new
//! paragraph keys as the running line length overflows, so the grouping that
//! follows does not need to know about line lengths at all.

use std::sync::Arc;

use transcript_core::{Item, ItemStream, ParagraphRef, TimedItem};

/// Cue layout options, shared by WebVTT and SRT
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleOptions {
    /// Emit a timestamp in front of every word (WebVTT only)
    pub word_timings: bool,
    /// Name the speaker of every cue
    pub include_speaker_names: bool,
    /// Start a new cue once a line would grow past this many characters
    pub max_line_length: Option<usize>,
}

/// A word with its start time
#[derive(Debug, Clone, PartialEq)]
pub struct CueWord {
    pub text: String,
    pub absolute_start: f64,
}

/// One subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub speaker: Arc<str>,
    pub words: Vec<CueWord>,
}

impl Cue {
    /// Words joined by single spaces
    #[must_use]
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Reassigns paragraph keys so that no line exceeds `limit` characters
///
/// Every word counts its length plus one separating space. A single word
/// longer than the limit still gets a line of its own.
fn line_splitter(limit: usize) -> impl FnMut(TimedItem) -> TimedItem {
    let mut paragraph_key = None;
    let mut line: Option<ParagraphRef> = None;
    let mut length = 0;

    move |mut timed: TimedItem| {
        let Some(paragraph) = timed.paragraph.clone() else {
            return timed;
        };
        let word_length = match &timed.item {
            Item::Word { text, .. } => Some(text.chars().count()),
            _ => None,
        };

        if paragraph_key != Some(paragraph.start_index) {
            paragraph_key = Some(paragraph.start_index);
            length = word_length.map_or(0, |len| len + 1);
            line = Some(paragraph);
            return timed;
        }
        if let Some(word_length) = word_length {
            if length > 0 && length + word_length > limit {
                line = Some(ParagraphRef::new(
                    timed.absolute_index,
                    Arc::clone(&paragraph.speaker),
                ));
                length = 0;
            }
            length += word_length + 1;
        }
        timed.paragraph = line.clone();
        timed
    }
}

/// Group the content of `stream` into cues
///
/// Paragraphs (or lines) without any word produce no cue. A cue spans from
/// the start of its first content item to the end of its last, so silences
/// at paragraph edges are part of it.
#[must_use]
pub fn build_cues(stream: &ItemStream, options: &SubtitleOptions) -> Vec<Cue> {
    let timed = match options.max_line_length {
        Some(limit) => stream.timed().map(line_splitter(limit)).to_vec(),
        None => stream.timed().to_vec(),
    };

    let mut groups: Vec<(usize, Cue)> = Vec::new();
    for item in timed.iter().filter(|t| t.item.is_content()) {
        let Some(paragraph) = &item.paragraph else {
            continue;
        };
        let opens = groups
            .last()
            .map_or(true, |(key, _)| *key != paragraph.start_index);
        if opens {
            groups.push((
                paragraph.start_index,
                Cue {
                    start: item.absolute_start,
                    end: item.absolute_end(),
                    speaker: Arc::clone(&paragraph.speaker),
                    words: Vec::new(),
                },
            ));
        }
        if let Some((_, cue)) = groups.last_mut() {
            cue.end = item.absolute_end();
            if let Item::Word { text, .. } = &item.item {
                cue.words.push(CueWord {
                    text: text.clone(),
                    absolute_start: item.absolute_start,
                });
            }
        }
    }

    groups
        .into_iter()
        .map(|(_, cue)| cue)
        .filter(|cue| !cue.words.is_empty())
        .collect()
}

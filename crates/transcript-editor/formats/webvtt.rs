//! WebVTT export
//!
//! One cue per paragraph (or line), optionally tagged with the speaker as a
//! `<v>` voice span and with a `<HH:MM:SS.mmm>` timestamp in front of each word
//! for karaoke-style highlighting.

use std::fmt::Write as _;
use std::io::Write;

use transcript_core::utils::format_timestamp;

use super::subtitles::{build_cues, Cue, SubtitleOptions};
use crate::core::{EditorDocument, EditorError};
use crate::formats::{FormatExporter, FormatInfo, FormatOptions, FormatResult};

/// WebVTT exporter
#[derive(Debug)]
pub struct WebVttFormat {
    info: FormatInfo,
}

impl WebVttFormat {
    /// Create a new WebVTT exporter
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: FormatInfo {
                name: "WebVTT".to_string(),
                extensions: vec!["vtt".to_string(), "webvtt".to_string()],
                mime_type: "text/vtt".to_string(),
                description: "WebVTT subtitles with voice spans and word timestamps".to_string(),
                supports_speakers: true,
                supports_word_timings: true,
            },
        }
    }

    /// Render `cues` as a complete WebVTT file
    #[must_use]
    pub fn render(cues: &[Cue], options: &SubtitleOptions) -> String {
        let mut out = String::from("WEBVTT\n");
        for (number, cue) in cues.iter().enumerate() {
            let _ = write!(
                out,
                "\n{}\n{} --> {}\n",
                number + 1,
                format_timestamp(cue.start, '.'),
                format_timestamp(cue.end, '.')
            );
            out.push_str(&Self::payload(cue, options));
            out.push('\n');
        }
        out
    }

    fn payload(cue: &Cue, options: &SubtitleOptions) -> String {
        let mut payload = String::new();
        if options.include_speaker_names {
            let _ = write!(payload, "<v {}>", escape(&cue.speaker));
        }
        let words: Vec<String> = cue
            .words
            .iter()
            .map(|word| {
                if options.word_timings {
                    format!(
                        "<{}><c>{}</c>",
                        format_timestamp(word.absolute_start, '.'),
                        escape(&word.text)
                    )
                } else {
                    escape(&word.text)
                }
            })
            .collect();
        payload.push_str(&words.join(" "));
        payload
    }
}

impl Default for WebVttFormat {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape the characters WebVTT reserves in cue text
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl FormatExporter for WebVttFormat {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn export_to_writer(
        &self,
        document: &EditorDocument,
        writer: &mut dyn Write,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError> {
        let cues = build_cues(document.stream(), &options.subtitles);
        let content = Self::render(&cues, &options.subtitles);
        writer
            .write_all(content.as_bytes())
            .map_err(|e| EditorError::io(format!("Failed to write WebVTT content: {e}")))?;

        tracing::debug!(cues = cues.len(), "exported WebVTT");
        Ok(FormatResult::success(cues.len())
            .with_metadata("exported_format", "WebVTT")
            .with_metadata("cues_exported", cues.len().to_string()))
    }
}

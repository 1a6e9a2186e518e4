//! SRT export
//!
//! SRT has no voice spans or inline timestamps, so speakers become a
//! `Name: ` prefix and word timings are ignored.

use std::fmt::Write as _;
use std::io::Write;

use transcript_core::utils::format_timestamp;

use super::subtitles::{build_cues, Cue, SubtitleOptions};
use crate::core::{EditorDocument, EditorError};
use crate::formats::{FormatExporter, FormatInfo, FormatOptions, FormatResult};

/// SRT exporter
#[derive(Debug)]
pub struct SrtFormat {
    info: FormatInfo,
}

impl SrtFormat {
    /// Create a new SRT exporter
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: FormatInfo {
                name: "SRT".to_string(),
                extensions: vec!["srt".to_string()],
                mime_type: "application/x-subrip".to_string(),
                description: "SubRip subtitles".to_string(),
                supports_speakers: true,
                supports_word_timings: false,
            },
        }
    }

    /// Render `cues` as a complete SRT file
    #[must_use]
    pub fn render(cues: &[Cue], options: &SubtitleOptions) -> String {
        let mut out = String::new();
        for (number, cue) in cues.iter().enumerate() {
            if number > 0 {
                out.push('\n');
            }
            let _ = writeln!(
                out,
                "{}\n{} --> {}",
                number + 1,
                format_timestamp(cue.start, ','),
                format_timestamp(cue.end, ',')
            );
            if options.include_speaker_names {
                let _ = write!(out, "{}: ", cue.speaker);
            }
            out.push_str(&cue.text());
            out.push('\n');
        }
        out
    }
}

impl Default for SrtFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatExporter for SrtFormat {
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
            .map_err(|e| EditorError::io(format!("Failed to write SRT content: {e}")))?;

        let mut result = FormatResult::success(cues.len())
            .with_metadata("exported_format", "SRT")
            .with_metadata("cues_exported", cues.len().to_string());
        if options.subtitles.word_timings {
            result = result.with_warnings(vec!["SRT does not support word timings".to_string()]);
        }
        tracing::debug!(cues = cues.len(), "exported SRT");
        Ok(result)
    }
}

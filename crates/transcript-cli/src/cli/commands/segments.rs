//! Segments command handler.

use std::path::Path;

use anyhow::{Context, Result};
use transcript_core::utils::format_timestamp;
use transcript_core::{render_segments, RenderKind, RenderSegment};

use super::load_document;

pub fn run(path: &Path, from: Option<f64>, until: Option<f64>, json: bool) -> Result<()> {
    let (stream, _) = load_document(path)?;
    let sequence = stream
        .timed()
        .exact_from(from.unwrap_or(0.0))
        .exact_until(until.unwrap_or(f64::INFINITY));
    let segments = render_segments(sequence).context("render segments")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&segments).context("encode segments")?
        );
    } else {
        for segment in &segments {
            println!("{}", describe(segment));
        }
    }
    Ok(())
}

fn describe(segment: &RenderSegment) -> String {
    let start = format_timestamp(segment.absolute_start, '.');
    let end = format_timestamp(segment.absolute_start + segment.duration, '.');
    match segment.kind {
        RenderKind::Silence => format!("{start} --> {end}  silence"),
        RenderKind::Media => format!(
            "{start} --> {end}  {} @ {:.3}  [{}]",
            segment.source_id.as_deref().unwrap_or("?"),
            segment.source_offset.unwrap_or_default(),
            segment.speaker.as_deref().unwrap_or("")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_media_and_silence() {
        let media = RenderSegment {
            kind: RenderKind::Media,
            absolute_start: 1.0,
            duration: 2.5,
            source_id: Some("a.wav".to_string()),
            source_offset: Some(4.0),
            speaker: Some("Ada".into()),
        };
        assert_eq!(
            describe(&media),
            "00:00:01.000 --> 00:00:03.500  a.wav @ 4.000  [Ada]"
        );
        assert_eq!(
            describe(&RenderSegment::silence(0.0, 0.25)),
            "00:00:00.000 --> 00:00:00.250  silence"
        );
    }
}

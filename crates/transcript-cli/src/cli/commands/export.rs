//! Export command handler.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;
use transcript_editor::{
    EditorDocument, FormatOptions, FormatRegistry, SubtitleOptions,
};

use super::load_document;

pub struct ExportArgs {
    pub format: Option<String>,
    pub word_timings: bool,
    pub speaker_names: bool,
    pub max_line_length: Option<usize>,
    pub pretty: bool,
}

pub fn run(input: &Path, output: &Path, args: &ExportArgs) -> Result<()> {
    let (stream, sources) = load_document(input)?;
    let document = EditorDocument::from_parts(stream, sources)?;

    let registry = FormatRegistry::with_builtin();
    let extension = match &args.format {
        Some(format) => format.as_str(),
        None => output
            .extension()
            .and_then(|ext| ext.to_str())
            .context("output has no extension, pass --format")?,
    };
    let exporter = registry.find_exporter(extension).with_context(|| {
        format!(
            "no exporter for '{extension}' (supported: {})",
            registry.supported_export_extensions().join(", ")
        )
    })?;

    let options = FormatOptions {
        subtitles: SubtitleOptions {
            word_timings: args.word_timings,
            include_speaker_names: args.speaker_names,
            max_line_length: args.max_line_length,
        },
        pretty: args.pretty,
    };
    let result = exporter
        .export_to_path(&document, output, &options)
        .with_context(|| format!("export {}", output.display()))?;

    for warning in &result.warnings {
        warn!("{warning}");
    }
    println!(
        "wrote {} entries to {}",
        result.entries_processed,
        output.display()
    );
    Ok(())
}

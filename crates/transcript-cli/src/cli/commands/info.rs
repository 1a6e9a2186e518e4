//! Info command handler.

use std::path::Path;

use anyhow::Result;
use transcript_core::utils::format_timestamp;

use super::load_document;

pub fn run(path: &Path) -> Result<()> {
    let (stream, sources) = load_document(path)?;
    let paragraphs = stream.paragraphs();

    println!("{}", path.display());
    println!("  duration:   {}", format_timestamp(stream.duration(), '.'));
    println!("  items:      {}", stream.len());
    println!("  paragraphs: {}", paragraphs.len());
    println!("  speakers:   {}", stream.speakers().join(", "));
    for (id, source) in sources.iter() {
        println!("  source:     {id} ({} bytes)", source.len());
    }
    for paragraph in &paragraphs {
        println!(
            "  {}  {}  {} items",
            format_timestamp(paragraph.absolute_start, '.'),
            paragraph.speaker,
            paragraph.items.len()
        );
    }
    Ok(())
}

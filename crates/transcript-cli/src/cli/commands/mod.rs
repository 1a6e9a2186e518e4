//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context, Result};
use transcript_core::{ItemStream, SourceTable};

pub mod export;
pub mod info;
pub mod lint;
pub mod segments;

/// Read and fully validate a document file
pub fn load_document(path: &Path) -> Result<(ItemStream, SourceTable)> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    transcript_editor::formats::load(&bytes).with_context(|| format!("load {}", path.display()))
}

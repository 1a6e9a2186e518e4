//! Import and export of transcripts
//!
//! The native document format round-trips everything, including the media
//! sources. WebVTT and SRT are export-only: a subtitle file carries neither
//! audio nor silences, so nothing editable could be imported from it.

pub mod document;
pub mod srt;
pub mod subtitles;
pub mod webvtt;

pub use document::{load, load_unchecked, save, DocumentFormat, DOCUMENT_VERSION};
pub use srt::SrtFormat;
pub use subtitles::{build_cues, Cue, SubtitleOptions};
pub use webvtt::WebVttFormat;

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use ahash::AHashMap;

use crate::core::{EditorDocument, EditorError};

/// Metadata about a format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format name (e.g., "Transcript", "SRT", "WebVTT")
    pub name: String,
    /// File extensions supported by this format
    pub extensions: Vec<String>,
    /// MIME type for this format
    pub mime_type: String,
    /// Brief description of the format
    pub description: String,
    /// Whether speaker names survive export
    pub supports_speakers: bool,
    /// Whether per-word timing survives export
    pub supports_word_timings: bool,
}

/// Configuration options for import/export operations
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Cue layout for subtitle exporters
    pub subtitles: SubtitleOptions,
    /// Indent the native document JSON
    pub pretty: bool,
}

/// Result of an import/export operation
#[derive(Debug)]
pub struct FormatResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Number of items or cues processed
    pub entries_processed: usize,
    /// Warnings encountered during processing
    pub warnings: Vec<String>,
    /// Additional metadata from the operation
    pub metadata: AHashMap<String, String>,
}

impl FormatResult {
    #[must_use]
    pub fn success(entries_processed: usize) -> Self {
        Self {
            success: true,
            entries_processed,
            warnings: Vec::new(),
            metadata: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Trait for reading documents
pub trait FormatImporter: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn format_info(&self) -> &FormatInfo;

    /// Check if this importer can handle the given file extension
    fn can_import(&self, extension: &str) -> bool {
        self.format_info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Import from a reader with the given options
    fn import_from_reader(
        &self,
        reader: &mut dyn Read,
        options: &FormatOptions,
    ) -> Result<(EditorDocument, FormatResult), EditorError>;

    /// Import from a file path
    fn import_from_path(
        &self,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<(EditorDocument, FormatResult), EditorError> {
        let mut file = std::fs::File::open(path)
            .map_err(|e| EditorError::io(format!("Failed to open file: {e}")))?;
        self.import_from_reader(&mut file, options)
    }

    /// Import from in-memory bytes
    fn import_from_bytes(
        &self,
        content: &[u8],
        options: &FormatOptions,
    ) -> Result<(EditorDocument, FormatResult), EditorError> {
        let mut cursor = std::io::Cursor::new(content);
        self.import_from_reader(&mut cursor, options)
    }
}

/// Trait for writing documents
pub trait FormatExporter: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn format_info(&self) -> &FormatInfo;

    /// Check if this exporter can handle the given file extension
    fn can_export(&self, extension: &str) -> bool {
        self.format_info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Export to a writer with the given options
    fn export_to_writer(
        &self,
        document: &EditorDocument,
        writer: &mut dyn Write,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError>;

    /// Export to a file path
    fn export_to_path(
        &self,
        document: &EditorDocument,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| EditorError::io(format!("Failed to create file: {e}")))?;
        self.export_to_writer(document, &mut file, options)
    }

    /// Export to a string
    fn export_to_string(
        &self,
        document: &EditorDocument,
        options: &FormatOptions,
    ) -> Result<(String, FormatResult), EditorError> {
        let mut buffer = Vec::new();
        let result = self.export_to_writer(document, &mut buffer, options)?;
        let content = String::from_utf8(buffer)
            .map_err(|e| EditorError::invalid_format(format!("Invalid UTF-8 output: {e}")))?;
        Ok((content, result))
    }
}

/// Combined trait for formats that support both import and export
pub trait Format: FormatImporter + FormatExporter {
    /// Get the format name
    fn name(&self) -> &str {
        &FormatImporter::format_info(self).name
    }

    /// Check if this format supports the given file extension
    fn supports_extension(&self, extension: &str) -> bool {
        self.can_import(extension) || self.can_export(extension)
    }

    /// Get self as an importer (workaround for trait upcasting)
    fn as_importer(&self) -> &dyn FormatImporter;

    /// Get self as an exporter (workaround for trait upcasting)
    fn as_exporter(&self) -> &dyn FormatExporter;
}

/// Registry for managing available formats
#[derive(Debug, Default)]
pub struct FormatRegistry {
    exporters: AHashMap<String, Box<dyn FormatExporter>>,
    formats: AHashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new, empty format registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the native document format, WebVTT and SRT
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_format(Box::new(DocumentFormat::new()));
        registry.register_exporter(Box::new(WebVttFormat::new()));
        registry.register_exporter(Box::new(SrtFormat::new()));
        registry
    }

    /// Register a format that supports both import and export
    pub fn register_format(&mut self, format: Box<dyn Format>) {
        let name = format.name().to_string();
        self.formats.insert(name, format);
    }

    /// Register an exporter
    pub fn register_exporter(&mut self, exporter: Box<dyn FormatExporter>) {
        let name = exporter.format_info().name.clone();
        self.exporters.insert(name, exporter);
    }

    /// Find an importer for the given file extension
    #[must_use]
    pub fn find_importer(&self, extension: &str) -> Option<&dyn FormatImporter> {
        self.formats
            .values()
            .find(|format| format.can_import(extension))
            .map(|format| format.as_importer())
    }

    /// Find an exporter for the given file extension
    #[must_use]
    pub fn find_exporter(&self, extension: &str) -> Option<&dyn FormatExporter> {
        // Check combined formats first
        if let Some(format) = self.formats.values().find(|f| f.can_export(extension)) {
            return Some(format.as_exporter());
        }
        self.exporters
            .values()
            .find(|exporter| exporter.can_export(extension))
            .map(|exporter| exporter.as_ref())
    }

    /// Get all supported import extensions
    #[must_use]
    pub fn supported_import_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .formats
            .values()
            .flat_map(|format| FormatImporter::format_info(format.as_ref()).extensions.clone())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// Get all supported export extensions
    #[must_use]
    pub fn supported_export_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .formats
            .values()
            .flat_map(|format| FormatExporter::format_info(format.as_ref()).extensions.clone())
            .chain(
                self.exporters
                    .values()
                    .flat_map(|exporter| exporter.format_info().extensions.clone()),
            )
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// Import a file using the appropriate format
    ///
    /// # Errors
    ///
    /// Fails for unknown extensions and whatever the importer reports.
    pub fn import_file(
        &self,
        path: &Path,
        options: Option<&FormatOptions>,
    ) -> Result<(EditorDocument, FormatResult), EditorError> {
        let extension = extension_of(path)?;
        let importer = self
            .find_importer(extension)
            .ok_or_else(|| EditorError::UnsupportedFormat(extension.to_string()))?;

        let default_options = FormatOptions::default();
        let options = options.unwrap_or(&default_options);
        importer.import_from_path(path, options)
    }

    /// Export a document to a file using the appropriate format
    ///
    /// # Errors
    ///
    /// Fails for unknown extensions and whatever the exporter reports.
    pub fn export_file(
        &self,
        document: &EditorDocument,
        path: &Path,
        options: Option<&FormatOptions>,
    ) -> Result<FormatResult, EditorError> {
        let extension = extension_of(path)?;
        let exporter = self
            .find_exporter(extension)
            .ok_or_else(|| EditorError::UnsupportedFormat(extension.to_string()))?;

        let default_options = FormatOptions::default();
        let options = options.unwrap_or(&default_options);
        exporter.export_to_path(document, path, options)
    }
}

fn extension_of(path: &Path) -> Result<&str, EditorError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| EditorError::invalid_format("No file extension found"))
}

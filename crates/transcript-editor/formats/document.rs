//! Native document format
//!
//! A document is a JSON envelope:
//!
//! ```json
//! {
//!   "version": 3,
//!   "content": [
//!     { "type": "paragraph_start", "speaker": "Ada" },
//!     { "type": "word", "word": "hello", "source": "a.wav", "sourceStart": 0.0, "length": 0.4, "conf": 0.98 },
//!     { "type": "paragraph_end" }
//!   ],
//!   "sources": { "a.wav": "<base64>" }
//! }
//! ```
//!
//! Loading rejects unversioned files, other versions, unparsable payloads,
//! missing source references and structurally invalid streams. Saving writes
//! only the sources the stream references.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use transcript_core::{Boundary, Item, ItemStream, Source, SourceTable};

use crate::core::{CorruptDocumentError, EditorDocument, EditorError};
use crate::formats::{
    Format, FormatExporter, FormatImporter, FormatInfo, FormatOptions, FormatResult,
};

/// Version written by [`save`] and accepted by [`load`]
pub const DOCUMENT_VERSION: u64 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u64,
    content: Vec<WireItem>,
    #[serde(default)]
    sources: BTreeMap<String, String>,
}

const fn full_confidence() -> f64 {
    1.0
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireItem {
    Word {
        word: String,
        source: String,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
        #[serde(default = "full_confidence")]
        conf: f64,
    },
    Silence {
        source: String,
        #[serde(rename = "sourceStart")]
        source_start: f64,
        length: f64,
    },
    ArtificialSilence {
        length: f64,
    },
    ParagraphStart {
        speaker: String,
    },
    ParagraphEnd,
    Heading {
        text: String,
    },
}

impl From<&Item> for WireItem {
    fn from(item: &Item) -> Self {
        match item.clone() {
            Item::Word {
                text,
                source_id,
                source_offset,
                duration,
                confidence,
            } => Self::Word {
                word: text,
                source: source_id,
                source_start: source_offset,
                length: duration,
                conf: confidence,
            },
            Item::Silence {
                source_id,
                source_offset,
                duration,
            } => Self::Silence {
                source: source_id,
                source_start: source_offset,
                length: duration,
            },
            Item::ArtificialSilence { duration } => Self::ArtificialSilence { length: duration },
            Item::ParagraphBoundary(Boundary::Start { speaker }) => Self::ParagraphStart { speaker },
            Item::ParagraphBoundary(Boundary::End) => Self::ParagraphEnd,
            Item::Heading { text } => Self::Heading { text },
        }
    }
}

impl From<WireItem> for Item {
    fn from(item: WireItem) -> Self {
        match item {
            WireItem::Word {
                word,
                source,
                source_start,
                length,
                conf,
            } => Self::Word {
                text: word,
                source_id: source,
                source_offset: source_start,
                duration: length,
                confidence: conf,
            },
            WireItem::Silence {
                source,
                source_start,
                length,
            } => Self::Silence {
                source_id: source,
                source_offset: source_start,
                duration: length,
            },
            WireItem::ArtificialSilence { length } => Self::ArtificialSilence { duration: length },
            WireItem::ParagraphStart { speaker } => {
                Self::ParagraphBoundary(Boundary::Start { speaker })
            }
            WireItem::ParagraphEnd => Self::ParagraphBoundary(Boundary::End),
            WireItem::Heading { text } => Self::Heading { text },
        }
    }
}

/// Decode a document without checking structure or source references
///
/// Used by diagnostics that want to report every problem of a broken file
/// instead of stopping at the first. Zero-length content is pruned.
///
/// # Errors
///
/// Returns the version and payload errors of [`load`].
pub fn load_unchecked(bytes: &[u8]) -> Result<(ItemStream, SourceTable), CorruptDocumentError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| CorruptDocumentError::Unparsable(e.to_string()))?;
    let Some(object) = value.as_object() else {
        return Err(CorruptDocumentError::Unparsable(
            "expected a JSON object".to_string(),
        ));
    };
    let version = object
        .get("version")
        .ok_or(CorruptDocumentError::Unversioned)?;
    let version = version.as_u64().ok_or_else(|| {
        CorruptDocumentError::Unparsable(format!("version {version} is not a number"))
    })?;
    if version != DOCUMENT_VERSION {
        return Err(CorruptDocumentError::UnsupportedVersion { found: version });
    }

    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|e| CorruptDocumentError::Unparsable(e.to_string()))?;
    let mut sources = SourceTable::new();
    for (id, data) in envelope.sources {
        let bytes = STANDARD
            .decode(data.as_bytes())
            .map_err(|e| CorruptDocumentError::Unparsable(format!("source '{id}': {e}")))?;
        sources.insert(id, Source::new(bytes));
    }
    let mut stream: ItemStream = envelope.content.into_iter().map(Item::from).collect();
    stream.prune_zero_length();

    debug!(
        items = stream.len(),
        sources = sources.len(),
        "loaded document"
    );
    Ok((stream, sources))
}

/// Decode a document
///
/// # Errors
///
/// Returns a [`CorruptDocumentError`] describing why the file was rejected.
pub fn load(bytes: &[u8]) -> Result<(ItemStream, SourceTable), CorruptDocumentError> {
    let (stream, sources) = load_unchecked(bytes)?;
    stream
        .validate()
        .map_err(CorruptDocumentError::InvalidStructure)?;
    if let Some(source_id) = sources.missing_for(&stream).first() {
        return Err(CorruptDocumentError::MissingSource {
            source_id: (*source_id).to_string(),
        });
    }
    Ok((stream, sources))
}

/// Encode a document
///
/// Zero-length content is pruned first. Only referenced sources are written,
/// in id order.
///
/// # Errors
///
/// Fails only if JSON encoding fails.
pub fn save(stream: &ItemStream, sources: &SourceTable, pretty: bool) -> Result<Vec<u8>, EditorError> {
    let stream = stream.clone().pruned();
    let envelope = Envelope {
        version: DOCUMENT_VERSION,
        content: stream.iter().map(WireItem::from).collect(),
        sources: sources
            .referenced_by(&stream)
            .iter()
            .map(|(id, source)| (id.to_string(), STANDARD.encode(source.bytes())))
            .collect(),
    };
    let encoded = if pretty {
        serde_json::to_vec_pretty(&envelope)
    } else {
        serde_json::to_vec(&envelope)
    };
    let bytes = encoded.map_err(|e| EditorError::invalid_format(format!("Failed to encode document: {e}")))?;
    debug!(
        items = envelope.content.len(),
        sources = envelope.sources.len(),
        bytes = bytes.len(),
        "saved document"
    );
    Ok(bytes)
}

/// The native `.transcript` format
#[derive(Debug)]
pub struct DocumentFormat {
    info: FormatInfo,
}

impl DocumentFormat {
    /// Create a new document format handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: FormatInfo {
                name: "Transcript".to_string(),
                extensions: vec!["transcript".to_string()],
                mime_type: "application/json".to_string(),
                description: "Editable transcript with embedded media sources".to_string(),
                supports_speakers: true,
                supports_word_timings: true,
            },
        }
    }
}

impl Default for DocumentFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatImporter for DocumentFormat {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn import_from_reader(
        &self,
        reader: &mut dyn Read,
        _options: &FormatOptions,
    ) -> Result<(EditorDocument, FormatResult), EditorError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| EditorError::io(format!("Failed to read document: {e}")))?;
        let (stream, sources) = load(&bytes)?;
        let result = FormatResult::success(stream.len())
            .with_metadata("version", DOCUMENT_VERSION.to_string())
            .with_metadata("sources", sources.len().to_string());
        Ok((EditorDocument::from_parts(stream, sources)?, result))
    }
}

impl FormatExporter for DocumentFormat {
    fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    fn export_to_writer(
        &self,
        document: &EditorDocument,
        writer: &mut dyn Write,
        options: &FormatOptions,
    ) -> Result<FormatResult, EditorError> {
        let bytes = save(document.stream(), document.sources(), options.pretty)?;
        writer
            .write_all(&bytes)
            .map_err(|e| EditorError::io(format!("Failed to write document: {e}")))?;
        Ok(FormatResult::success(document.stream().len())
            .with_metadata("version", DOCUMENT_VERSION.to_string()))
    }
}

impl Format for DocumentFormat {
    fn as_importer(&self) -> &dyn FormatImporter {
        self
    }

    fn as_exporter(&self) -> &dyn FormatExporter {
        self
    }
}

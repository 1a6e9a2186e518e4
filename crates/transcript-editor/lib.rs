//! Editing layer for time-coded transcripts
//!
//! `transcript-editor` wraps a [`transcript_core::ItemStream`] in a document
//! with a cursor, a selection and the sources backing its words, and offers
//! every edit as a command that is validated before it is applied.
//!
//! # Features
//!
//! - **Validated edits**: a command that would break paragraph structure is
//!   rejected and leaves the document untouched
//! - **Typed conflicts**: speaker mismatches, empty clipboards and missing
//!   selections are distinguishable from corrupt input and logic errors
//! - **Anchored selection**: left/right extension grows and shrinks around the
//!   item the selection started on
//! - **Copy and paste by value**: clips carry their own sources
//! - **Formats**: native document codec plus WebVTT and SRT export
//! - **Playback hooks**: render segments handed to an application-owned engine
//!
//! # Example
//!
//! ```
//! use transcript_core::{Item, ItemStream};
//! use transcript_editor::{BreakLocation, EditorDocument, EditorError};
//!
//! let mut doc = EditorDocument::new(ItemStream::from_items(vec![
//!     Item::paragraph_start("Ada"),
//!     Item::word("hello", "a.wav", 0.0, 0.5),
//!     Item::word("world", "a.wav", 0.5, 0.5),
//!     Item::paragraph_end(),
//! ]))?;
//!
//! doc.insert_paragraph_break(0.5)?;
//! assert_eq!(doc.paragraphs().len(), 2);
//!
//! doc.reassign_speaker(3, "Bob")?;
//! let err = doc.remove_paragraph_break(BreakLocation::Time(0.5)).unwrap_err();
//! assert!(matches!(err, EditorError::SpeakerMismatch { .. }));
//! # Ok::<(), EditorError>(())
//! ```

#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod commands;
pub mod core;
pub mod playback;

#[cfg(feature = "formats")]
pub mod formats;

pub use commands::{
    BreakLocation, CommandResult, DeleteRange, InsertParagraphBreak, PasteClip, ReassignSpeaker,
    RemoveParagraphBreak, RenameSpeaker, RetextWord, TranscriptCommand,
};
pub use self::core::{
    Clip, Clipboard, CorruptDocumentError, Cursor, EditorDocument, EditorError, Result,
    Selection, SelectionEngine,
};
#[cfg(feature = "formats")]
pub use formats::{
    DocumentFormat, Format, FormatExporter, FormatImporter, FormatInfo, FormatOptions,
    FormatRegistry, FormatResult, SrtFormat, SubtitleOptions, WebVttFormat,
};
pub use playback::{AudioExporter, MonotonicProgress, PlaybackEngine};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for the transcript-editor crate
//!
//! `EditorError` wraps `CoreError` and separates three kinds of failure:
//! corrupt input rejected on load, logic errors where an edit would have
//! broken document structure, and user-recoverable conflicts the caller may
//! prompt about or ignore. A failed operation never leaves a partially
//! applied edit behind.

use core::fmt;

use thiserror::Error;
use transcript_core::{CoreError, StructureError};

/// Reasons a document file is rejected on load
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorruptDocumentError {
    /// Payload is not a readable document
    #[error("Document payload is unparsable: {0}")]
    Unparsable(String),

    /// Document carries no version field
    #[error("Unversioned documents are not supported")]
    Unversioned,

    /// Document was written by an incompatible version
    #[error("Unsupported document version {found}")]
    UnsupportedVersion { found: u64 },

    /// An item references a source missing from the file
    #[error("Source '{source_id}' is referenced but not present")]
    MissingSource { source_id: String },

    /// Items violate paragraph structure
    #[error("Document structure is invalid: {0}")]
    InvalidStructure(StructureError),
}

/// Main error type for transcript-editor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Errors from transcript-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Document could not be loaded
    #[error(transparent)]
    CorruptDocument(#[from] CorruptDocumentError),

    /// An edit produced a structurally invalid stream and was not applied
    #[error("Command '{command}' produced an invalid document: {error}")]
    StructuralViolation {
        command: String,
        error: StructureError,
    },

    /// Paragraphs with different speakers cannot be merged
    #[error("Cannot merge paragraphs of '{left}' and '{right}'")]
    SpeakerMismatch { left: String, right: String },

    /// Operation needs a selection
    #[error("Nothing is selected")]
    NoSelection,

    /// Paste without a prior copy
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// No content item at the given time
    #[error("No item at {time:.3}s")]
    NoItemAtTime { time: f64 },

    /// First paragraph has nothing to merge with
    #[error("There is no previous paragraph")]
    NoPreviousParagraph,

    /// Index does not point at a paragraph start
    #[error("Item {index} is not a paragraph start")]
    NotAParagraphStart { index: usize },

    /// A heading separates the paragraphs to merge
    #[error("Cannot merge paragraphs separated by a heading")]
    HeadingBetweenParagraphs,

    /// Import/export error
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid format error
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Unsupported format error
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Playback or audio export collaborator failed
    #[error("Playback error: {0}")]
    Playback(String),
}

impl EditorError {
    /// Create a structural violation for `command`
    pub fn structural_violation<T: fmt::Display>(command: T, error: StructureError) -> Self {
        Self::StructuralViolation {
            command: command.to_string(),
            error,
        }
    }

    /// Create a new IO error
    pub fn io<T: fmt::Display>(message: T) -> Self {
        Self::Io(message.to_string())
    }

    /// Create a new invalid format error
    pub fn invalid_format<T: fmt::Display>(message: T) -> Self {
        Self::InvalidFormat(message.to_string())
    }

    /// Create a new playback error
    pub fn playback<T: fmt::Display>(message: T) -> Self {
        Self::Playback(message.to_string())
    }

    /// Check if the error is a conflict the user can resolve
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SpeakerMismatch { .. }
                | Self::NoSelection
                | Self::EmptyClipboard
                | Self::NoItemAtTime { .. }
                | Self::NoPreviousParagraph
                | Self::NotAParagraphStart { .. }
                | Self::HeadingBetweenParagraphs
        )
    }

    /// Check if error is recoverable
    ///
    /// Structural violations indicate a bug and corrupt documents cannot be
    /// opened; everything else leaves the document usable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_recoverable(),
            Self::CorruptDocument(_) | Self::StructuralViolation { .. } => false,
            Self::SpeakerMismatch { .. }
            | Self::NoSelection
            | Self::EmptyClipboard
            | Self::NoItemAtTime { .. }
            | Self::NoPreviousParagraph
            | Self::NotAParagraphStart { .. }
            | Self::HeadingBetweenParagraphs
            | Self::Io(_)
            | Self::InvalidFormat(_)
            | Self::UnsupportedFormat(_)
            | Self::Playback(_) => true,
        }
    }
}

impl From<StructureError> for EditorError {
    fn from(error: StructureError) -> Self {
        Self::Core(CoreError::Structure(error))
    }
}

impl From<std::io::Error> for EditorError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_core::StructureRule;

    #[test]
    fn conflicts_are_recoverable() {
        let err = EditorError::SpeakerMismatch {
            left: "A".to_string(),
            right: "B".to_string(),
        };
        assert!(err.is_conflict());
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Cannot merge paragraphs of 'A' and 'B'");
    }

    #[test]
    fn structural_violations_are_fatal() {
        let err = EditorError::structural_violation(
            "Paste",
            StructureError::new(StructureRule::NestedParagraph, 7),
        );
        assert!(!err.is_conflict());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("at item 7"));
    }

    #[test]
    fn corrupt_documents_are_distinct() {
        let err: EditorError = CorruptDocumentError::UnsupportedVersion { found: 9 }.into();
        assert!(!err.is_conflict());
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Unsupported document version 9");
    }
}

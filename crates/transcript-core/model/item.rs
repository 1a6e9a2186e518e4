//! Tagged item variants of a transcript
//!
//! Every consumption site matches exhaustively over [`Item`], so adding a
//! variant is a compile error wherever it is not handled.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paragraph boundary marker
///
/// Boundaries come in pairs: a `Start` carrying the paragraph speaker and a
/// matching `End`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary {
    /// Opens a paragraph spoken by `speaker`
    Start { speaker: String },
    /// Closes the open paragraph
    End,
}

/// One element of a transcript
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Item {
    /// A transcribed word backed by a span of `source_id`
    Word {
        text: String,
        source_id: String,
        source_offset: f64,
        duration: f64,
        confidence: f64,
    },
    /// Silence taken from the original source
    Silence {
        source_id: String,
        source_offset: f64,
        duration: f64,
    },
    /// Silence inserted editorially, with no source backing
    ArtificialSilence { duration: f64 },
    /// Zero-duration structural paragraph marker
    ParagraphBoundary(Boundary),
    /// Zero-duration heading, only valid outside paragraphs
    Heading { text: String },
}

/// Field-less discriminant of [`Item`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Word,
    Silence,
    ArtificialSilence,
    ParagraphStart,
    ParagraphEnd,
    Heading,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Word => "word",
            Self::Silence => "silence",
            Self::ArtificialSilence => "artificial_silence",
            Self::ParagraphStart => "paragraph_start",
            Self::ParagraphEnd => "paragraph_end",
            Self::Heading => "heading",
        };
        f.write_str(name)
    }
}

impl Item {
    /// Create a word with full confidence
    pub fn word(
        text: impl Into<String>,
        source_id: impl Into<String>,
        source_offset: f64,
        duration: f64,
    ) -> Self {
        Self::Word {
            text: text.into(),
            source_id: source_id.into(),
            source_offset,
            duration,
            confidence: 1.0,
        }
    }

    /// Create a silence backed by a source span
    pub fn silence(source_id: impl Into<String>, source_offset: f64, duration: f64) -> Self {
        Self::Silence {
            source_id: source_id.into(),
            source_offset,
            duration,
        }
    }

    /// Create an editorial silence
    #[must_use]
    pub const fn artificial_silence(duration: f64) -> Self {
        Self::ArtificialSilence { duration }
    }

    /// Create a paragraph start for `speaker`
    pub fn paragraph_start(speaker: impl Into<String>) -> Self {
        Self::ParagraphBoundary(Boundary::Start {
            speaker: speaker.into(),
        })
    }

    /// Create a paragraph end
    #[must_use]
    pub const fn paragraph_end() -> Self {
        Self::ParagraphBoundary(Boundary::End)
    }

    /// Create a heading
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading { text: text.into() }
    }

    /// Discriminant of this item
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Word { .. } => ItemKind::Word,
            Self::Silence { .. } => ItemKind::Silence,
            Self::ArtificialSilence { .. } => ItemKind::ArtificialSilence,
            Self::ParagraphBoundary(Boundary::Start { .. }) => ItemKind::ParagraphStart,
            Self::ParagraphBoundary(Boundary::End) => ItemKind::ParagraphEnd,
            Self::Heading { .. } => ItemKind::Heading,
        }
    }

    /// Duration in seconds; structural items contribute zero
    #[must_use]
    pub const fn duration(&self) -> f64 {
        match self {
            Self::Word { duration, .. }
            | Self::Silence { duration, .. }
            | Self::ArtificialSilence { duration } => *duration,
            Self::ParagraphBoundary(_) | Self::Heading { .. } => 0.0,
        }
    }

    /// Overwrite the duration of a content item. Structural items are left untouched.
    pub fn set_duration(&mut self, value: f64) {
        match self {
            Self::Word { duration, .. }
            | Self::Silence { duration, .. }
            | Self::ArtificialSilence { duration } => *duration = value,
            Self::ParagraphBoundary(_) | Self::Heading { .. } => {}
        }
    }

    /// Drop `by` seconds from the leading edge, advancing any source offset
    pub fn trim_leading(&mut self, by: f64) {
        match self {
            Self::Word {
                source_offset,
                duration,
                ..
            }
            | Self::Silence {
                source_offset,
                duration,
                ..
            } => {
                *source_offset += by;
                *duration -= by;
            }
            Self::ArtificialSilence { duration } => *duration -= by,
            Self::ParagraphBoundary(_) | Self::Heading { .. } => {}
        }
    }

    /// Whether the item is a word, silence or artificial silence
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(
            self,
            Self::Word { .. } | Self::Silence { .. } | Self::ArtificialSilence { .. }
        )
    }

    /// Whether the item is structural (paragraph boundary or heading)
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !self.is_content()
    }

    /// Source id and offset for source-backed items
    #[must_use]
    pub fn source(&self) -> Option<(&str, f64)> {
        match self {
            Self::Word {
                source_id,
                source_offset,
                ..
            }
            | Self::Silence {
                source_id,
                source_offset,
                ..
            } => Some((source_id.as_str(), *source_offset)),
            Self::ArtificialSilence { .. } | Self::ParagraphBoundary(_) | Self::Heading { .. } => {
                None
            }
        }
    }

    /// Word or heading text
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Word { text, .. } | Self::Heading { text } => Some(text.as_str()),
            Self::Silence { .. } | Self::ArtificialSilence { .. } | Self::ParagraphBoundary(_) => {
                None
            }
        }
    }

    /// Speaker of a paragraph start
    #[must_use]
    pub fn speaker(&self) -> Option<&str> {
        match self {
            Self::ParagraphBoundary(Boundary::Start { speaker }) => Some(speaker.as_str()),
            _ => None,
        }
    }

    /// Whether this is a paragraph start
    #[must_use]
    pub const fn is_paragraph_start(&self) -> bool {
        matches!(self, Self::ParagraphBoundary(Boundary::Start { .. }))
    }

    /// Whether this is a paragraph end
    #[must_use]
    pub const fn is_paragraph_end(&self) -> bool {
        matches!(self, Self::ParagraphBoundary(Boundary::End))
    }
}

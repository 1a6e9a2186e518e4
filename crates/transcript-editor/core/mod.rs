//! Core types of the editor
//!
//! This module contains the fundamental building blocks of the editor:
//! - `EditorDocument`: item stream, sources, cursor and selection
//! - Cursor and selection types
//! - Copy and paste clips
//! - Error types for editor operations

pub mod clipboard;
pub mod cursor;
pub mod document;
pub mod errors;
pub mod selection;

// Re-export commonly used types
pub use clipboard::{Clip, Clipboard};
pub use cursor::{first_possible_cursor_position, is_cursor_position, Cursor};
pub use document::EditorDocument;
pub use errors::{CorruptDocumentError, EditorError, Result};
pub use selection::{Selection, SelectionEngine};

//! Command system for transcript edits
//!
//! Every edit is a pure function from one item stream to the next. Commands
//! never touch the document directly: [`crate::EditorDocument::apply`] runs
//! them, validates the stream they return and only then replaces its own.
//! A rejected result is never applied, so a failed command leaves nothing
//! half-done.

pub mod content_commands;
pub mod paragraph_commands;

pub use content_commands::*;
pub use paragraph_commands::*;

use crate::core::Result;
use transcript_core::ItemStream;

/// Result of executing a command
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Replacement stream, `None` when the command was a no-op
    pub stream: Option<ItemStream>,

    /// Optional message about the operation
    pub message: Option<String>,

    /// Item index the cursor should move to
    pub new_cursor: Option<usize>,

    /// Whether the document content was changed
    pub content_changed: bool,
}

impl CommandResult {
    /// A command that left the stream as it was
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// A command that produced `stream`
    #[must_use]
    pub fn changed(stream: ItemStream) -> Self {
        Self {
            stream: Some(stream),
            message: None,
            new_cursor: None,
            content_changed: true,
        }
    }

    /// Add a cursor position to the result
    #[must_use]
    pub const fn with_cursor(mut self, index: usize) -> Self {
        self.new_cursor = Some(index);
        self
    }

    /// Add a message to the result
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// An edit over an item stream
///
/// # Examples
///
/// ```
/// use transcript_core::{Item, ItemStream};
/// use transcript_editor::{CommandResult, Result, TranscriptCommand};
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl TranscriptCommand for Uppercase {
///     fn apply(&self, stream: &ItemStream) -> Result<CommandResult> {
///         let items = stream
///             .iter()
///             .cloned()
///             .map(|mut item| {
///                 if let Item::Word { text, .. } = &mut item {
///                     *text = text.to_uppercase();
///                 }
///                 item
///             })
///             .collect();
///         Ok(CommandResult::changed(items))
///     }
///
///     fn description(&self) -> &str {
///         "Uppercase all words"
///     }
/// }
/// ```
pub trait TranscriptCommand: core::fmt::Debug + Send + Sync {
    /// Compute the edited stream
    ///
    /// Must not assume the result is accepted; validation happens afterwards.
    fn apply(&self, stream: &ItemStream) -> Result<CommandResult>;

    /// Get a human-readable description of the command
    fn description(&self) -> &str;

    /// Check if this command modifies document content
    fn modifies_content(&self) -> bool {
        true
    }
}

//! Core error type for transcript-core operations
//!
//! Query functions are total and never fail; the errors here surface from
//! structural validation, render coalescing of malformed streams and timestamp
//! parsing.

use crate::analysis::StructureError;
use thiserror::Error;

/// Main error type for transcript-core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Item stream violates paragraph structure
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// Time format parsing errors
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal consistency error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Create validation error from message
    pub fn validation<T: core::fmt::Display>(message: T) -> Self {
        Self::Validation(message.to_string())
    }

    /// Create internal error (indicates a bug)
    pub fn internal<T: core::fmt::Display>(message: T) -> Self {
        Self::Internal(message.to_string())
    }

    /// Check if error is recoverable
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidTime(_) | Self::Validation(_) => true,
            Self::Structure(_) | Self::Internal(_) => false,
        }
    }
}

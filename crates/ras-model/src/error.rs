//! Model error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the line-document model and identifier parsing.
#[derive(Debug, Error)]
pub enum ModelError {
    /// File I/O error.
    #[error("failed to {operation} file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource number is not a decimal in `01..=99`.
    #[error("invalid resource id '{value}': expected a number between 01 and 99")]
    InvalidResourceId { value: String },

    /// Resource slot is not `<letter><NN>` with a known letter.
    #[error("invalid resource slot '{value}': expected p, g, u or f followed by 01..99")]
    InvalidResourceSlot { value: String },

    /// Unknown resource kind name.
    #[error("unknown resource kind: {value}")]
    UnknownKind { value: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create an Io error for the given operation and path.
    pub fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidResourceId error.
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidResourceId {
            value: value.into(),
        }
    }

    /// Create an InvalidResourceSlot error.
    pub fn invalid_slot(value: impl Into<String>) -> Self {
        Self::InvalidResourceSlot {
            value: value.into(),
        }
    }

    /// Returns true when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

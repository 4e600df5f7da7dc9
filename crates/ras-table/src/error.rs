//! Error types for table codec operations.

use std::path::PathBuf;
use thiserror::Error;

use ras_model::ModelError;

use crate::types::TableKind;

/// Errors that can occur when locating, decoding or re-encoding tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// Table declaration whose extent cannot be computed.
    #[error("malformed table at line {line} (`{key}`): {message}")]
    MalformedTable {
        /// 1-based line number of the declaration.
        line: usize,
        key: &'static str,
        message: String,
    },

    /// Value does not fit in a fixed-width field.
    #[error("value {value} does not fit in a {width}-character field")]
    FieldOverflow { value: String, width: usize },

    /// Scale factor is NaN or infinite.
    #[error("scale factor must be finite, got {factor}")]
    InvalidScaleFactor { factor: f64 },

    /// No table of the requested kind (or ordinal) in the document.
    #[error("no {kind} table{} found", ordinal_suffix(.index))]
    TableNotFound {
        kind: TableKind,
        index: Option<usize>,
    },

    /// Codec options that cannot describe a layout.
    #[error("invalid codec options: {message}")]
    InvalidOptions { message: String },

    /// CSV export error.
    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Model or I/O error.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

impl TableError {
    /// Create a MalformedTable error from a 0-based line index.
    pub fn malformed(line_index: usize, key: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedTable {
            line: line_index + 1,
            key,
            message: message.into(),
        }
    }

    /// Create a FieldOverflow error.
    pub fn field_overflow(value: impl ToString, width: usize) -> Self {
        Self::FieldOverflow {
            value: value.to_string(),
            width,
        }
    }

    /// Create an InvalidOptions error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

fn ordinal_suffix(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |index| format!(" at index {index}"))
}

//! Registry error types.

use std::path::PathBuf;
use thiserror::Error;

use ras_model::{ModelError, ResourceId, ResourceKind, ResourceSlot};

/// Errors from registry and plan-file operations.
///
/// Every variant except `Model` is raised during validation, before any
/// file is written.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Template resource (or its required sidecar) does not exist.
    #[error("template {kind} file does not exist: {path}")]
    MissingTemplate { kind: ResourceKind, path: PathBuf },

    /// Referenced id is not registered in the project file.
    #[error("{kind} {id} is not registered in the project file")]
    UnknownResourceId { kind: ResourceKind, id: ResourceId },

    /// Flag value outside its enumerated set.
    #[error("invalid value {value} for `{key}`: expected 0 or -1")]
    InvalidFlagValue { key: &'static str, value: i32 },

    /// Core count must be at least one.
    #[error("invalid core count {value}: expected at least 1")]
    InvalidCoreCount { value: u32 },

    /// No free id left in `01..=99`.
    #[error("no free {kind} number left in 01..99")]
    NumberingExhausted { kind: ResourceKind },

    /// Template file exists on disk but its number is free in the project,
    /// so the copy would be written over the template itself.
    #[error("template {slot} is not registered in the project file: {path}")]
    TemplateNotRegistered { slot: ResourceSlot, path: PathBuf },

    /// Slot of the wrong kind passed to a kind-specific operation.
    #[error("expected a {expected} slot, got {actual}")]
    KindMismatch {
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// Directory to search does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Model or I/O error.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Model(ModelError::io(operation, path, source))
    }
}

//! Shared model for HEC-RAS project configuration files.
//!
//! - [`LineDocument`]: a text file as an ordered sequence of lines that can
//!   be queried, mutated in memory and written back in full.
//! - [`ResourceKind`], [`ResourceId`], [`ResourceSlot`]: the numbering scheme
//!   used for plans, geometries, unsteady flows and steady flows.
//! - [`key_value`]: helpers for `Key=Value` statement lines.

pub mod document;
pub mod error;
pub mod key_value;
pub mod resource;

pub use document::{LineDocument, Newline};
pub use error::{ModelError, Result};
pub use resource::{
    GEOMETRY_HEADER_KEYS, ResourceId, ResourceKind, ResourceSlot, SIDECAR_SUFFIX, SidecarPolicy,
};

//! Core types for hydrograph tables.

mod options;
mod table;

pub use options::{CodecOptions, DEFAULT_FIELD_WIDTH, DEFAULT_VALUES_PER_LINE};
pub use table::{
    DecodedValues, DroppedField, HydrographTable, ScaledTable, ScaledTableReport, TableExtent,
    TableKind, TableSelector,
};

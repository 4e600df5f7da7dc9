//! Fixed-width hydrograph table codec for HEC-RAS unsteady flow files.
//!
//! Unsteady flow files embed time series as a declaration line
//! (`Flow Hydrograph= 23`) followed by values packed ten per line in
//! 8-character fields with no separator:
//!
//! ```text
//! Flow Hydrograph= 23
//!      100     200     300     400     500     600     700     800     900    1000
//!     1100    1200    1300    1400    1500    1600    1700    1800    1900    2000
//!     2100    2200    2300
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use ras_table::{TableKind, TableSelector, scale_tables};
//!
//! let reports = scale_tables(
//!     Path::new("Muncie.u01"),
//!     TableKind::FlowHydrograph,
//!     1.25,
//!     TableSelector::All,
//! )
//! .unwrap();
//! println!("scaled {} tables", reports.len());
//! ```

pub mod error;
pub mod file;
pub mod locate;
pub mod reader;
pub mod transform;
pub mod types;
pub mod writer;

pub use error::{Result, TableError};
pub use file::{
    extract_tables, extract_tables_with_options, scale_tables, scale_tables_in_document,
    scale_tables_with_options, write_comparison_csv,
};
pub use locate::{locate_tables, locate_tables_of_kind};
pub use reader::{decode_table, read_table, read_tables};
pub use transform::scale_table;
pub use types::{
    CodecOptions, DecodedValues, DroppedField, HydrographTable, ScaledTable, ScaledTableReport,
    TableExtent, TableKind, TableSelector,
};
pub use writer::{FieldValue, encode_table, format_lines};

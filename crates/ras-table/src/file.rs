//! Whole-file table operations.

use std::path::Path;

use ras_model::LineDocument;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, TableError};
use crate::locate::locate_tables_of_kind;
use crate::reader::{read_table, read_tables};
use crate::transform::scale_table;
use crate::types::{
    CodecOptions, HydrographTable, ScaledTable, ScaledTableReport, TableKind, TableSelector,
};
use crate::writer::encode_table;

/// Read every table in the flow file at `path`.
pub fn extract_tables(path: &Path) -> Result<Vec<HydrographTable>> {
    extract_tables_with_options(path, &CodecOptions::default())
}

/// Read every table in the flow file at `path` with a custom layout.
pub fn extract_tables_with_options(
    path: &Path,
    options: &CodecOptions,
) -> Result<Vec<HydrographTable>> {
    let document = LineDocument::read(path)?;
    read_tables(&document, options)
}

/// Scale the selected tables of `kind` in `document`.
///
/// Every selected table is decoded, scaled and re-encoded in memory. Fails
/// without modifying `document` when no table matches or a scaled value
/// overflows its field.
pub fn scale_tables_in_document(
    document: &mut LineDocument,
    kind: TableKind,
    factor: f64,
    selector: TableSelector,
    options: &CodecOptions,
) -> Result<Vec<ScaledTableReport>> {
    if !factor.is_finite() {
        return Err(TableError::InvalidScaleFactor { factor });
    }
    let extents = locate_tables_of_kind(document, kind, options)?;
    let selected = match selector {
        TableSelector::All => extents,
        TableSelector::Index(index) => extents.get(index).copied().into_iter().collect(),
    };
    if selected.is_empty() {
        return Err(TableError::TableNotFound {
            kind,
            index: match selector {
                TableSelector::All => None,
                TableSelector::Index(index) => Some(index),
            },
        });
    }

    let mut updated = document.clone();
    let mut reports = Vec::with_capacity(selected.len());
    // Bottom-up, so a block that changes length cannot shift tables not yet encoded.
    for extent in selected.into_iter().rev() {
        let table = read_table(&updated, extent, options);
        if !table.dropped.is_empty() {
            warn!(
                kind = %extent.kind,
                line = extent.declaration_line + 1,
                dropped = table.dropped.len(),
                "table has fields that are not numbers; they are not re-encoded"
            );
        }
        let scaled = scale_table(&table.values, factor)?;
        encode_table(&mut updated, extent.start, &scaled.scaled, options)?;
        reports.push(ScaledTableReport {
            extent,
            factor,
            table: scaled,
            dropped: table.dropped,
        });
    }
    reports.reverse();
    *document = updated;
    Ok(reports)
}

/// Scale the selected tables of `kind` in the flow file at `path`.
///
/// The file is written once, after every table has been re-encoded.
pub fn scale_tables(
    path: &Path,
    kind: TableKind,
    factor: f64,
    selector: TableSelector,
) -> Result<Vec<ScaledTableReport>> {
    scale_tables_with_options(path, kind, factor, selector, &CodecOptions::default())
}

/// Scale tables in a file with a custom layout.
pub fn scale_tables_with_options(
    path: &Path,
    kind: TableKind,
    factor: f64,
    selector: TableSelector,
    options: &CodecOptions,
) -> Result<Vec<ScaledTableReport>> {
    if !factor.is_finite() {
        return Err(TableError::InvalidScaleFactor { factor });
    }
    let mut document = LineDocument::read(path)?;
    let reports = scale_tables_in_document(&mut document, kind, factor, selector, options)?;
    document.write(path)?;
    info!(
        path = %path.display(),
        %kind,
        factor,
        table_count = reports.len(),
        "scaled tables"
    );
    Ok(reports)
}

#[derive(Serialize)]
struct ComparisonRow {
    index: usize,
    original: f64,
    scaled: i64,
}

/// Write original and scaled values side by side as `index,original,scaled`.
pub fn write_comparison_csv(path: &Path, table: &ScaledTable) -> Result<()> {
    let csv_error = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for (index, (&original, &scaled)) in table.original.iter().zip(&table.scaled).enumerate() {
        writer
            .serialize(ComparisonRow {
                index,
                original,
                scaled,
            })
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| TableError::Csv {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOW_FILE: &str = "\
Flow Title=Event
Boundary Location=White,Muncie,15696.24
Flow Hydrograph= 3
     100     200     300
Boundary Location=White,Muncie,237.6
Flow Hydrograph= 2
      10      20
Stage Hydrograph= 1
     5.5
";

    #[test]
    fn test_scale_all_tables_of_kind() {
        let mut doc = LineDocument::parse(FLOW_FILE);
        let reports = scale_tables_in_document(
            &mut doc,
            TableKind::FlowHydrograph,
            2.0,
            TableSelector::All,
            &CodecOptions::default(),
        )
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].table.scaled, vec![200, 400, 600]);
        assert_eq!(reports[1].table.scaled, vec![20, 40]);
        assert_eq!(doc.line(3), Some("     200     400     600"));
        assert_eq!(doc.line(6), Some("      20      40"));
        assert_eq!(doc.line(8), Some("     5.5"));
    }

    #[test]
    fn test_scale_selected_table() {
        let mut doc = LineDocument::parse(FLOW_FILE);
        let reports = scale_tables_in_document(
            &mut doc,
            TableKind::FlowHydrograph,
            0.5,
            TableSelector::Index(1),
            &CodecOptions::default(),
        )
        .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].extent.declaration_line, 5);
        assert_eq!(doc.line(3), Some("     100     200     300"));
        assert_eq!(doc.line(6), Some("       5      10"));
    }

    #[test]
    fn test_missing_table_leaves_document_unchanged() {
        let mut doc = LineDocument::parse(FLOW_FILE);
        let err = scale_tables_in_document(
            &mut doc,
            TableKind::GateOpenings,
            2.0,
            TableSelector::All,
            &CodecOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::TableNotFound { index: None, .. }));

        let err = scale_tables_in_document(
            &mut doc,
            TableKind::FlowHydrograph,
            2.0,
            TableSelector::Index(2),
            &CodecOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::TableNotFound { index: Some(2), .. }));
        assert_eq!(doc.to_text(), FLOW_FILE);
    }

    #[test]
    fn test_overflow_leaves_document_unchanged() {
        let mut doc = LineDocument::parse(FLOW_FILE);
        let err = scale_tables_in_document(
            &mut doc,
            TableKind::FlowHydrograph,
            1e6,
            TableSelector::All,
            &CodecOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::FieldOverflow { .. }));
        assert_eq!(doc.to_text(), FLOW_FILE);
    }

    #[test]
    fn test_comparison_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.csv");
        let table = scale_table(&[1.5, 2.0], 3.0).unwrap();
        write_comparison_csv(&path, &table).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "index,original,scaled\n0,1.5,4\n1,2.0,6\n"
        );
    }
}

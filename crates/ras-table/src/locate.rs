//! Table boundary detection.

use ras_model::LineDocument;
use ras_model::key_value::value_of;
use tracing::debug;

use crate::error::{Result, TableError};
use crate::types::{CodecOptions, TableExtent, TableKind};

/// Find every table declaration in `document`, in document order.
///
/// A declaration is a line starting with one of the [`TableKind`] keys
/// followed by the value count. The table body spans the next
/// `ceil(count / values_per_line)` lines, cut short by the following
/// declaration or the end of the document.
pub fn locate_tables(document: &LineDocument, options: &CodecOptions) -> Result<Vec<TableExtent>> {
    options.validate()?;

    let mut declarations = Vec::new();
    for (index, line) in document.lines().enumerate() {
        let Some((kind, count_text)) = declaration(line) else {
            continue;
        };
        let count_text = count_text.trim();
        let declared_count = count_text.parse::<usize>().map_err(|_| {
            TableError::malformed(
                index,
                kind.key(),
                format!("value count '{count_text}' is not a number"),
            )
        })?;
        declarations.push((index, kind, declared_count));
    }

    let extents: Vec<TableExtent> = declarations
        .iter()
        .enumerate()
        .map(|(ordinal, &(declaration_line, kind, declared_count))| {
            let start = declaration_line + 1;
            let limit = declarations
                .get(ordinal + 1)
                .map_or(document.len(), |&(next, _, _)| next);
            let end = (start + options.lines_for(declared_count)).min(limit);
            TableExtent {
                kind,
                declaration_line,
                declared_count,
                start,
                end,
            }
        })
        .collect();

    debug!(table_count = extents.len(), "located tables");
    Ok(extents)
}

/// Find the tables of one kind.
pub fn locate_tables_of_kind(
    document: &LineDocument,
    kind: TableKind,
    options: &CodecOptions,
) -> Result<Vec<TableExtent>> {
    let mut extents = locate_tables(document, options)?;
    extents.retain(|extent| extent.kind == kind);
    Ok(extents)
}

fn declaration(line: &str) -> Option<(TableKind, &str)> {
    TableKind::ALL
        .iter()
        .find_map(|&kind| value_of(line, kind.key()).map(|count| (kind, count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(text: &str) -> Result<Vec<TableExtent>> {
        locate_tables(&LineDocument::parse(text), &CodecOptions::default())
    }

    #[test]
    fn test_extent_from_declared_count() {
        let text = "\
Boundary Location=White,Muncie,15696.24
Interval=1HOUR
Flow Hydrograph= 23
     100     200     300     400     500     600     700     800     900    1000
    1100    1200    1300    1400    1500    1600    1700    1800    1900    2000
    2100    2200    2300
DSS Path=
";
        let extents = locate(text).unwrap();
        assert_eq!(extents.len(), 1);
        let extent = extents[0];
        assert_eq!(extent.kind, TableKind::FlowHydrograph);
        assert_eq!(extent.declaration_line, 2);
        assert_eq!(extent.declared_count, 23);
        assert_eq!(extent.lines(), 3..6);
    }

    #[test]
    fn test_every_kind_is_recognized() {
        let text = "\
Flow Hydrograph= 1
       1
Stage Hydrograph= 1
       2
Gate Openings= 1
       3
Uniform Lateral Inflow= 1
       4
Lateral Inflow Hydrograph= 1
       5
";
        let kinds: Vec<TableKind> = locate(text).unwrap().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, TableKind::ALL);
    }

    #[test]
    fn test_extent_clamped_to_next_declaration() {
        let text = "Flow Hydrograph= 30\n       1\nStage Hydrograph= 2\n       1       2\n";
        let extents = locate(text).unwrap();
        assert_eq!(extents[0].lines(), 1..2);
        assert_eq!(extents[1].lines(), 3..4);
    }

    #[test]
    fn test_extent_clamped_to_document_end() {
        let extents = locate("Flow Hydrograph= 25\n       1").unwrap();
        assert_eq!(extents[0].lines(), 1..2);
    }

    #[test]
    fn test_empty_table() {
        let extents = locate("Flow Hydrograph= 0\nDSS Path=\n").unwrap();
        assert_eq!(extents[0].lines(), 1..1);
    }

    #[test]
    fn test_non_numeric_count_is_malformed() {
        let err = locate("Interval=1HOUR\nFlow Hydrograph= many\n").unwrap_err();
        match err {
            TableError::MalformedTable { line, key, .. } => {
                assert_eq!(line, 2);
                assert_eq!(key, "Flow Hydrograph=");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filter_by_kind() {
        let doc = LineDocument::parse("Stage Hydrograph= 1\n       1\nFlow Hydrograph= 1\n       2\n");
        let extents =
            locate_tables_of_kind(&doc, TableKind::FlowHydrograph, &CodecOptions::default()).unwrap();
        assert_eq!(extents.len(), 1);
        assert_eq!(extents[0].declaration_line, 2);
    }
}

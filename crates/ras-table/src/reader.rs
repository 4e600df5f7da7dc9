//! Fixed-width table decoding.

use ras_model::LineDocument;
use tracing::debug;

use crate::error::Result;
use crate::locate::locate_tables;
use crate::types::{CodecOptions, DecodedValues, DroppedField, HydrographTable, TableExtent};

/// Decode the values stored in lines `start..end` of `document`.
///
/// Each line is cut into consecutive fields of `field_width` characters.
/// Blank fields are skipped. Fields that do not parse as a finite number
/// are skipped and reported in [`DecodedValues::dropped`].
pub fn decode_table(
    document: &LineDocument,
    start: usize,
    end: usize,
    options: &CodecOptions,
) -> DecodedValues {
    let mut decoded = DecodedValues::default();
    let end = end.min(document.len());
    for line_index in start..end {
        let Some(line) = document.line(line_index) else {
            break;
        };
        for (field, text) in split_fields(line, options.field_width.max(1))
            .into_iter()
            .enumerate()
        {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => decoded.values.push(value),
                _ => {
                    debug!(line = line_index + 1, field, text = %text, "dropped table field");
                    decoded.dropped.push(DroppedField {
                        line: line_index,
                        field,
                        text: text.to_string(),
                    });
                }
            }
        }
    }
    decoded
}

/// Decode the table at `extent`.
pub fn read_table(
    document: &LineDocument,
    extent: TableExtent,
    options: &CodecOptions,
) -> HydrographTable {
    let DecodedValues { values, dropped } =
        decode_table(document, extent.start, extent.end, options);
    if values.len() != extent.declared_count {
        debug!(
            kind = %extent.kind,
            declared = extent.declared_count,
            decoded = values.len(),
            "decoded value count differs from declaration"
        );
    }
    HydrographTable {
        extent,
        values,
        dropped,
    }
}

/// Locate and decode every table in `document`.
pub fn read_tables(
    document: &LineDocument,
    options: &CodecOptions,
) -> Result<Vec<HydrographTable>> {
    Ok(locate_tables(document, options)?
        .into_iter()
        .map(|extent| read_table(document, extent, options))
        .collect())
}

/// Split a line into fixed-width fields; the last field may be shorter.
fn split_fields(line: &str, width: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut field_start = 0;
    for (count, (offset, _)) in line.char_indices().enumerate() {
        if count > 0 && count % width == 0 {
            fields.push(&line[field_start..offset]);
            field_start = offset;
        }
    }
    if field_start < line.len() {
        fields.push(&line[field_start..]);
    }
    fields
}

//! Fixed-width table encoding.

use std::ops::Range;

use ras_model::LineDocument;
use tracing::debug;

use crate::error::{Result, TableError};
use crate::types::CodecOptions;

/// A value that can be written into a fixed-width field.
pub trait FieldValue {
    /// Render the value in at most `width` characters.
    fn render(&self, width: usize) -> Result<String>;
}

impl FieldValue for i64 {
    fn render(&self, width: usize) -> Result<String> {
        let text = self.to_string();
        if text.len() > width {
            return Err(TableError::field_overflow(text, width));
        }
        Ok(text)
    }
}

impl FieldValue for f64 {
    /// Integral values render without a fractional part. Other values use
    /// the shortest round-trip form when it fits; otherwise the fixed-point
    /// or scientific form that fits and reads back closest to the value.
    fn render(&self, width: usize) -> Result<String> {
        if !self.is_finite() {
            return Err(TableError::field_overflow(self, width));
        }
        let shortest = self.to_string();
        if shortest.len() <= width {
            return Ok(shortest);
        }
        let value = *self;
        let read_back_error = |text: &String| {
            text.parse::<f64>()
                .map_or(f64::INFINITY, |parsed| (parsed - value).abs())
        };
        // Ties keep the fixed-point form.
        [fixed_point(value, width), scientific(value, width)]
            .into_iter()
            .flatten()
            .min_by(|a, b| read_back_error(a).total_cmp(&read_back_error(b)))
            .ok_or_else(|| TableError::field_overflow(self, width))
    }
}

/// The most precise fixed-point form of `value` that fits in `width`.
fn fixed_point(value: f64, width: usize) -> Option<String> {
    let integer_digits = format!("{:.0}", value.trunc()).len();
    if integer_digits < width {
        for decimals in (1..width - integer_digits).rev() {
            let text = format!("{:.decimals$}", value);
            if text.len() <= width {
                return Some(trim_fraction(&text).to_string());
            }
        }
    }
    let rounded = format!("{:.0}", value);
    (rounded.len() <= width).then_some(rounded)
}

/// The most precise scientific form of `value` that fits in `width`.
fn scientific(value: f64, width: usize) -> Option<String> {
    (0..width).rev().find_map(|precision| {
        let text = format!("{:.precision$e}", value);
        (text.len() <= width).then_some(text)
    })
}

/// Drop trailing zeros (and a bare trailing point) from a fixed-point number.
fn trim_fraction(text: &str) -> &str {
    text.trim_end_matches('0').trim_end_matches('.')
}

/// Render values into fixed-width lines without touching any document.
pub fn format_lines<T: FieldValue>(values: &[T], options: &CodecOptions) -> Result<Vec<String>> {
    options.validate()?;
    let width = options.field_width;
    let mut lines = Vec::with_capacity(options.lines_for(values.len()));
    for chunk in values.chunks(options.values_per_line) {
        let mut line = String::with_capacity(width * chunk.len());
        for value in chunk {
            let text = value.render(width)?;
            line.push_str(&format!("{text:>width$}"));
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Replace the table body starting at `start` with `values`.
///
/// Lines `start..start + ceil(len / values_per_line)` are replaced; every
/// other line is left as is. All values are rendered before the document is
/// modified, so an overflowing value leaves it unchanged. Returns the range
/// of lines written.
pub fn encode_table<T: FieldValue>(
    document: &mut LineDocument,
    start: usize,
    values: &[T],
    options: &CodecOptions,
) -> Result<Range<usize>> {
    let lines = format_lines(values, options)?;
    let end = start + lines.len();
    debug!(start, line_count = lines.len(), value_count = values.len(), "encoding table");
    document.splice(start..end, &lines);
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: f64) -> String {
        value.render(8).unwrap()
    }

    #[test]
    fn test_render_integers() {
        assert_eq!(42i64.render(8).unwrap(), "42");
        assert_eq!((-1_234_567i64).render(8).unwrap(), "-1234567");
        assert!(matches!(
            123_456_789i64.render(8),
            Err(TableError::FieldOverflow { width: 8, .. })
        ));
    }

    #[test]
    fn test_render_floats() {
        assert_eq!(render(1000.0), "1000");
        assert_eq!(render(12.5), "12.5");
        assert_eq!(render(-0.25), "-0.25");
        assert_eq!(render(1234.56789), "1234.568");
        assert_eq!(render(0.1 + 0.2), "0.3");
        assert_eq!(render(99_999.123_456), "99999.12");
        assert_eq!(render(123_456_789.0), "1.2346e8");
    }

    #[test]
    fn test_render_small_values_keep_significant_digits() {
        assert_eq!(render(1.23e-7), "1.23e-7");
        assert_eq!(render(-1.23e-7), "-1.23e-7");
        assert_eq!(render(0.000_123_456_7), "1.235e-4");
    }

    #[test]
    fn test_small_value_survives_round_trip() {
        let mut doc = LineDocument::parse("Gate Openings= 2\n 1.23e-7    0.75\n");
        let options = CodecOptions::default();
        let decoded = crate::reader::decode_table(&doc, 1, 2, &options);
        assert_eq!(decoded.values, vec![1.23e-7, 0.75]);

        encode_table(&mut doc, 1, &decoded.values, &options).unwrap();
        assert_eq!(doc.line(1), Some(" 1.23e-7    0.75"));
        let again = crate::reader::decode_table(&doc, 1, 2, &options);
        assert_eq!(again.values, decoded.values);
    }

    #[test]
    fn test_render_rejects_non_finite() {
        assert!(f64::NAN.render(8).is_err());
        assert!(f64::INFINITY.render(8).is_err());
    }

    #[test]
    fn test_format_lines() {
        let values: Vec<i64> = (1..=12).collect();
        let lines = format_lines(&values, &CodecOptions::default()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "       1       2       3       4       5       6       7       8       9      10");
        assert_eq!(lines[1], "      11      12");
    }

    #[test]
    fn test_encode_replaces_only_table_lines() {
        let mut doc = LineDocument::parse("Flow Hydrograph= 3\n       1       2       3\nDSS Path=\n");
        let range = encode_table(&mut doc, 1, &[10i64, 20, 30], &CodecOptions::default()).unwrap();
        assert_eq!(range, 1..2);
        assert_eq!(
            doc.to_text(),
            "Flow Hydrograph= 3\n      10      20      30\nDSS Path=\n"
        );
    }

    #[test]
    fn test_overflow_leaves_document_unchanged() {
        let text = "Flow Hydrograph= 2\n       1       2\n";
        let mut doc = LineDocument::parse(text);
        let err = encode_table(&mut doc, 1, &[1i64, 999_999_999], &CodecOptions::default()).unwrap_err();
        assert!(matches!(err, TableError::FieldOverflow { .. }));
        assert_eq!(doc.to_text(), text);
    }

    #[test]
    fn test_encode_keeps_crlf_and_open_end() {
        let mut doc = LineDocument::parse("Flow Hydrograph= 2\r\n       1       2");
        encode_table(&mut doc, 1, &[3i64, 4], &CodecOptions::default()).unwrap();
        assert_eq!(doc.to_text(), "Flow Hydrograph= 2\r\n       3       4");
    }
}

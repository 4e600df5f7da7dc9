//! Value transforms applied between decoding and re-encoding.

use crate::error::{Result, TableError};
use crate::types::ScaledTable;

/// Multiply every value by `factor` and round to the nearest integer.
///
/// Ties round to the nearest even integer.
pub fn scale_table(values: &[f64], factor: f64) -> Result<ScaledTable> {
    if !factor.is_finite() {
        return Err(TableError::InvalidScaleFactor { factor });
    }
    let scaled = values
        .iter()
        .map(|value| (value * factor).round_ties_even() as i64)
        .collect();
    Ok(ScaledTable {
        original: values.to_vec(),
        scaled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds_half_to_even() {
        let table = scale_table(&[1.0, 2.5, 3.5, -2.5, 10.2], 1.0).unwrap();
        assert_eq!(table.scaled, vec![1, 2, 4, -2, 10]);
        assert_eq!(table.original, vec![1.0, 2.5, 3.5, -2.5, 10.2]);
    }

    #[test]
    fn test_scale_by_factor() {
        let table = scale_table(&[100.0, 250.0, 1333.0], 1.5).unwrap();
        assert_eq!(table.scaled, vec![150, 375, 2000]);
    }

    #[test]
    fn test_scale_empty() {
        let table = scale_table(&[], 2.0).unwrap();
        assert!(table.scaled.is_empty());
    }

    #[test]
    fn test_non_finite_factor() {
        for factor in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                scale_table(&[1.0], factor),
                Err(TableError::InvalidScaleFactor { .. })
            ));
        }
    }
}

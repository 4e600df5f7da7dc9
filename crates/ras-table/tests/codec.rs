//! Codec behavior on realistic unsteady flow files.

use std::fs;

use proptest::prelude::*;
use ras_model::LineDocument;
use ras_table::{
    CodecOptions, TableKind, TableSelector, decode_table, encode_table, extract_tables,
    locate_tables, scale_table, scale_tables,
};

const UNSTEADY: &str = "\
Flow Title=Big Event
Program Version=6.30
Use Restart= 0
Boundary Location=White           ,Muncie          ,15696.24,        ,                ,                ,                ,
Interval=1HOUR
Flow Hydrograph= 23
    1000    1250  1512.5    2000    2600    3400    4400    5600    7000    8600
   10000   11200   12000   12400   12200   11600   10600    9400    8000    6600
    5200    4000    3000
Stage Hydrograph TW Check=0
Flow Hydrograph Slope= 0.0005
DSS Path=
Use DSS=False
Boundary Location=White           ,Muncie          ,237.6   ,        ,                ,                ,                ,
Interval=1HOUR
Stage Hydrograph= 4
   930.5     931  931.75     932
DSS Path=
";

fn options() -> CodecOptions {
    CodecOptions::default()
}

#[test]
fn test_table_round_trip_is_byte_identical() {
    let document = LineDocument::parse(UNSTEADY);
    let extents = locate_tables(&document, &options()).unwrap();
    let flow = extents[0];
    assert_eq!(flow.kind, TableKind::FlowHydrograph);
    assert_eq!(flow.declared_count, 23);
    assert_eq!(flow.line_count(), 3);

    let decoded = decode_table(&document, flow.start, flow.end, &options());
    assert_eq!(decoded.values.len(), 23);
    assert!(decoded.dropped.is_empty());

    let mut rewritten = document.clone();
    let range = encode_table(&mut rewritten, flow.start, &decoded.values, &options()).unwrap();
    assert_eq!(range, flow.lines());
    assert_eq!(rewritten.to_text(), UNSTEADY);
}

#[test]
fn test_stage_table_round_trip_keeps_decimals() {
    let document = LineDocument::parse(UNSTEADY);
    let stage = locate_tables(&document, &options()).unwrap()[1];
    assert_eq!(stage.kind, TableKind::StageHydrograph);

    let decoded = decode_table(&document, stage.start, stage.end, &options());
    assert_eq!(decoded.values, vec![930.5, 931.0, 931.75, 932.0]);

    let mut rewritten = document.clone();
    encode_table(&mut rewritten, stage.start, &decoded.values, &options()).unwrap();
    assert_eq!(rewritten.to_text(), UNSTEADY);
}

#[test]
fn test_slope_and_check_lines_are_not_tables() {
    let document = LineDocument::parse(UNSTEADY);
    let extents = locate_tables(&document, &options()).unwrap();
    assert_eq!(extents.len(), 2);
}

#[test]
fn test_scale_by_one_reproduces_rounded_values() {
    let values = [1000.0, 1512.5, 1513.5, 0.4, 7.6];
    let table = scale_table(&values, 1.0).unwrap();
    assert_eq!(table.scaled, vec![1000, 1512, 1514, 0, 8]);
}

#[test]
fn test_scaling_a_file_rewrites_only_the_flow_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Muncie.u01");
    fs::write(&path, UNSTEADY).unwrap();

    let reports = scale_tables(&path, TableKind::FlowHydrograph, 2.0, TableSelector::All).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].table.scaled[2], 3025);

    let text = fs::read_to_string(&path).unwrap();
    let before: Vec<&str> = UNSTEADY.lines().collect();
    let after: Vec<&str> = text.lines().collect();
    assert_eq!(before.len(), after.len());
    for (index, (old, new)) in before.iter().zip(&after).enumerate() {
        if (6..9).contains(&index) {
            assert_ne!(old, new);
        } else {
            assert_eq!(old, new, "line {index} changed");
        }
    }
    assert_eq!(
        after[6],
        "    2000    2500    3025    4000    5200    6800    8800   11200   14000   17200"
    );

    let tables = extract_tables(&path).unwrap();
    assert_eq!(tables[0].values.len(), 23);
    assert_eq!(tables[0].values[22], 6000.0);
}

#[test]
fn test_dropped_field_shifts_later_values_left() {
    let text = "Flow Hydrograph= 12\n       1     bad       3       4       5       6       7       8       9      10\n      11      12\nDSS Path=\n";
    let mut document = LineDocument::parse(text);
    let flow = locate_tables(&document, &options()).unwrap()[0];
    let decoded = decode_table(&document, flow.start, flow.end, &options());
    assert_eq!(decoded.values.len(), 11);
    assert_eq!(decoded.dropped.len(), 1);

    encode_table(&mut document, flow.start, &decoded.values, &options()).unwrap();
    assert_eq!(document.line(1), Some("       1       3       4       5       6       7       8       9      10      11"));
    assert_eq!(document.line(2), Some("      12"));
    assert_eq!(document.line(3), Some("DSS Path="));
}

proptest! {
    #[test]
    fn test_double_then_halve_stays_within_one_unit(
        values in proptest::collection::vec(-50_000.0f64..50_000.0, 0..40)
    ) {
        let doubled = scale_table(&values, 2.0).unwrap();
        let doubled: Vec<f64> = doubled.scaled.iter().map(|&v| v as f64).collect();
        let halved = scale_table(&doubled, 0.5).unwrap();
        let rounded = scale_table(&values, 1.0).unwrap();
        for (&back, &expected) in halved.scaled.iter().zip(&rounded.scaled) {
            prop_assert!((back - expected).abs() <= 1);
        }
    }

    #[test]
    fn test_integer_tables_round_trip(values in proptest::collection::vec(-9_999_999i64..99_999_999, 0..35)) {
        let mut document = LineDocument::parse("Flow Hydrograph= 0\n");
        encode_table(&mut document, 1, &values, &options()).unwrap();
        let decoded = decode_table(&document, 1, document.len(), &options());
        let back: Vec<i64> = decoded.values.iter().map(|&v| v as i64).collect();
        prop_assert_eq!(back, values);
    }
}

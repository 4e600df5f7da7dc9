//! Table kinds, extents and decoded tables.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A time-series table declared in an unsteady flow file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKind {
    FlowHydrograph,
    StageHydrograph,
    GateOpenings,
    UniformLateralInflow,
    LateralInflowHydrograph,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::FlowHydrograph,
        TableKind::StageHydrograph,
        TableKind::GateOpenings,
        TableKind::UniformLateralInflow,
        TableKind::LateralInflowHydrograph,
    ];

    /// Declaring key, including `=`.
    pub fn key(self) -> &'static str {
        match self {
            TableKind::FlowHydrograph => "Flow Hydrograph=",
            TableKind::StageHydrograph => "Stage Hydrograph=",
            TableKind::GateOpenings => "Gate Openings=",
            TableKind::UniformLateralInflow => "Uniform Lateral Inflow=",
            TableKind::LateralInflowHydrograph => "Lateral Inflow Hydrograph=",
        }
    }

    /// Human-readable name (the key without `=`).
    pub fn name(self) -> &'static str {
        let key = self.key();
        &key[..key.len() - 1]
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_end_matches('=')
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "flow" | "flowhydrograph" => Ok(TableKind::FlowHydrograph),
            "stage" | "stagehydrograph" => Ok(TableKind::StageHydrograph),
            "gate" | "gateopenings" => Ok(TableKind::GateOpenings),
            "uniformlateral" | "uniformlateralinflow" => Ok(TableKind::UniformLateralInflow),
            "lateral" | "lateralinflow" | "lateralinflowhydrograph" => {
                Ok(TableKind::LateralInflowHydrograph)
            }
            _ => Err(format!("unknown table kind '{s}'")),
        }
    }
}

/// Position of a table in its document.
///
/// Line indices are 0-based and `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableExtent {
    pub kind: TableKind,
    pub declaration_line: usize,
    pub declared_count: usize,
    pub start: usize,
    pub end: usize,
}

impl TableExtent {
    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start
    }
}

/// A field that could not be decoded as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedField {
    /// 0-based line index in the document.
    pub line: usize,
    /// 0-based field position within the line.
    pub field: usize,
    /// Raw field text.
    pub text: String,
}

/// Values decoded from a run of fixed-width lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedValues {
    pub values: Vec<f64>,
    /// Fields skipped because they were not numbers. Blank fields are not listed.
    pub dropped: Vec<DroppedField>,
}

/// A located and decoded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrographTable {
    pub extent: TableExtent,
    pub values: Vec<f64>,
    pub dropped: Vec<DroppedField>,
}

impl HydrographTable {
    pub fn kind(&self) -> TableKind {
        self.extent.kind
    }

    /// True when fewer values decoded than the declaration announced.
    pub fn is_short(&self) -> bool {
        self.values.len() < self.extent.declared_count
    }
}

/// A table's values before and after scaling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaledTable {
    pub original: Vec<f64>,
    pub scaled: Vec<i64>,
}

/// Outcome of scaling one table in a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledTableReport {
    pub extent: TableExtent,
    pub factor: f64,
    pub table: ScaledTable,
    pub dropped: Vec<DroppedField>,
}

/// Which tables of a kind an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableSelector {
    #[default]
    All,
    /// 0-based ordinal among tables of the kind.
    Index(usize),
}

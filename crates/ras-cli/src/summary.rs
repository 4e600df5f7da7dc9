use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ras_project::ReferenceLine;
use ras_table::{HydrographTable, ScaledTableReport};

/// One project reference with its file status.
pub struct EntryRow {
    pub reference: ReferenceLine,
    pub file_exists: bool,
}

pub fn print_entries(project_name: &str, rows: &[EntryRow]) {
    println!("Project: {project_name}");
    if rows.is_empty() {
        println!("No entries.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Entry"),
        header_cell("Line"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        let entry = match row.reference.slot() {
            Some(slot) => Cell::new(slot),
            None => Cell::new(format!("{} (malformed)", row.reference.value)).fg(Color::Yellow),
        };
        let file = if row.reference.id.is_none() {
            dim_cell("-")
        } else if row.file_exists {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(row.reference.kind),
            entry,
            Cell::new(row.reference.line_index + 1),
            file,
        ]);
    }
    println!("{table}");
}

pub fn print_tables(tables: &[HydrographTable]) {
    if tables.is_empty() {
        println!("No hydrograph tables.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Line"),
        header_cell("Declared"),
        header_cell("Decoded"),
        header_cell("Dropped"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for hydrograph in tables {
        let decoded = if hydrograph.is_short() {
            Cell::new(hydrograph.values.len()).fg(Color::Yellow)
        } else {
            Cell::new(hydrograph.values.len())
        };
        let (min, max) = match value_range(&hydrograph.values) {
            Some((min, max)) => (Cell::new(min), Cell::new(max)),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(hydrograph.kind()),
            Cell::new(hydrograph.extent.declaration_line + 1),
            Cell::new(hydrograph.extent.declared_count),
            decoded,
            count_cell(hydrograph.dropped.len()),
            min,
            max,
        ]);
    }
    println!("{table}");
}

pub fn print_scale_reports(reports: &[ScaledTableReport], written: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Line"),
        header_cell("Values"),
        header_cell("Dropped"),
        header_cell("Original total"),
        header_cell("Scaled total"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in reports {
        let original: f64 = report.table.original.iter().sum();
        let scaled: i64 = report.table.scaled.iter().sum();
        table.add_row(vec![
            Cell::new(report.extent.kind),
            Cell::new(report.extent.declaration_line + 1),
            Cell::new(report.table.scaled.len()),
            count_cell(report.dropped.len()),
            Cell::new(original),
            Cell::new(scaled),
        ]);
    }
    println!("{table}");
    if !written {
        println!("Dry run: file not modified.");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Terminal tables for command results.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
};
use cps_csv::{Columns, ExportSummary, ImportRule};
use cps_model::{CropRecord, Record, RecordType};

use crate::types::{ColumnInfo, Highlights, ImportReport};

pub fn print_import_report(report: &ImportReport) {
    println!(
        "{} {}: {} records",
        report.record_type,
        report.path.display(),
        report.records
    );
    println!("{}", import_table(report));
    for line in highlight_lines(&report.highlights) {
        println!("{line}");
    }
}

pub fn print_export_summary(summary: &ExportSummary) {
    println!(
        "Wrote {} records ({} columns) to {}",
        summary.records,
        summary.columns,
        summary.path.display()
    );
}

pub fn print_crop(crop: &CropRecord) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Value")]);
    apply_table_style(&mut table);
    for datum in crop.datums().into_iter().filter(|datum| datum.concrete) {
        table.add_row(vec![
            Cell::new(datum.field.column_name()).fg(Color::Blue),
            Cell::new(&datum.value),
        ]);
    }
    println!("{table}");
}

pub fn print_columns(record_type: RecordType, columns: &[ColumnInfo]) {
    println!("{record_type} columns:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Import"),
    ]);
    apply_table_style(&mut table);
    for info in columns {
        table.add_row(vec![
            Cell::new(info.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(info.label),
            Cell::new(info.kind),
            rule_cell(info.rule),
        ]);
    }
    println!("{table}");
}

pub fn import_table(report: &ImportReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Set"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for count in &report.columns {
        table.add_row(vec![
            Cell::new(count.column),
            Cell::new(count.label),
            Cell::new(count.kind),
            count_cell(count.concrete),
        ]);
    }
    table
}

pub fn highlight_lines(highlights: &Highlights) -> Vec<String> {
    match highlights {
        Highlights::Crops {
            base_crops,
            varieties,
        } => vec![format!("Base crops: {base_crops}, varieties: {varieties}")],
        Highlights::Plantings {
            ignored,
            first_planting,
            last_harvest,
        } => vec![
            format!("Ignored plantings: {ignored}"),
            format!("First planting: {}", date_or_dash(*first_planting)),
            format!("Last harvest: {}", date_or_dash(*last_harvest)),
        ],
    }
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn rule_cell(rule: ImportRule) -> Cell {
    match rule {
        ImportRule::Raw => dim_cell("-"),
        ImportRule::Date => Cell::new("date").fg(Color::Green),
        ImportRule::MaturityDays => Cell::new("maturity").fg(Color::Yellow),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

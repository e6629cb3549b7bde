//! Terminal rendering of reports, classifications and reference ranges.

use anyhow::{Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::{Map, Value};

use eco_core::REPORT_KEYS;
use eco_model::{ClassificationResult, MatchKind, ReferenceTable, ReportRecord, Severity};
use eco_standards::doctor::sex_label;
use eco_standards::{DoctorReport, IssueSeverity};

const DIAGNOSTIC_PREFIX: &str = "diag_";

/// Report record as a JSON object in report key order.
pub fn report_json(record: &ReportRecord) -> Result<String> {
    let object: Map<String, Value> = REPORT_KEYS
        .iter()
        .map(|key| {
            let value = record.get(key).unwrap_or_default();
            ((*key).to_string(), Value::from(value))
        })
        .collect();
    Ok(serde_json::to_string_pretty(&Value::Object(object))?)
}

pub fn report_table(record: &ReportRecord, absent_text: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for key in REPORT_KEYS {
        let value = record.get(key).unwrap_or_default();
        let key_cell = if key.starts_with(DIAGNOSTIC_PREFIX) {
            Cell::new(key).fg(Color::Blue).add_attribute(Attribute::Bold)
        } else {
            Cell::new(key)
        };
        let value_cell = if value == absent_text {
            dim_cell(value)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![key_cell, value_cell]);
    }
    table
}

pub fn classification_table(result: &ClassificationResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Classification"),
        header_cell("Severity"),
        header_cell("Match"),
        header_cell("Text"),
    ]);
    apply_table_style(&mut table);
    let severity = result.severity();
    table.add_row(vec![
        Cell::new(&result.classification).fg(severity_color(severity)),
        Cell::new(severity.as_str()).fg(severity_color(severity)),
        match_cell(result.match_kind),
        Cell::new(&result.narrative),
    ]);
    table
}

/// Every band of the table, optionally limited to one category.
pub fn ranges_table(table: &ReferenceTable, category: Option<&str>) -> Result<Table> {
    let categories: Vec<_> = match category {
        Some(name) => match table.category(name) {
            Some(category) => vec![category],
            None => bail!("unknown category '{name}'"),
        },
        None => table.categories.values().collect(),
    };

    let mut out = Table::new();
    out.set_header(vec![
        header_cell("Category"),
        header_cell("Parameter"),
        header_cell("Sex"),
        header_cell("Classification"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Text"),
    ]);
    apply_table_style(&mut out);
    align_column(&mut out, 4, CellAlignment::Right);
    align_column(&mut out, 5, CellAlignment::Right);
    for category in categories {
        for parameter in category.parameters.values() {
            for (sex, entries) in parameter.group.variants() {
                for entry in entries {
                    out.add_row(vec![
                        Cell::new(&category.name),
                        Cell::new(&parameter.name),
                        dim_cell(sex_label(sex)),
                        Cell::new(&entry.classification)
                            .fg(severity_color(Severity::from_label(&entry.classification))),
                        Cell::new(entry.min),
                        Cell::new(entry.max),
                        Cell::new(&entry.narrative),
                    ]);
                }
            }
        }
    }
    Ok(out)
}

pub fn doctor_table(report: &DoctorReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Location"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for issue in &report.issues {
        let cell = match issue.severity {
            IssueSeverity::Error => Cell::new("error").fg(Color::Red),
            IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
        };
        table.add_row(vec![cell, Cell::new(&issue.location), Cell::new(&issue.message)]);
    }
    table
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Matched => Cell::new(kind.as_str()).fg(Color::Green),
        MatchKind::OutOfRange => Cell::new(kind.as_str()).fg(Color::Yellow),
        MatchKind::UnknownParameter | MatchKind::SexRequired => {
            Cell::new(kind.as_str()).fg(Color::Red)
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Normal => Color::Green,
        Severity::Mild => Color::Yellow,
        Severity::Moderate => Color::DarkYellow,
        Severity::Severe => Color::Red,
        Severity::Indeterminate => Color::DarkGrey,
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

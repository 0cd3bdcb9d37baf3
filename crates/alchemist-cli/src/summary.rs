use std::cmp::Ordering;

use alchemist_core::SearchResult;
use alchemist_map::MappingState;
use alchemist_model::{Anomaly, AnomalySeverity, Finding, MappingOrigin, RowSet, Severity};
use alchemist_validate::CheckStatus;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::{CheckSummary, ValidateResult};

pub fn print_summary(result: &ValidateResult) {
    println!("{}", summary_table(&result.check_summaries()));
    if let Some(table) = issue_table(&result.report.findings) {
        println!();
        println!("Issues:");
        println!("{table}");
    }
    for path in &result.written {
        println!("Wrote {}", path.display());
    }
}

/// Per-check status with a TOTAL row.
pub fn summary_table(summaries: &[CheckSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    for summary in summaries {
        total_errors += summary.errors;
        total_warnings += summary.warnings;
        table.add_row(vec![
            scope_cell(&summary.scope),
            Cell::new(&summary.check),
            status_cell(summary.status),
            count_cell(Some(summary.errors), Color::Red),
            count_cell(Some(summary.warnings), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All checks")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Findings ordered by severity, then entity, then row; `None` when there are none.
pub fn issue_table(findings: &[Finding]) -> Option<Table> {
    if findings.is_empty() {
        return None;
    }
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| {
        let severity = a.severity.cmp(&b.severity);
        if severity != Ordering::Equal {
            return severity;
        }
        let entity = a.entity.cmp(&b.entity);
        if entity != Ordering::Equal {
            return entity;
        }
        a.row.cmp(&b.row)
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Check"),
        header_cell("Message"),
        header_cell("Suggestion"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for finding in ordered {
        table.add_row(vec![
            scope_cell(finding.entity.label()),
            severity_cell(finding.severity),
            match finding.row {
                Some(row) => Cell::new(row),
                None => dim_cell("-"),
            },
            Cell::new(&finding.field),
            Cell::new(&finding.check),
            Cell::new(&finding.message),
            optional_cell(finding.suggestion.as_deref()),
        ]);
    }
    Some(table)
}

/// Canonical fields with their source column and match confidence.
pub fn mapping_table(state: &MappingState) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Source column"),
        header_cell("Confidence"),
        header_cell("Origin"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);

    let kind = state.kind();
    for field in kind.canonical_fields() {
        let required = kind.required_fields().contains(field);
        let required_cell = if required {
            Cell::new("yes").fg(Color::Blue)
        } else {
            dim_cell("no")
        };
        match state.mapping().get(field) {
            Some(column) => table.add_row(vec![
                Cell::new(field),
                required_cell,
                Cell::new(&column.raw),
                confidence_cell(column.confidence),
                match column.origin {
                    MappingOrigin::Auto => dim_cell("auto"),
                    MappingOrigin::Manual => Cell::new("manual").fg(Color::Magenta),
                },
            ]),
            None => table.add_row(vec![
                Cell::new(field),
                required_cell,
                if required {
                    Cell::new("unmapped")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold)
                } else {
                    dim_cell("unmapped")
                },
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    table
}

pub fn print_mapping(state: &MappingState) {
    println!("{}", mapping_table(state));
    let unused = state.unused_columns();
    if !unused.is_empty() {
        println!("Unused columns: {}", unused.join(", "));
    }
    for (raw, fields) in state.mapping().shared_columns() {
        println!("Column '{raw}' feeds {}", fields.join(", "));
    }
}

/// Anomalies in report order.
pub fn anomaly_table(anomalies: &[Anomaly]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Description"),
        header_cell("Current"),
        header_cell("Suggested"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for anomaly in anomalies {
        table.add_row(vec![
            Cell::new(&anomaly.id),
            anomaly_severity_cell(anomaly.severity),
            Cell::new(anomaly.row),
            Cell::new(&anomaly.field),
            Cell::new(&anomaly.description),
            value_cell(&anomaly.original_value.render()),
            value_cell(&anomaly.suggested_value.render()),
            confidence_cell(anomaly.confidence),
        ]);
    }
    table
}

/// Matching rows by global index, with their id and name fields.
pub fn search_table(rows: &RowSet, result: &SearchResult) -> Table {
    let kind = rows.kind;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Index"),
        header_cell("Row id"),
        header_cell(kind.id_field()),
        header_cell(kind.name_field()),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for hit in &result.hits {
        let row = rows.get(hit.index);
        table.add_row(vec![
            Cell::new(hit.index),
            dim_cell(hit.id.short()),
            optional_cell(row.and_then(|r| r.value(kind.id_field())).as_deref()),
            optional_cell(row.and_then(|r| r.value(kind.name_field())).as_deref()),
        ]);
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

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
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

fn scope_cell(scope: &str) -> Cell {
    Cell::new(scope)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: CheckStatus) -> Cell {
    let color = match status {
        CheckStatus::Passed => Color::Green,
        CheckStatus::Warning => Color::Yellow,
        CheckStatus::Failed => Color::Red,
    };
    Cell::new(status.label()).fg(color)
}

fn severity_cell(severity: Severity) -> Cell {
    Cell::new(severity.label())
        .fg(severity_color(severity))
        .add_attribute(Attribute::Bold)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn anomaly_severity_cell(severity: AnomalySeverity) -> Cell {
    Cell::new(severity.label())
        .fg(severity_color(severity.finding_severity()))
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn confidence_cell(confidence: f32) -> Cell {
    let text = format!("{:.0}%", confidence * 100.0);
    if confidence >= 0.8 {
        Cell::new(text).fg(Color::Green)
    } else if confidence >= 0.5 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(value)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

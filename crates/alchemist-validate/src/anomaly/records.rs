//! Detectors concerned with record identity.

use alchemist_model::{Anomaly, AnomalyCategory, AnomalySeverity, CellValue, RowSet};

use crate::util::has_id_format;

const ID_FIELDS: &[&str] = &["ClientID", "WorkerID", "TaskID"];

const NAMED_FIELDS: &[(&str, &str)] = &[
    ("ClientID", "Client ID is required"),
    ("ClientName", "Client Name is required"),
    ("WorkerID", "Worker ID is required"),
    ("WorkerName", "Worker Name is required"),
    ("TaskID", "Task ID is required"),
    ("TaskName", "Task Name is required"),
];

fn prefix_of(field: &str) -> char {
    field.chars().next().unwrap_or('X')
}

/// Repeated IDs, grouped by value in order of first appearance.
pub(super) fn duplicates(rows: &RowSet, out: &mut Vec<Anomaly>) {
    let Some(first) = rows.first() else {
        return;
    };
    for field in ID_FIELDS.iter().filter(|f| first.has(f)) {
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (index, row) in rows.iter() {
            let Some(value) = row.value(field) else {
                continue;
            };
            match groups.iter_mut().find(|(v, _)| *v == value) {
                Some((_, indices)) => indices.push(index),
                None => groups.push((value, vec![index])),
            }
        }

        for (value, indices) in groups.iter().filter(|(_, i)| i.len() > 1) {
            let first_row = indices[0];
            for &index in &indices[1..] {
                out.push(Anomaly {
                    id: format!("duplicate-{field}-{index}"),
                    entity: rows.kind,
                    category: AnomalyCategory::Duplicate,
                    severity: AnomalySeverity::High,
                    row: index,
                    field: (*field).to_string(),
                    description: format!(
                        "Duplicate {field} \"{value}\" found (also appears in row {})",
                        first_row + 1
                    ),
                    suggestion: format!("Generate unique {field} or merge duplicate records"),
                    confidence: 1.0,
                    original_value: CellValue::text(value.clone()),
                    // Not checked for uniqueness against other rows.
                    suggested_value: CellValue::text(format!("{value}_{}", index + 1)),
                });
            }
        }
    }
}

/// IDs that do not read `<prefix><digits>`.
pub(super) fn id_format(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        for field in ID_FIELDS {
            let Some(value) = row.value(field) else {
                continue;
            };
            let prefix = prefix_of(field);
            if has_id_format(&value, prefix) {
                continue;
            }
            out.push(Anomaly {
                id: format!("id-format-{field}-{index}"),
                entity: rows.kind,
                category: AnomalyCategory::Inconsistency,
                severity: AnomalySeverity::Medium,
                row: index,
                field: (*field).to_string(),
                description: format!(
                    "{field} \"{value}\" doesn't follow expected format ({prefix}1, {prefix}17, etc.)"
                ),
                suggestion: format!("Use standard ID format: {prefix}[number]"),
                confidence: 0.8,
                original_value: CellValue::text(value),
                suggested_value: CellValue::text(format!("{prefix}{}", index + 1)),
            });
        }
    }
}

/// Identity fields present as a column but left blank.
pub(super) fn missing_required(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        for &(field, message) in NAMED_FIELDS {
            let Some(cell) = row.get(field) else {
                continue;
            };
            if !cell.is_blank() {
                continue;
            }
            let placeholder = if field.contains("ID") {
                format!("{}{}", prefix_of(field), index + 1)
            } else {
                let stem = field.replacen("ID", "", 1).replacen("Name", "", 1);
                format!("{stem} {}", index + 1)
            };
            out.push(Anomaly {
                id: format!("missing-{field}-{index}"),
                entity: rows.kind,
                category: AnomalyCategory::Inconsistency,
                severity: AnomalySeverity::High,
                row: index,
                field: field.to_string(),
                description: message.to_string(),
                suggestion: format!("Provide a valid {field}"),
                confidence: 1.0,
                original_value: cell.clone(),
                suggested_value: CellValue::text(placeholder),
            });
        }
    }
}

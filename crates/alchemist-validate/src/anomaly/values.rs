//! Detectors concerned with individual cell values.

use alchemist_model::{Anomaly, AnomalyCategory, AnomalySeverity, CellValue, RowSet};
use serde_json::Value;

use crate::util::{BARE_INT_LIST, SLOT_ARRAY, list_tokens, looks_like_json, split_list};

const NUMERIC_FIELDS: &[&str] = &["PriorityLevel", "MaxLoadPerPhase", "Duration", "MaxConcurrent"];

/// Skill lists longer than this are flagged.
const SKILL_LIMIT: usize = 6;
/// Skills kept by the suggested fix.
const CORE_SKILLS: usize = 4;

/// Values more than two population standard deviations from the mean.
pub(super) fn outliers(rows: &RowSet, out: &mut Vec<Anomaly>) {
    let Some(first) = rows.first() else {
        return;
    };
    for field in NUMERIC_FIELDS.iter().filter(|f| first.has(f)) {
        let values: Vec<f64> = rows.rows.iter().filter_map(|r| r.number(field)).collect();
        if values.is_empty() {
            continue;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        // Halves round up.
        let suggested = (mean + 0.5).floor();

        for (index, row) in rows.iter() {
            let Some(value) = row.number(field) else {
                continue;
            };
            let deviation = (value - mean).abs();
            if deviation <= 2.0 * std_dev {
                continue;
            }
            let severity = if deviation > 3.0 * std_dev {
                AnomalySeverity::High
            } else {
                AnomalySeverity::Medium
            };
            out.push(Anomaly {
                id: format!("outlier-{field}-{index}"),
                entity: rows.kind,
                category: AnomalyCategory::Outlier,
                severity,
                row: index,
                field: (*field).to_string(),
                description: format!(
                    "{field} value {value} is significantly different from the average ({mean:.2})"
                ),
                suggestion: format!("Consider reviewing this value. Suggested: {suggested}"),
                confidence: 0.85,
                original_value: CellValue::Number(value),
                suggested_value: CellValue::Number(suggested),
            });
        }
    }
}

/// AttributesJSON that looks like JSON but does not parse.
pub(super) fn broken_json(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        let Some(value) = row.text("AttributesJSON").map(str::trim) else {
            continue;
        };
        if value.is_empty() || !looks_like_json(value) {
            continue;
        }
        if serde_json::from_str::<Value>(value).is_ok() {
            continue;
        }
        out.push(Anomaly {
            id: format!("json-{index}"),
            entity: rows.kind,
            category: AnomalyCategory::Inconsistency,
            severity: AnomalySeverity::High,
            row: index,
            field: "AttributesJSON".to_string(),
            description: "Invalid JSON format in AttributesJSON".to_string(),
            suggestion: "Fix JSON syntax errors".to_string(),
            confidence: 0.95,
            original_value: CellValue::text(value),
            suggested_value: CellValue::text(repair_json(value)),
        });
    }
}

/// Wrap text with bare quotes as a JSON message; anything else is returned unchanged.
fn repair_json(value: &str) -> String {
    if value.contains('"') && !value.contains("\\\"") {
        format!("{{\"message\":\"{}\"}}", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// AvailableSlots not written as a bracketed list.
pub(super) fn malformed_slots(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        let Some(value) = row.text("AvailableSlots").map(str::trim) else {
            continue;
        };
        if value.is_empty() || SLOT_ARRAY.is_match(value) {
            continue;
        }
        let suggested = if BARE_INT_LIST.is_match(value) {
            format!("[{value}]")
        } else {
            value.to_string()
        };
        out.push(Anomaly {
            id: format!("slots-{index}"),
            entity: rows.kind,
            category: AnomalyCategory::Inconsistency,
            severity: AnomalySeverity::High,
            row: index,
            field: "AvailableSlots".to_string(),
            description: "AvailableSlots should be in array format [1,2,3]".to_string(),
            suggestion: "Convert to proper array format".to_string(),
            confidence: 0.9,
            original_value: CellValue::text(value),
            suggested_value: CellValue::text(suggested),
        });
    }
}

/// Workers listing an unusually large number of skills.
pub(super) fn skill_overload(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        let Some(value) = row.text("Skills").filter(|v| !v.is_empty()) else {
            continue;
        };
        let skills = split_list(value);
        if skills.len() <= SKILL_LIMIT {
            continue;
        }
        out.push(Anomaly {
            id: format!("pattern-skills-{index}"),
            entity: rows.kind,
            category: AnomalyCategory::Pattern,
            severity: AnomalySeverity::Medium,
            row: index,
            field: "Skills".to_string(),
            description: format!(
                "Worker has many skills ({}). Consider focusing on core competencies.",
                skills.len()
            ),
            suggestion: "Focus on primary skills for better matching".to_string(),
            confidence: 0.75,
            original_value: CellValue::text(value),
            suggested_value: CellValue::text(skills[..CORE_SKILLS].join(", ")),
        });
    }
}

/// Clients requesting exactly one task. Informational; the value is kept.
pub(super) fn single_task(rows: &RowSet, out: &mut Vec<Anomaly>) {
    for (index, row) in rows.iter() {
        let Some(value) = row.text("RequestedTaskIDs") else {
            continue;
        };
        if list_tokens(value).len() != 1 {
            continue;
        }
        out.push(Anomaly {
            id: format!("single-task-{index}"),
            entity: rows.kind,
            category: AnomalyCategory::Pattern,
            severity: AnomalySeverity::Low,
            row: index,
            field: "RequestedTaskIDs".to_string(),
            description: "Client has only one requested task. This might be unusual.".to_string(),
            suggestion: "Verify if client needs additional tasks".to_string(),
            confidence: 0.6,
            original_value: CellValue::text(value),
            suggested_value: CellValue::text(value),
        });
    }
}

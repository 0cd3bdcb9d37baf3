//! Worker slot availability.

use alchemist_model::{EntityKind, RowSet};
use serde_json::Value;

use crate::issue::Issue;

/// Warn when AvailableSlots parses as an array with fewer than two entries.
///
/// Unparseable values are left to the list-format check.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    if rows.kind != EntityKind::Worker {
        return Vec::new();
    }
    let mut issues = Vec::new();
    for (index, row) in rows.iter() {
        let Some(value) = row.text("AvailableSlots").filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Ok(Value::Array(slots)) = serde_json::from_str::<Value>(value)
            && slots.len() < 2
        {
            issues.push(Issue::LimitedAvailability {
                row: index,
                slots: slots.len(),
            });
        }
    }
    issues
}

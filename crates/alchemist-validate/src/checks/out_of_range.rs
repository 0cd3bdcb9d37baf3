//! Numeric range checks.

use alchemist_model::RowSet;

use crate::issue::Issue;

/// Expected inclusive range per numeric field.
pub(crate) const RANGES: &[(&str, f64, f64)] = &[
    ("PriorityLevel", 1.0, 5.0),
    ("MaxLoadPerPhase", 1.0, 20.0),
    ("Duration", 1.0, 10.0),
    ("MaxConcurrent", 1.0, 5.0),
];

/// Warn on parseable values outside their range; unparseable values are skipped.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (index, row) in rows.iter() {
        for &(field, min, max) in RANGES {
            let Some(value) = row.number(field) else {
                continue;
            };
            if value < min || value > max {
                issues.push(Issue::OutOfRange {
                    row: index,
                    field: field.to_string(),
                    value,
                    min,
                    max,
                });
            }
        }
    }
    issues
}

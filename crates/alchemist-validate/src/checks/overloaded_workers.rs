//! Worker load per phase.

use alchemist_model::{EntityKind, RowSet};

use crate::issue::Issue;

/// Loads above this many tasks per phase are flagged.
pub(crate) const OVERLOAD_THRESHOLD: f64 = 15.0;

pub fn check(rows: &RowSet) -> Vec<Issue> {
    if rows.kind != EntityKind::Worker {
        return Vec::new();
    }
    rows.iter()
        .filter(|(_, row)| row.number("MaxLoadPerPhase").is_some_and(|v| v > OVERLOAD_THRESHOLD))
        .map(|(index, row)| Issue::Overloaded {
            row: index,
            load: row.value("MaxLoadPerPhase").unwrap_or_default(),
        })
        .collect()
}

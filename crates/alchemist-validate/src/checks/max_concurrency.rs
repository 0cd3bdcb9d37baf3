//! Task concurrency against duration.

use alchemist_model::{EntityKind, RowSet};

use crate::issue::Issue;

/// A task cannot run more copies at once than it has phases.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    if rows.kind != EntityKind::Task {
        return Vec::new();
    }
    rows.iter()
        .filter_map(|(index, row)| {
            let max_concurrent = row.number("MaxConcurrent")?;
            let duration = row.number("Duration")?;
            (max_concurrent > duration).then_some(Issue::ConcurrencyExceedsDuration {
                row: index,
                max_concurrent,
                duration,
            })
        })
        .collect()
}

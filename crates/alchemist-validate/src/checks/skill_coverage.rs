//! Worker skill breadth.

use alchemist_model::{EntityKind, RowSet};

use crate::issue::Issue;
use crate::util::split_list;

/// Workers listing fewer than two skills. Empty entries still count.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    if rows.kind != EntityKind::Worker {
        return Vec::new();
    }
    rows.iter()
        .filter_map(|(index, row)| {
            let skills = row.text("Skills").filter(|v| !v.is_empty())?;
            let count = split_list(skills).len();
            (count < 2).then_some(Issue::LimitedSkills { row: index, count })
        })
        .collect()
}

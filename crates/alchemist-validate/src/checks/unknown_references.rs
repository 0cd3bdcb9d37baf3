//! Format of requested task references.
//!
//! Existence is checked by the cross-entity validator; this only checks shape.

use alchemist_model::{EntityKind, RowSet};

use crate::issue::Issue;
use crate::util::{has_id_format, list_tokens};

pub fn check(rows: &RowSet) -> Vec<Issue> {
    if rows.kind != EntityKind::Client {
        return Vec::new();
    }
    let mut issues = Vec::new();
    for (index, row) in rows.iter() {
        let Some(value) = row.text("RequestedTaskIDs") else {
            continue;
        };
        for task_id in list_tokens(value) {
            if !has_id_format(task_id, 'T') {
                issues.push(Issue::TaskRefFormat {
                    row: index,
                    task_id: task_id.to_string(),
                });
            }
        }
    }
    issues
}

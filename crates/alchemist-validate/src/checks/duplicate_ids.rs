//! Primary key uniqueness.

use std::collections::HashSet;

use alchemist_model::RowSet;

use crate::issue::Issue;

/// Flag every repeat of an ID after its first occurrence. Blank IDs are skipped.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    let field = rows.kind.id_field();
    let mut seen: HashSet<String> = HashSet::new();
    let mut issues = Vec::new();

    for (index, row) in rows.iter() {
        let Some(value) = row.value(field) else {
            continue;
        };
        if !seen.insert(value.clone()) {
            issues.push(Issue::DuplicateId {
                row: index,
                field: field.to_string(),
                value,
            });
        }
    }

    issues
}

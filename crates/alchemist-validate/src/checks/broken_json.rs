//! AttributesJSON syntax.

use alchemist_model::RowSet;
use serde_json::Value;

use crate::issue::Issue;
use crate::util::looks_like_json;

/// Only values that look like JSON are parsed; free text is accepted as-is.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    rows.iter()
        .filter_map(|(index, row)| {
            let value = row.text("AttributesJSON")?.trim();
            if !looks_like_json(value) {
                return None;
            }
            serde_json::from_str::<Value>(value)
                .is_err()
                .then_some(Issue::InvalidJson { row: index })
        })
        .collect()
}

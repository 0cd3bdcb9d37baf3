//! Required column presence.

use alchemist_model::RowSet;

use crate::issue::Issue;

/// Report every required column absent from the first row.
///
/// An empty row set is missing all of them.
pub fn check(rows: &RowSet) -> Vec<Issue> {
    let first = rows.first();
    rows.kind
        .required_fields()
        .iter()
        .filter(|field| first.is_none_or(|row| !row.has(field)))
        .map(|field| Issue::RequiredColumnMissing {
            field: (*field).to_string(),
        })
        .collect()
}

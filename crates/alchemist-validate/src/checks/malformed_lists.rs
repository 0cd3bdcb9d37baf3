//! List and array syntax in text fields.

use alchemist_model::{EntityKind, Row, RowSet};

use crate::issue::Issue;
use crate::util::{BARE_INT_LIST, PHASE_RANGE, SLOT_ARRAY, list_tokens};

pub fn check(rows: &RowSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (index, row) in rows.iter() {
        for field in rows.kind.list_fields() {
            check_comma_list(row, index, field, &mut issues);
        }
        match rows.kind {
            EntityKind::Worker => check_slots(row, index, &mut issues),
            EntityKind::Task => check_phases(row, index, &mut issues),
            EntityKind::Client => {}
        }
    }

    issues
}

fn check_comma_list(row: &Row, index: usize, field: &str, issues: &mut Vec<Issue>) {
    let Some(value) = row.text(field).filter(|v| !v.is_empty()) else {
        return;
    };
    let cleaned = list_tokens(value).join(",");
    if value.contains(",,") {
        issues.push(Issue::ListEmptyEntries {
            row: index,
            field: field.to_string(),
            cleaned: cleaned.clone(),
        });
    }
    if value.starts_with(',') || value.ends_with(',') {
        issues.push(Issue::ListStrayCommas {
            row: index,
            field: field.to_string(),
            cleaned,
        });
    }
}

fn check_slots(row: &Row, index: usize, issues: &mut Vec<Issue>) {
    let Some(value) = row.text("AvailableSlots").filter(|v| !v.is_empty()) else {
        return;
    };
    if SLOT_ARRAY.is_match(value) {
        return;
    }
    let trimmed = value.trim();
    let repaired = BARE_INT_LIST
        .is_match(trimmed)
        .then(|| format!("[{trimmed}]"));
    issues.push(Issue::SlotsNotArray {
        row: index,
        value: value.to_string(),
        repaired,
    });
}

fn check_phases(row: &Row, index: usize, issues: &mut Vec<Issue>) {
    let Some(value) = row.text("PreferredPhases").filter(|v| !v.is_empty()) else {
        return;
    };
    if !PHASE_RANGE.is_match(value) && !SLOT_ARRAY.is_match(value) {
        issues.push(Issue::PhasesMalformed {
            row: index,
            value: value.to_string(),
        });
    }
}

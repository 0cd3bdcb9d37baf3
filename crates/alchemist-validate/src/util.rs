//! Parsing helpers shared by the checks.

use std::sync::LazyLock;

use alchemist_model::{EntityKind, Row};
use regex::Regex;
use serde_json::Value;

/// Bracketed integer list such as `[1, 2, 3]`.
pub(crate) static SLOT_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[0-9,\s]*\]$").expect("valid slot array regex"));

/// Phase range such as `2-4`.
pub(crate) static PHASE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid phase range regex"));

/// Bare comma-separated integers such as `1,2, 3`.
pub(crate) static BARE_INT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(,\s*[0-9]+)*$").expect("valid integer list regex"));

/// Lowest and highest valid phase number.
pub(crate) const PHASE_MIN: f64 = 1.0;
pub(crate) const PHASE_MAX: f64 = 10.0;

/// Split a comma-joined list, trimming each entry and keeping empty ones.
pub fn split_list(value: &str) -> Vec<&str> {
    value.split(',').map(str::trim).collect()
}

/// Non-empty trimmed entries of a comma-joined list.
pub fn list_tokens(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// True when `value` is `<prefix><digits>`.
pub fn has_id_format(value: &str, prefix: char) -> bool {
    value
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Structured-looking text: starts with `{` or `[` once trimmed.
pub fn looks_like_json(value: &str) -> bool {
    let trimmed = value.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Render a JSON array element the way it reads in a list.
pub(crate) fn json_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric phase entries outside `[1, 10]`, or non-numeric entries.
pub(crate) fn invalid_phases(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter(|item| {
            item.as_f64()
                .is_none_or(|n| !(PHASE_MIN..=PHASE_MAX).contains(&n))
        })
        .map(json_item)
        .collect()
}

/// How a row is named in messages: its name, else its id, else its position.
pub fn display_name(row: &Row, kind: EntityKind, index: usize) -> String {
    row.value(kind.name_field())
        .or_else(|| row.value(kind.id_field()))
        .unwrap_or_else(|| format!("row {}", index + 1))
}

pub(crate) fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

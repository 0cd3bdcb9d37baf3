use std::path::Path;

use alchemist_model::{CellValue, EntityKind, Row, RowSet};
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::row_id::derive_row_id;

fn to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
        other => CellValue::Text(other.to_string()),
    }
}

/// Read a JSON file holding an array of objects.
pub fn read_json(kind: EntityKind, path: &Path) -> Result<RowSet> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_json(kind, &text, &path.display().to_string())
}

/// Parse a JSON array of objects. Columns follow first appearance of each key.
pub fn parse_json(kind: EntityKind, text: &str, source_id: &str) -> Result<RowSet> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::JsonParse {
        source_id: source_id.to_string(),
        source,
    })?;
    rows_from_value(kind, &value, source_id)
}

pub(crate) fn rows_from_value(kind: EntityKind, value: &Value, source_id: &str) -> Result<RowSet> {
    let Value::Array(records) = value else {
        return Err(IngestError::JsonShape {
            source_id: source_id.to_string(),
            reason: "expected an array of objects".to_string(),
        });
    };

    let mut rows = RowSet::empty(kind);
    for (idx, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(IngestError::JsonShape {
                source_id: source_id.to_string(),
                reason: format!("record {} is not an object", idx + 1),
            });
        };
        let mut row = Row::new(derive_row_id(source_id, (idx as u64) + 1));
        for (key, value) in fields {
            if !rows.columns.iter().any(|c| c == key) {
                rows.columns.push(key.clone());
            }
            row = row.with(key.as_str(), to_cell(value));
        }
        rows.push_row(row);
    }

    debug!(
        entity = %kind,
        source = source_id,
        row_count = rows.len(),
        "json ingested"
    );
    Ok(rows)
}

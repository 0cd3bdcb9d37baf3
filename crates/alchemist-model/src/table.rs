//! Row collections for a single entity kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EntityKind, ModelError, RowId};

/// A single cell as produced by ingestion.
///
/// CSV input only yields `Text` and `Missing`; structured input may carry numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Missing, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Numeric view of the cell. Text must parse as a finite float once trimmed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Textual rendering used for messages and export. Missing renders empty.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.cells.contains_key(field)
    }

    /// Text content of a field, if the cell holds text.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(CellValue::as_text)
    }

    /// Field rendered as text with surrounding whitespace removed; `None` when blank.
    pub fn value(&self, field: &str) -> Option<String> {
        self.get(field)
            .filter(|cell| !cell.is_blank())
            .map(|cell| cell.render().trim().to_string())
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(CellValue::as_f64)
    }
}

/// Ordered rows of one entity kind.
///
/// `columns` records header order; each row's cells are keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub kind: EntityKind,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(kind: EntityKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn empty(kind: EntityKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate()
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Returns a copy with one cell replaced. The original is left untouched.
    pub fn with_cell(&self, row: usize, field: &str, value: CellValue) -> Result<Self, ModelError> {
        if row >= self.rows.len() {
            return Err(ModelError::RowOutOfRange {
                entity: self.kind,
                row,
                len: self.rows.len(),
            });
        }
        let mut next = self.clone();
        if !next.columns.iter().any(|c| c == field) {
            next.columns.push(field.to_string());
        }
        next.rows[row].cells.insert(field.to_string(), value);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> RowId {
        RowId::from_first_16_bytes_of_sha256([n; 32])
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(3.0).render(), "3");
        assert_eq!(CellValue::Number(2.5).render(), "2.5");
        assert_eq!(CellValue::Missing.render(), "");
    }

    #[test]
    fn numeric_view_is_strict() {
        assert_eq!(CellValue::text(" 7 ").as_f64(), Some(7.0));
        assert_eq!(CellValue::text("7abc").as_f64(), None);
        assert_eq!(CellValue::text("NaN").as_f64(), None);
        assert_eq!(CellValue::Missing.as_f64(), None);
    }

    #[test]
    fn with_cell_copies() {
        let mut set = RowSet::new(EntityKind::Worker, vec!["WorkerID".to_string()]);
        set.push_row(Row::new(id(1)).with("WorkerID", "W1"));
        let next = set.with_cell(0, "WorkerID", CellValue::text("W9")).unwrap();
        assert_eq!(set.rows[0].text("WorkerID"), Some("W1"));
        assert_eq!(next.rows[0].text("WorkerID"), Some("W9"));
        assert_eq!(next.rows[0].id, set.rows[0].id);
        assert!(set.with_cell(3, "WorkerID", CellValue::Missing).is_err());
    }

    #[test]
    fn untagged_cells_serialize_naturally() {
        let row = Row::new(id(2))
            .with("A", 1.5)
            .with("B", "x")
            .with("C", CellValue::Missing);
        let json = serde_json::to_value(&row.cells).unwrap();
        assert_eq!(json, serde_json::json!({"A": 1.5, "B": "x", "C": null}));
    }
}

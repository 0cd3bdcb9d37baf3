//! Validation findings.
//!
//! A finding is immutable once built; every validation run produces a fresh list.

use serde::{Deserialize, Serialize};

use crate::{CellValue, EntityKind};

/// Finding severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before the data is handed to scheduling
    Error,
    /// Should review
    Warning,
    /// Informational note
    Info,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// A single validation outcome attached to a cell, a row, or the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub entity: EntityKind,
    /// Global row index; `None` for dataset-level findings (serialized as -1).
    #[serde(with = "row_index")]
    pub row: Option<usize>,
    pub field: String,
    pub message: String,
    /// Identifier of the check or pass that produced this finding.
    pub check: String,
    /// Human guidance for fixing the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-applicable replacement for the cell at (row, field).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<EntityKind>,
}

impl Finding {
    pub fn new(
        severity: Severity,
        entity: EntityKind,
        row: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            entity,
            row,
            field: field.into(),
            message: message.into(),
            check: String::new(),
            suggestion: None,
            suggested_value: None,
            confidence: None,
            related: Vec::new(),
        }
    }

    pub fn error(
        entity: EntityKind,
        row: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, entity, row, field, message)
    }

    pub fn warning(
        entity: EntityKind,
        row: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, entity, row, field, message)
    }

    pub fn info(
        entity: EntityKind,
        row: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Info, entity, row, field, message)
    }

    #[must_use]
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = check.into();
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_suggested_value(mut self, value: impl Into<CellValue>) -> Self {
        self.suggested_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    #[must_use]
    pub fn with_related(mut self, related: &[EntityKind]) -> Self {
        self.related = related.to_vec();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_dataset_level(&self) -> bool {
        self.row.is_none()
    }

    /// True when this finding is attached to the given cell.
    pub fn targets(&self, row: usize, field: &str) -> bool {
        self.row == Some(row) && self.field == field
    }
}

mod row_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(row: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match row {
            Some(index) => serializer.serialize_u64(*index as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(None)
        } else {
            usize::try_from(raw)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

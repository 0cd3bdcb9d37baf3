//! Anomalies: findings that carry a concrete replacement value.

use serde::{Deserialize, Serialize};

use crate::{CellValue, EntityKind, Finding, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCategory {
    Outlier,
    Pattern,
    Inconsistency,
    Duplicate,
}

impl AnomalyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outlier => "outlier",
            Self::Pattern => "pattern",
            Self::Inconsistency => "inconsistency",
            Self::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Finding severity an anomaly of this level is reported with.
    pub fn finding_severity(&self) -> Severity {
        match self {
            Self::High => Severity::Error,
            Self::Medium => Severity::Warning,
            Self::Low => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Stable id such as `duplicate-ClientID-2` or `slots-0`.
    pub id: String,
    pub entity: EntityKind,
    pub category: AnomalyCategory,
    pub severity: AnomalySeverity,
    pub row: usize,
    pub field: String,
    pub description: String,
    pub suggestion: String,
    pub confidence: f32,
    pub original_value: CellValue,
    pub suggested_value: CellValue,
}

impl Anomaly {
    /// True when applying the anomaly would change the cell.
    pub fn is_actionable(&self) -> bool {
        self.original_value != self.suggested_value
    }

    pub fn to_finding(&self) -> Finding {
        Finding::new(
            self.severity.finding_severity(),
            self.entity,
            Some(self.row),
            self.field.clone(),
            self.description.clone(),
        )
        .with_check(format!("anomaly:{}", self.category.label()))
        .with_suggestion(self.suggestion.clone())
        .with_suggested_value(self.suggested_value.clone())
        .with_confidence(self.confidence)
    }
}

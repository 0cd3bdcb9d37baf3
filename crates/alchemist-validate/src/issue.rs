//! Field-level validation issue types.
//!
//! Each variant carries only the data it needs; conversion to a [`Finding`]
//! supplies severity, message and any machine-applicable fix.

use alchemist_model::{CellValue, EntityKind, Finding, Severity};

use crate::util::plural;

/// Field validation issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    // Presence checks
    /// Required column absent from the first row
    RequiredColumnMissing { field: String },
    /// Identifier already used by an earlier row
    DuplicateId {
        row: usize,
        field: String,
        value: String,
    },

    // List format checks
    /// Comma-joined list contains `,,`
    ListEmptyEntries {
        row: usize,
        field: String,
        cleaned: String,
    },
    /// Comma-joined list starts or ends with a comma
    ListStrayCommas {
        row: usize,
        field: String,
        cleaned: String,
    },
    /// AvailableSlots is not written as `[n,...]`
    SlotsNotArray {
        row: usize,
        value: String,
        repaired: Option<String>,
    },
    /// PreferredPhases is neither `a-b` nor `[n,...]`
    PhasesMalformed { row: usize, value: String },

    // Value checks
    /// Numeric value outside its expected range
    OutOfRange {
        row: usize,
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// AttributesJSON looks like JSON but does not parse
    InvalidJson { row: usize },
    /// Requested task reference is not `T<digits>`
    TaskRefFormat { row: usize, task_id: String },

    // Capacity checks
    /// MaxLoadPerPhase above the overload threshold
    Overloaded { row: usize, load: String },
    /// Fewer than two available slots
    LimitedAvailability { row: usize, slots: usize },
    /// Fewer than two skills
    LimitedSkills { row: usize, count: usize },
    /// MaxConcurrent larger than Duration
    ConcurrencyExceedsDuration {
        row: usize,
        max_concurrent: f64,
        duration: f64,
    },

    /// The check itself failed to run
    CheckFailed { check: String, reason: String },
}

impl Issue {
    pub fn field(&self) -> &str {
        match self {
            Issue::RequiredColumnMissing { field } => field,
            Issue::DuplicateId { field, .. } => field,
            Issue::ListEmptyEntries { field, .. } => field,
            Issue::ListStrayCommas { field, .. } => field,
            Issue::SlotsNotArray { .. } => "AvailableSlots",
            Issue::PhasesMalformed { .. } => "PreferredPhases",
            Issue::OutOfRange { field, .. } => field,
            Issue::InvalidJson { .. } => "AttributesJSON",
            Issue::TaskRefFormat { .. } => "RequestedTaskIDs",
            Issue::Overloaded { .. } => "MaxLoadPerPhase",
            Issue::LimitedAvailability { .. } => "AvailableSlots",
            Issue::LimitedSkills { .. } => "Skills",
            Issue::ConcurrencyExceedsDuration { .. } => "MaxConcurrent",
            Issue::CheckFailed { .. } => "validator",
        }
    }

    /// Row index, or `None` for dataset-level issues.
    pub fn row(&self) -> Option<usize> {
        match self {
            Issue::RequiredColumnMissing { .. } | Issue::CheckFailed { .. } => None,
            Issue::DuplicateId { row, .. }
            | Issue::ListEmptyEntries { row, .. }
            | Issue::ListStrayCommas { row, .. }
            | Issue::SlotsNotArray { row, .. }
            | Issue::PhasesMalformed { row, .. }
            | Issue::OutOfRange { row, .. }
            | Issue::InvalidJson { row }
            | Issue::TaskRefFormat { row, .. }
            | Issue::Overloaded { row, .. }
            | Issue::LimitedAvailability { row, .. }
            | Issue::LimitedSkills { row, .. }
            | Issue::ConcurrencyExceedsDuration { row, .. } => Some(*row),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::RequiredColumnMissing { .. }
            | Issue::DuplicateId { .. }
            | Issue::SlotsNotArray { .. }
            | Issue::InvalidJson { .. }
            | Issue::CheckFailed { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::RequiredColumnMissing { field } => {
                format!("Required column '{field}' is missing")
            }
            Issue::DuplicateId { field, value, .. } => format!("Duplicate {field}: {value}"),
            Issue::ListEmptyEntries { field, .. } => {
                format!("{field} contains empty values (double commas)")
            }
            Issue::ListStrayCommas { field, .. } => {
                format!("{field} has trailing or leading commas")
            }
            Issue::SlotsNotArray { value, .. } => {
                format!("AvailableSlots should be in array format [1,2,3], got: {value}")
            }
            Issue::PhasesMalformed { value, .. } => format!(
                "PreferredPhases should be range format (1-3) or array format [1,2,3], got: {value}"
            ),
            Issue::OutOfRange {
                field,
                value,
                min,
                max,
                ..
            } => format!("{field} value {value} is outside expected range {min}-{max}"),
            Issue::InvalidJson { .. } => "Invalid JSON format in AttributesJSON".to_string(),
            Issue::TaskRefFormat { task_id, .. } => format!(
                "Task ID \"{task_id}\" doesn't follow expected format (T1, T17, T001, etc.)"
            ),
            Issue::Overloaded { load, .. } => {
                format!("Worker may be overloaded with {load} tasks per phase")
            }
            Issue::LimitedAvailability { slots, .. } => format!(
                "Worker has very limited availability ({})",
                plural(*slots, "slot")
            ),
            Issue::LimitedSkills { count, .. } => format!(
                "Worker has limited skills ({count}). Consider adding more skills for better task coverage."
            ),
            Issue::ConcurrencyExceedsDuration {
                max_concurrent,
                duration,
                ..
            } => format!("MaxConcurrent ({max_concurrent}) exceeds Duration ({duration})"),
            Issue::CheckFailed { check, reason } => format!("Validator failed: {check}: {reason}"),
        }
    }

    /// Human guidance, when there is something concrete to say.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Issue::DuplicateId { field, .. } => {
                Some(format!("Generate unique {field} or merge duplicate records"))
            }
            Issue::ListEmptyEntries { .. } | Issue::ListStrayCommas { .. } => {
                Some("Remove empty entries from the list".to_string())
            }
            Issue::SlotsNotArray { .. } => Some("Use array format: [1,2,3]".to_string()),
            Issue::PhasesMalformed { .. } => {
                Some("Use range format \"1-3\" or array format [1,2,3]".to_string())
            }
            Issue::OutOfRange { min, max, .. } => Some(format!("Use a value between {min} and {max}")),
            Issue::InvalidJson { .. } => Some("Fix JSON syntax errors".to_string()),
            Issue::TaskRefFormat { .. } => Some("Use task IDs such as T1 or T17".to_string()),
            _ => None,
        }
    }

    /// Replacement value that resolves the issue, if one can be derived.
    pub fn suggested_value(&self) -> Option<CellValue> {
        match self {
            Issue::ListEmptyEntries { cleaned, .. } | Issue::ListStrayCommas { cleaned, .. } => {
                Some(CellValue::text(cleaned.clone()))
            }
            Issue::SlotsNotArray { repaired, .. } => repaired.clone().map(CellValue::Text),
            Issue::OutOfRange {
                value, min, max, ..
            } => Some(CellValue::Number(value.clamp(*min, *max))),
            _ => None,
        }
    }

    pub fn into_finding(self, entity: EntityKind, check: &str) -> Finding {
        let mut finding = Finding::new(
            self.severity(),
            entity,
            self.row(),
            self.field(),
            self.message(),
        )
        .with_check(check);
        if let Some(suggestion) = self.suggestion() {
            finding = finding.with_suggestion(suggestion);
        }
        if let Some(value) = self.suggested_value() {
            finding = finding.with_suggested_value(value);
        }
        finding
    }
}

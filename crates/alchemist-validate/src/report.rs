//! Merged findings across all validators.

use std::collections::BTreeSet;

use alchemist_model::{CellValue, EntityKind, Finding, Severity};
use serde::{Deserialize, Serialize};

/// Concatenate finding lists in the given order. Nothing is deduplicated.
pub fn merge<I, S>(result_sets: I) -> Vec<Finding>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = Finding>,
{
    result_sets.into_iter().flatten().collect()
}

/// The findings of one validation run.
///
/// A cell may carry several findings from different validators at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    pub fn merged<I, S>(result_sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Finding>,
    {
        Self::new(merge(result_sets))
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn for_entity(&self, entity: EntityKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.entity == entity)
    }

    /// Findings attached to one cell, in report order.
    pub fn at(&self, entity: EntityKind, row: usize, field: &str) -> Vec<&Finding> {
        self.for_entity(entity)
            .filter(|f| f.targets(row, field))
            .collect()
    }

    /// Worst severity on a cell, for highlighting.
    pub fn severity_at(&self, entity: EntityKind, row: usize, field: &str) -> Option<Severity> {
        self.at(entity, row, field).iter().map(|f| f.severity).min()
    }

    /// First machine-applicable fix recorded for a cell.
    pub fn suggested_value_at(
        &self,
        entity: EntityKind,
        row: usize,
        field: &str,
    ) -> Option<&CellValue> {
        self.for_entity(entity)
            .filter(|f| f.targets(row, field))
            .find_map(|f| f.suggested_value.as_ref())
    }

    pub fn rows_with_findings(&self, entity: EntityKind) -> BTreeSet<usize> {
        self.for_entity(entity).filter_map(|f| f.row).collect()
    }

    pub fn rows_with_errors(&self, entity: EntityKind) -> BTreeSet<usize> {
        self.for_entity(entity)
            .filter(|f| f.is_error())
            .filter_map(|f| f.row)
            .collect()
    }
}

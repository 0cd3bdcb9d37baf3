//! Mapping state for review and manual override.

use alchemist_model::{EntityKind, HeaderMapping, MappingOrigin, RowSet};

use crate::engine::{HeaderReconciler, ReconcileOptions};
use crate::error::MappingError;

/// Mapping for one upload: the source headers plus the current mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingState {
    raw_columns: Vec<String>,
    mapping: HeaderMapping,
}

impl MappingState {
    pub fn new(raw_columns: Vec<String>, mapping: HeaderMapping) -> Self {
        Self {
            raw_columns,
            mapping,
        }
    }

    /// Run the reconciler over the source headers.
    pub fn from_headers(kind: EntityKind, raw_columns: &[String], options: ReconcileOptions) -> Self {
        let mapping = HeaderReconciler::new(options).reconcile_kind(kind, raw_columns);
        Self::new(raw_columns.to_vec(), mapping)
    }

    pub fn kind(&self) -> EntityKind {
        self.mapping.kind
    }

    pub fn mapping(&self) -> &HeaderMapping {
        &self.mapping
    }

    pub fn raw_columns(&self) -> &[String] {
        &self.raw_columns
    }

    /// Replace (`Some`) or delete (`None`) the entry for one canonical field.
    ///
    /// Manual entries carry confidence 1.0 and are never re-scored.
    pub fn set_mapping(&mut self, canonical: &str, raw: Option<&str>) -> Result<(), MappingError> {
        let kind = self.kind();
        if !kind.has_field(canonical) {
            return Err(MappingError::FieldNotFound {
                entity: kind,
                field: canonical.to_string(),
            });
        }
        match raw {
            Some(column) => {
                if !self.raw_columns.iter().any(|c| c == column) {
                    return Err(MappingError::ColumnNotFound(column.to_string()));
                }
                self.mapping
                    .insert(canonical, column, 1.0, MappingOrigin::Manual);
            }
            None => {
                self.mapping.remove(canonical);
            }
        }
        Ok(())
    }

    /// Source columns no canonical field maps from.
    pub fn unused_columns(&self) -> Vec<&str> {
        self.raw_columns
            .iter()
            .map(String::as_str)
            .filter(|c| !self.mapping.entries().iter().any(|(_, m)| m.raw == *c))
            .collect()
    }

    pub fn apply(&self, raw: &RowSet) -> RowSet {
        self.mapping.apply(raw)
    }

    pub fn summary(&self) -> MappingSummary {
        let kind = self.kind();
        let entries = self.mapping.entries();
        MappingSummary {
            canonical_total: kind.canonical_fields().len(),
            mapped: entries.len(),
            manual: entries
                .iter()
                .filter(|(_, m)| m.origin == MappingOrigin::Manual)
                .count(),
            required_total: kind.required_fields().len(),
            required_mapped: kind
                .required_fields()
                .iter()
                .filter(|f| self.mapping.get(f).is_some())
                .count(),
            unused_columns: self.unused_columns().len(),
            shared_columns: self.mapping.shared_columns().len(),
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    pub canonical_total: usize,
    pub mapped: usize,
    /// Entries set by a reviewer.
    pub manual: usize,
    pub required_total: usize,
    pub required_mapped: usize,
    pub unused_columns: usize,
    /// Source columns claimed by more than one canonical field.
    pub shared_columns: usize,
}

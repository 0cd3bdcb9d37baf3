//! Session state: the rows, mappings and last report of one working session.
//!
//! Every operation takes the session by reference; nothing is global. Edits
//! are replace-on-copy, so a [`RowSet`] handed out earlier never changes
//! underneath its reader.

use std::collections::BTreeMap;

use alchemist_map::{MappingState, ReconcileOptions};
use alchemist_model::{Anomaly, CellValue, EntityKind, RowSet};
use alchemist_validate::cross_entity::validate_cross_entity;
use alchemist_validate::{
    AnomalyDetector, CrossEntityInput, DetectorOptions, FieldReport, FieldValidator,
    ValidationReport,
};
use tracing::{debug, info, info_span};

use crate::error::{CoreError, Result};
use crate::search::{SearchResult, search_rows};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionOptions {
    pub reconcile: ReconcileOptions,
    pub detector: DetectorOptions,
}

/// Source rows for one entity kind and the mapping onto canonical fields.
#[derive(Debug, Clone)]
pub struct EntityState {
    raw: RowSet,
    mapping: MappingState,
    /// Bumped on every edit or mapping change.
    version: u64,
}

impl EntityState {
    pub fn raw(&self) -> &RowSet {
        &self.raw
    }

    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Canonical view of the source rows.
    pub fn rows(&self) -> RowSet {
        self.mapping.apply(&self.raw)
    }
}

pub struct Session {
    options: SessionOptions,
    validator: FieldValidator,
    entities: BTreeMap<EntityKind, EntityState>,
    field_reports: Vec<FieldReport>,
    report: ValidationReport,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self::with_validator(options, FieldValidator::default())
    }

    pub fn with_validator(options: SessionOptions, validator: FieldValidator) -> Self {
        Self {
            options,
            validator,
            entities: BTreeMap::new(),
            field_reports: Vec::new(),
            report: ValidationReport::default(),
        }
    }

    /// Store source rows and reconcile their headers. Replaces earlier data of the same kind.
    pub fn load(&mut self, kind: EntityKind, raw: RowSet) -> Result<&MappingState> {
        if raw.kind != kind {
            return Err(CoreError::KindMismatch {
                expected: kind,
                found: raw.kind,
            });
        }
        let mapping = MappingState::from_headers(kind, &raw.columns, self.options.reconcile);
        info!(
            entity = %kind,
            row_count = raw.len(),
            mapped = mapping.mapping().len(),
            "rows loaded"
        );
        let version = self.entities.get(&kind).map_or(0, |s| s.version + 1);
        let state = EntityState {
            raw,
            mapping,
            version,
        };
        self.entities.insert(kind, state);
        Ok(self.entities[&kind].mapping())
    }

    pub fn is_loaded(&self, kind: EntityKind) -> bool {
        self.entities.contains_key(&kind)
    }

    pub fn entity(&self, kind: EntityKind) -> Result<&EntityState> {
        self.entities.get(&kind).ok_or(CoreError::NotLoaded(kind))
    }

    fn entity_mut(&mut self, kind: EntityKind) -> Result<&mut EntityState> {
        self.entities.get_mut(&kind).ok_or(CoreError::NotLoaded(kind))
    }

    /// Manually map (`Some`) or unmap (`None`) one canonical field.
    pub fn set_mapping(&mut self, kind: EntityKind, canonical: &str, raw: Option<&str>) -> Result<()> {
        let state = self.entity_mut(kind)?;
        state.mapping.set_mapping(canonical, raw)?;
        state.version += 1;
        debug!(entity = %kind, field = canonical, source = raw.unwrap_or("-"), "mapping overridden");
        Ok(())
    }

    /// Canonical rows for one kind.
    pub fn rows(&self, kind: EntityKind) -> Result<RowSet> {
        Ok(self.entity(kind)?.rows())
    }

    fn rows_or_empty(&self, kind: EntityKind) -> RowSet {
        self.entities
            .get(&kind)
            .map_or_else(|| RowSet::empty(kind), EntityState::rows)
    }

    /// Field checks over one kind. Does not touch the stored report.
    pub fn validate(&self, kind: EntityKind) -> Result<FieldReport> {
        Ok(self.validator.validate(&self.rows(kind)?))
    }

    /// Field checks for every loaded kind, then the cross-entity passes.
    ///
    /// The merged result replaces the stored report.
    pub fn validate_all(&mut self) -> Result<&ValidationReport> {
        let span = info_span!("validate", entities = self.entities.len());
        let _guard = span.enter();

        let clients = self.rows_or_empty(EntityKind::Client);
        let workers = self.rows_or_empty(EntityKind::Worker);
        let tasks = self.rows_or_empty(EntityKind::Task);

        let field_reports: Vec<FieldReport> = [&clients, &workers, &tasks]
            .into_iter()
            .filter(|rows| self.is_loaded(rows.kind))
            .map(|rows| self.validator.validate(rows))
            .collect();
        let cross = validate_cross_entity(CrossEntityInput::new(&clients, &workers, &tasks)?);

        let mut report =
            ValidationReport::merged(field_reports.iter().map(FieldReport::findings));
        report.extend(cross);
        info!(
            finding_count = report.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation complete"
        );

        self.field_reports = field_reports;
        self.report = report;
        Ok(&self.report)
    }

    /// The report from the last [`Session::validate_all`].
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn field_reports(&self) -> &[FieldReport] {
        &self.field_reports
    }

    pub fn detect_anomalies(&self, kind: EntityKind) -> Result<Vec<Anomaly>> {
        let rows = self.rows(kind)?;
        Ok(AnomalyDetector::new(self.options.detector).detect(&rows))
    }

    /// Write the report's suggested value into one cell and return the new canonical rows.
    ///
    /// Findings are left as they are until the next validation run.
    pub fn apply_suggestion(&mut self, kind: EntityKind, row: usize, field: &str) -> Result<RowSet> {
        let value = self
            .report
            .suggested_value_at(kind, row, field)
            .cloned()
            .ok_or_else(|| CoreError::NoSuggestion {
                entity: kind,
                row,
                field: field.to_string(),
            })?;
        self.write_cell(kind, row, field, value)
    }

    pub fn apply_anomaly(&mut self, kind: EntityKind, anomaly: &Anomaly) -> Result<RowSet> {
        if anomaly.entity != kind {
            return Err(CoreError::KindMismatch {
                expected: kind,
                found: anomaly.entity,
            });
        }
        self.write_cell(kind, anomaly.row, &anomaly.field, anomaly.suggested_value.clone())
    }

    /// Overwrite one canonical cell.
    ///
    /// The value lands in the source column the field maps from, so a later
    /// mapping change keeps the edit.
    pub fn write_cell(
        &mut self,
        kind: EntityKind,
        row: usize,
        field: &str,
        value: CellValue,
    ) -> Result<RowSet> {
        let state = self.entity_mut(kind)?;
        let column = state.mapping.mapping().source_of(field).to_string();
        let raw = state.raw.with_cell(row, &column, value)?;
        if raw.columns.len() != state.raw.columns.len() {
            state.mapping = MappingState::new(raw.columns.clone(), state.mapping.mapping().clone());
        }
        state.raw = raw;
        state.version += 1;
        debug!(entity = %kind, row, field, column = %column, "cell replaced");
        Ok(state.rows())
    }

    pub fn search(&self, kind: EntityKind, query: &str, errors_only: bool) -> Result<SearchResult> {
        let rows = self.rows(kind)?;
        Ok(search_rows(&rows, &self.report, query, errors_only))
    }
}

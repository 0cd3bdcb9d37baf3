//! Statistical and pattern-based anomaly detection.
//!
//! Detectors run in a fixed order and their results are concatenated, so the
//! order below is also the ranking: duplicates, numeric outliers, broken
//! JSON, malformed slots, skill overload, ID format, single-task requests,
//! then missing required values. The list is truncated after concatenation.

mod records;
mod values;

use alchemist_model::{Anomaly, RowSet};
use tracing::debug;

/// Options for anomaly detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Maximum number of anomalies returned.
    pub max_anomalies: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self { max_anomalies: 10 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    options: DetectorOptions,
}

impl AnomalyDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    /// Every anomaly in ranking order, before truncation.
    pub fn detect_all(&self, rows: &RowSet) -> Vec<Anomaly> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut found = Vec::new();
        records::duplicates(rows, &mut found);
        values::outliers(rows, &mut found);
        values::broken_json(rows, &mut found);
        values::malformed_slots(rows, &mut found);
        values::skill_overload(rows, &mut found);
        records::id_format(rows, &mut found);
        values::single_task(rows, &mut found);
        records::missing_required(rows, &mut found);
        found
    }

    pub fn detect(&self, rows: &RowSet) -> Vec<Anomaly> {
        let mut found = self.detect_all(rows);
        debug!(
            entity = %rows.kind,
            anomaly_count = found.len(),
            cap = self.options.max_anomalies,
            "anomaly detection complete"
        );
        found.truncate(self.options.max_anomalies);
        found
    }
}

/// Detect with default options.
pub fn detect(rows: &RowSet) -> Vec<Anomaly> {
    AnomalyDetector::default().detect(rows)
}

//! Bundled sample dataset with consistent cross-references.

use alchemist_model::{EntityKind, RowSet};
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::json_rows::rows_from_value;

const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// Five clients, five workers and five tasks.
#[derive(Debug, Clone)]
pub struct SampleDataset {
    pub clients: RowSet,
    pub workers: RowSet,
    pub tasks: RowSet,
}

impl SampleDataset {
    pub fn get(&self, kind: EntityKind) -> &RowSet {
        match kind {
            EntityKind::Client => &self.clients,
            EntityKind::Worker => &self.workers,
            EntityKind::Task => &self.tasks,
        }
    }
}

pub fn sample_dataset() -> Result<SampleDataset> {
    let root: Value = serde_json::from_str(SAMPLE_JSON).map_err(|source| IngestError::JsonParse {
        source_id: "sample".to_string(),
        source,
    })?;
    let section = |kind: EntityKind| -> Result<RowSet> {
        let key = kind.plural();
        let value = root.get(key).ok_or_else(|| IngestError::JsonShape {
            source_id: "sample".to_string(),
            reason: format!("missing section '{key}'"),
        })?;
        rows_from_value(kind, value, &format!("sample:{key}"))
    };
    Ok(SampleDataset {
        clients: section(EntityKind::Client)?,
        workers: section(EntityKind::Worker)?,
        tasks: section(EntityKind::Task)?,
    })
}

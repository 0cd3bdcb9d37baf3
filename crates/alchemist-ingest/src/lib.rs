//! Row loading for client, worker and task data.
//!
//! Every row gets a [`RowId`](alchemist_model::RowId) derived from its source
//! and record number, so identity survives edits and reordering.

#![deny(unsafe_code)]

mod csv_rows;
mod error;
mod json_rows;
mod row_id;
mod sample;

use std::path::Path;

use alchemist_model::{EntityKind, RowSet};

pub use csv_rows::{parse_csv, read_csv};
pub use error::{IngestError, Result};
pub use json_rows::{parse_json, read_json};
pub use row_id::derive_row_id;
pub use sample::{SampleDataset, sample_dataset};

/// Load a `.csv` or `.json` file, chosen by extension.
pub fn read_rows(kind: EntityKind, path: &Path) -> Result<RowSet> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => read_csv(kind, path),
        Some("json") => read_json(kind, path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

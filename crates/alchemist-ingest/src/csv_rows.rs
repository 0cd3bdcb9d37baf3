use std::io::Read;
use std::path::Path;

use alchemist_model::{CellValue, EntityKind, Row, RowSet};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::row_id::derive_row_id;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> CellValue {
    let value = raw.trim();
    if value.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(value.to_string())
    }
}

/// Read a CSV file with a header row. The path is the row-id source.
pub fn read_csv(kind: EntityKind, path: &Path) -> Result<RowSet> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(kind, file, &path.display().to_string())
}

/// Parse CSV text from any reader.
///
/// Short records are padded with `Missing`; records that are entirely blank
/// are skipped but still consume a record number. Blank headers are dropped
/// along with their cells.
pub fn parse_csv<R: Read>(kind: EntityKind, reader: R, source_id: &str) -> Result<RowSet> {
    let csv_error = |source| IngestError::CsvParse {
        source_id: source_id.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    // Columns with a blank header (a trailing comma in the header row) carry
    // no name to reconcile and are dropped.
    let columns: Vec<(usize, String)> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .enumerate()
        .filter(|(_, header)| !header.is_empty())
        .collect();
    let headers = columns.iter().map(|(_, header)| header.clone()).collect();

    let mut rows = RowSet::new(kind, headers);
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let cells: Vec<CellValue> = columns
            .iter()
            .map(|(col, _)| record.get(*col).map_or(CellValue::Missing, normalize_cell))
            .collect();
        if cells.iter().all(|cell| *cell == CellValue::Missing) {
            continue;
        }
        let record_number = (idx as u64) + 1;
        let mut row = Row::new(derive_row_id(source_id, record_number));
        for ((_, header), cell) in columns.iter().zip(cells) {
            row = row.with(header.as_str(), cell);
        }
        rows.push_row(row);
    }

    debug!(
        entity = %kind,
        source = source_id,
        row_count = rows.len(),
        column_count = rows.columns.len(),
        "csv ingested"
    );
    Ok(rows)
}

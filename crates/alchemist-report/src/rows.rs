use std::path::Path;

use alchemist_model::{CellValue, RowSet};
use serde_json::{Map, Value};

use crate::common::{csv_writer, write_file};
use crate::error::Result;

/// Render a row set as CSV: a header line of its columns, one line per row.
pub fn rows_to_csv(rows: &RowSet) -> Result<String> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(&rows.columns)?;
    for row in &rows.rows {
        let record: Vec<String> = rows
            .columns
            .iter()
            .map(|column| row.get(column).map(CellValue::render).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_rows_csv(path: &Path, rows: &RowSet) -> Result<()> {
    write_file(path, rows_to_csv(rows)?.as_bytes())
}

/// Rows as an array of objects keyed in column order. `Missing` becomes null.
pub fn rows_to_json(rows: &RowSet) -> Value {
    let records = rows
        .rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for column in &rows.columns {
                let value = match row.get(column) {
                    Some(CellValue::Text(text)) => Value::String(text.clone()),
                    Some(CellValue::Number(n)) => number_value(*n),
                    Some(CellValue::Missing) | None => Value::Null,
                };
                object.insert(column.clone(), value);
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(records)
}

/// Integral values export without a fractional part.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

pub fn write_rows_json(path: &Path, rows: &RowSet) -> Result<()> {
    let text = serde_json::to_string_pretty(&rows_to_json(rows))?;
    write_file(path, text.as_bytes())
}

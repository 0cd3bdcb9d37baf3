//! Export of cleaned rows and validation findings.
//!
//! - **Rows**: CSV (quoted only where needed, `\n` line endings) and JSON
//! - **Findings**: CSV and a JSON document with severity counts
//! - **Rules configuration**: read and written unchanged

#![deny(unsafe_code)]

mod common;
mod error;
mod findings;
mod outputs;
mod rows;
mod rules;

pub use error::{ReportError, Result};
pub use findings::{
    FINDINGS_CSV_HEADER, findings_to_csv, findings_to_json, write_findings_csv,
    write_findings_json,
};
pub use outputs::{FINDINGS_CSV, FINDINGS_JSON, RULES_CONFIG_JSON, write_outputs};
pub use rows::{rows_to_csv, rows_to_json, write_rows_csv, write_rows_json};
pub use rules::{read_rules, write_rules};

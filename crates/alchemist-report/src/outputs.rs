use std::path::{Path, PathBuf};

use alchemist_model::{RowSet, RulesConfig};
use alchemist_validate::ValidationReport;
use tracing::info;

use crate::common::ensure_output_dir;
use crate::error::Result;
use crate::findings::{write_findings_csv, write_findings_json};
use crate::rows::write_rows_csv;
use crate::rules::write_rules;

pub const FINDINGS_JSON: &str = "findings.json";
pub const FINDINGS_CSV: &str = "findings.csv";
pub const RULES_CONFIG_JSON: &str = "rules-config.json";

/// Write cleaned row sets as `<entities>.csv`, both findings files and, when
/// given, the rules configuration. Returns the written paths.
pub fn write_outputs(
    output_dir: &Path,
    row_sets: &[&RowSet],
    report: &ValidationReport,
    rules: Option<&RulesConfig>,
) -> Result<Vec<PathBuf>> {
    let dir = ensure_output_dir(output_dir)?;
    let mut outputs = Vec::new();

    for rows in row_sets {
        let path = dir.join(format!("{}.csv", rows.kind.plural()));
        write_rows_csv(&path, rows)?;
        outputs.push(path);
    }

    let path = dir.join(FINDINGS_JSON);
    write_findings_json(&path, report)?;
    outputs.push(path);

    let path = dir.join(FINDINGS_CSV);
    write_findings_csv(&path, &report.findings)?;
    outputs.push(path);

    if let Some(rules) = rules {
        let path = dir.join(RULES_CONFIG_JSON);
        write_rules(&path, rules)?;
        outputs.push(path);
    }

    info!(
        output_dir = %dir.display(),
        file_count = outputs.len(),
        "outputs written"
    );
    Ok(outputs)
}

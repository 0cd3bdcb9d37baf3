use std::path::Path;

use alchemist_model::Finding;
use alchemist_validate::ValidationReport;
use serde::Serialize;

use crate::common::{csv_writer, write_file};
use crate::error::Result;

pub const FINDINGS_CSV_HEADER: [&str; 7] = [
    "severity",
    "entity",
    "row",
    "field",
    "check",
    "message",
    "suggestion",
];

/// Findings as CSV. Dataset-level findings use row -1.
pub fn findings_to_csv(findings: &[Finding]) -> Result<String> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(FINDINGS_CSV_HEADER)?;
    for finding in findings {
        let row = finding
            .row
            .map_or_else(|| "-1".to_string(), |row| row.to_string());
        writer.write_record([
            finding.severity.label(),
            finding.entity.label(),
            row.as_str(),
            finding.field.as_str(),
            finding.check.as_str(),
            finding.message.as_str(),
            finding.suggestion.as_deref().unwrap_or(""),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Debug, Serialize)]
struct Counts {
    total: usize,
    errors: usize,
    warnings: usize,
    info: usize,
}

#[derive(Debug, Serialize)]
struct FindingsDocument<'a> {
    counts: Counts,
    findings: &'a [Finding],
}

/// Pretty JSON document with severity counts and the findings in report order.
pub fn findings_to_json(report: &ValidationReport) -> Result<String> {
    let document = FindingsDocument {
        counts: Counts {
            total: report.len(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            info: report.info_count(),
        },
        findings: &report.findings,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn write_findings_csv(path: &Path, findings: &[Finding]) -> Result<()> {
    write_file(path, findings_to_csv(findings)?.as_bytes())
}

pub fn write_findings_json(path: &Path, report: &ValidationReport) -> Result<()> {
    write_file(path, findings_to_json(report)?.as_bytes())
}

//! Result types shared by commands and summary rendering.

use std::path::PathBuf;

use alchemist_model::Severity;
use alchemist_validate::{CheckStatus, FieldReport, Pass, ValidationReport};
use serde::Serialize;

/// One line of the validation summary: a field check for one entity, or a
/// cross-entity pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Entity label, or `cross-entity`.
    pub scope: String,
    pub check: String,
    pub status: CheckStatus,
    pub errors: usize,
    pub warnings: usize,
}

/// Outcome of `alchemist validate`.
#[derive(Debug, Clone)]
pub struct ValidateResult {
    pub field_reports: Vec<FieldReport>,
    pub report: ValidationReport,
    /// Files written to the output directory, if one was given.
    pub written: Vec<PathBuf>,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }

    pub fn check_summaries(&self) -> Vec<CheckSummary> {
        check_summaries(&self.field_reports, &self.report)
    }
}

/// Field check rows in entity then check order, followed by one row per
/// cross-entity pass.
pub fn check_summaries(
    field_reports: &[FieldReport],
    report: &ValidationReport,
) -> Vec<CheckSummary> {
    let mut summaries: Vec<CheckSummary> = field_reports
        .iter()
        .flat_map(|field_report| {
            field_report.outcomes.iter().map(|outcome| CheckSummary {
                scope: field_report.entity.label().to_string(),
                check: outcome.name.to_string(),
                status: outcome.status,
                errors: outcome.errors,
                warnings: outcome.warnings,
            })
        })
        .collect();

    for pass in Pass::all() {
        let findings = report
            .findings
            .iter()
            .filter(|finding| finding.check == pass.label());
        let (mut errors, mut warnings) = (0, 0);
        for finding in findings {
            match finding.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => {}
            }
        }
        summaries.push(CheckSummary {
            scope: "cross-entity".to_string(),
            check: pass.label().to_string(),
            status: status_for(errors, warnings),
            errors,
            warnings,
        });
    }
    summaries
}

fn status_for(errors: usize, warnings: usize) -> CheckStatus {
    if errors > 0 {
        CheckStatus::Failed
    } else if warnings > 0 {
        CheckStatus::Warning
    } else {
        CheckStatus::Passed
    }
}

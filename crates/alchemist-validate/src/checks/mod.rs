//! Field validation checks.
//!
//! Each module performs one independent check over a single entity's rows.
//! The [`FieldValidator`] runs them in order and isolates failures so one
//! broken check never hides the results of the others.

mod broken_json;
mod capacity_saturation;
mod duplicate_ids;
mod malformed_lists;
mod max_concurrency;
mod missing_columns;
mod out_of_range;
mod overloaded_workers;
mod skill_coverage;
mod unknown_references;

use std::time::Instant;

use alchemist_model::{EntityKind, Finding, RowSet, Severity};
use serde::Serialize;
use tracing::{debug, info_span, warn};

use crate::error::ValidateError;
use crate::issue::Issue;

/// A single field-level check.
pub trait Check: Send + Sync {
    /// Stable identifier such as `duplicate_ids`.
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn run(&self, rows: &RowSet) -> Result<Vec<Issue>, ValidateError>;
}

/// A check backed by a plain function.
struct BuiltinCheck {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    run: fn(&RowSet) -> Vec<Issue>,
}

impl Check for BuiltinCheck {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn run(&self, rows: &RowSet) -> Result<Vec<Issue>, ValidateError> {
        Ok((self.run)(rows))
    }
}

/// The standard check set, in execution order.
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        builtin(
            "missing_columns",
            "Missing Columns",
            "Checks for required columns based on entity type",
            missing_columns::check,
        ),
        builtin(
            "duplicate_ids",
            "Duplicate IDs",
            "Identifies duplicate primary key values",
            duplicate_ids::check,
        ),
        builtin(
            "malformed_lists",
            "Malformed Lists",
            "Validates comma-separated and array format fields",
            malformed_lists::check,
        ),
        builtin(
            "out_of_range",
            "Out-of-Range Values",
            "Checks numeric values against expected ranges",
            out_of_range::check,
        ),
        builtin(
            "broken_json",
            "Broken JSON",
            "Validates JSON format in AttributesJSON fields",
            broken_json::check,
        ),
        builtin(
            "unknown_references",
            "Unknown References",
            "Checks the format of requested task references",
            unknown_references::check,
        ),
        builtin(
            "overloaded_workers",
            "Overloaded Workers",
            "Checks for workers with excessive task assignments",
            overloaded_workers::check,
        ),
        builtin(
            "capacity_saturation",
            "Phase-slot Capacity",
            "Validates phase-slot capacity constraints",
            capacity_saturation::check,
        ),
        builtin(
            "skill_coverage",
            "Skill Coverage Gaps",
            "Flags workers with too few skills",
            skill_coverage::check,
        ),
        builtin(
            "max_concurrency",
            "Max Concurrency Feasibility",
            "Validates maximum concurrency constraints",
            max_concurrency::check,
        ),
    ]
}

fn builtin(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    run: fn(&RowSet) -> Vec<Issue>,
) -> Box<dyn Check> {
    Box::new(BuiltinCheck {
        id,
        name,
        description,
        run,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Warning,
    Failed,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }
}

/// Result of one check over one entity's rows.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub id: &'static str,
    pub name: &'static str,
    pub status: CheckStatus,
    pub errors: usize,
    pub warnings: usize,
    pub findings: Vec<Finding>,
}

impl CheckOutcome {
    fn from_findings(check: &dyn Check, findings: Vec<Finding>) -> Self {
        let errors = count(&findings, Severity::Error);
        let warnings = count(&findings, Severity::Warning);
        let status = if errors > 0 {
            CheckStatus::Failed
        } else if warnings > 0 {
            CheckStatus::Warning
        } else {
            CheckStatus::Passed
        };
        Self {
            id: check.id(),
            name: check.name(),
            status,
            errors,
            warnings,
            findings,
        }
    }
}

fn count(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// Per-check outcomes for one entity kind.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub entity: EntityKind,
    pub outcomes: Vec<CheckOutcome>,
}

impl FieldReport {
    /// All findings in check order.
    pub fn findings(&self) -> Vec<Finding> {
        self.outcomes
            .iter()
            .flat_map(|o| o.findings.iter().cloned())
            .collect()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.outcomes.into_iter().flat_map(|o| o.findings).collect()
    }

    pub fn outcome(&self, id: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.errors).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.warnings).sum()
    }
}

/// Runs a set of checks over an entity's rows.
pub struct FieldValidator {
    checks: Vec<Box<dyn Check>>,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::with_checks(default_checks())
    }
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(AsRef::as_ref)
    }

    pub fn validate(&self, rows: &RowSet) -> FieldReport {
        let span = info_span!("field_validation", entity = %rows.kind, row_count = rows.len());
        let _guard = span.enter();

        let outcomes = self
            .checks
            .iter()
            .map(|check| run_isolated(check.as_ref(), rows))
            .collect();
        FieldReport {
            entity: rows.kind,
            outcomes,
        }
    }
}

fn run_isolated(check: &dyn Check, rows: &RowSet) -> CheckOutcome {
    let start = Instant::now();
    let findings = match check.run(rows) {
        Ok(issues) => issues
            .into_iter()
            .map(|issue| issue.into_finding(rows.kind, check.id()))
            .collect(),
        Err(error) => {
            warn!(check = check.id(), %error, "check failed");
            vec![
                Issue::CheckFailed {
                    check: check.id().to_string(),
                    reason: error.to_string(),
                }
                .into_finding(rows.kind, check.id()),
            ]
        }
    };
    debug!(
        check = check.id(),
        finding_count = findings.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "check complete"
    );
    CheckOutcome::from_findings(check, findings)
}

/// Run the standard checks and return the flattened findings.
pub fn validate(rows: &RowSet) -> Vec<Finding> {
    FieldValidator::default().validate(rows).into_findings()
}

//! Integration tests for the field validators.

use alchemist_model::{CellValue, EntityKind, Finding, Row, RowId, RowSet, Severity};
use alchemist_validate::checks::validate;
use alchemist_validate::{Check, CheckStatus, FieldValidator, Issue, ValidateError};

fn test_rows(kind: EntityKind, records: &[&[(&str, &str)]]) -> RowSet {
    let mut set = RowSet::empty(kind);
    for (index, record) in records.iter().enumerate() {
        let mut row = Row::new(RowId::from_first_16_bytes_of_sha256([index as u8; 32]));
        for (field, value) in record.iter() {
            if !set.columns.iter().any(|c| c == field) {
                set.columns.push(field.to_string());
            }
            let cell = if value.is_empty() {
                CellValue::Missing
            } else {
                CellValue::text(*value)
            };
            row = row.with(*field, cell);
        }
        set.push_row(row);
    }
    set
}

fn of_check<'a>(findings: &'a [Finding], check: &str) -> Vec<&'a Finding> {
    findings.iter().filter(|f| f.check == check).collect()
}

#[test]
fn duplicate_ids_flag_later_occurrences_only() {
    let rows = test_rows(
        EntityKind::Client,
        &[&[("ClientID", "C1")], &[("ClientID", "C2")], &[("ClientID", "C1")]],
    );
    let findings = validate(&rows);
    let duplicates = of_check(&findings, "duplicate_ids");
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].row, Some(2));
    assert_eq!(duplicates[0].severity, Severity::Error);
    assert!(duplicates[0].message.contains("C1"));
}

#[test]
fn blank_ids_are_not_duplicates() {
    let rows = test_rows(
        EntityKind::Worker,
        &[&[("WorkerID", "")], &[("WorkerID", "")]],
    );
    assert!(of_check(&validate(&rows), "duplicate_ids").is_empty());
}

#[test]
fn missing_required_columns_are_dataset_level() {
    let rows = test_rows(EntityKind::Task, &[&[("TaskID", "T1"), ("TaskName", "Build")]]);
    let findings = validate(&rows);
    let missing = of_check(&findings, "missing_columns");
    let fields: Vec<&str> = missing.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["Duration", "RequiredSkills"]);
    assert!(missing.iter().all(|f| f.row.is_none()));
    assert_eq!(missing[0].message, "Required column 'Duration' is missing");
}

#[test]
fn empty_dataset_misses_every_required_column() {
    let findings = validate(&RowSet::empty(EntityKind::Client));
    assert_eq!(of_check(&findings, "missing_columns").len(), 5);
}

#[test]
fn priority_range() {
    let high = test_rows(EntityKind::Client, &[&[("PriorityLevel", "7")]]);
    let findings = validate(&high);
    let range = of_check(&findings, "out_of_range");
    assert_eq!(range.len(), 1);
    assert_eq!(range[0].severity, Severity::Warning);
    assert_eq!(
        range[0].message,
        "PriorityLevel value 7 is outside expected range 1-5"
    );
    assert_eq!(range[0].suggested_value, Some(CellValue::Number(5.0)));

    let fine = test_rows(EntityKind::Client, &[&[("PriorityLevel", "3")]]);
    assert!(of_check(&validate(&fine), "out_of_range").is_empty());

    let junk = test_rows(EntityKind::Client, &[&[("PriorityLevel", "high")]]);
    assert!(of_check(&validate(&junk), "out_of_range").is_empty());
}

#[test]
fn attributes_json_only_checked_when_structured() {
    let free = test_rows(
        EntityKind::Client,
        &[&[("AttributesJSON", "not json but fine")]],
    );
    assert!(of_check(&validate(&free), "broken_json").is_empty());

    let bad = test_rows(EntityKind::Client, &[&[("AttributesJSON", "{bad}")]]);
    let findings = validate(&bad);
    let json = of_check(&findings, "broken_json");
    assert_eq!(json.len(), 1);
    assert_eq!(json[0].severity, Severity::Error);

    let good = test_rows(
        EntityKind::Client,
        &[&[("AttributesJSON", r#" {"vip": true} "#)]],
    );
    assert!(of_check(&validate(&good), "broken_json").is_empty());
}

#[test]
fn malformed_lists() {
    let workers = test_rows(
        EntityKind::Worker,
        &[
            &[("Skills", "rust,,go"), ("AvailableSlots", "1,2,3")],
            &[("Skills", ",rust,go,"), ("AvailableSlots", "[1, 2]")],
        ],
    );
    let findings = validate(&workers);
    let lists = of_check(&findings, "malformed_lists");
    assert_eq!(lists.len(), 3);

    assert_eq!(lists[0].message, "Skills contains empty values (double commas)");
    assert_eq!(lists[0].suggested_value, Some(CellValue::text("rust,go")));
    assert_eq!(
        lists[1].message,
        "AvailableSlots should be in array format [1,2,3], got: 1,2,3"
    );
    assert_eq!(lists[1].severity, Severity::Error);
    assert_eq!(lists[1].suggested_value, Some(CellValue::text("[1,2,3]")));
    assert_eq!(lists[2].row, Some(1));
    assert_eq!(lists[2].message, "Skills has trailing or leading commas");
}

#[test]
fn preferred_phases_shape() {
    let tasks = test_rows(
        EntityKind::Task,
        &[
            &[("PreferredPhases", "1-3")],
            &[("PreferredPhases", "[2,4]")],
            &[("PreferredPhases", "early")],
        ],
    );
    let findings = validate(&tasks);
    let lists = of_check(&findings, "malformed_lists");
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].row, Some(2));
    assert_eq!(lists[0].severity, Severity::Warning);
}

#[test]
fn task_reference_format() {
    let clients = test_rows(
        EntityKind::Client,
        &[&[("RequestedTaskIDs", "T1, T017,Task9,,")]],
    );
    let findings = validate(&clients);
    let refs = of_check(&findings, "unknown_references");
    assert_eq!(refs.len(), 1);
    assert_eq!(
        refs[0].message,
        "Task ID \"Task9\" doesn't follow expected format (T1, T17, T001, etc.)"
    );
}

#[test]
fn worker_capacity_checks() {
    let workers = test_rows(
        EntityKind::Worker,
        &[
            &[("MaxLoadPerPhase", "16"), ("AvailableSlots", "[3]"), ("Skills", "rust")],
            &[("MaxLoadPerPhase", "4"), ("AvailableSlots", "[1,2]"), ("Skills", "rust,go")],
        ],
    );
    let findings = validate(&workers);

    let overload = of_check(&findings, "overloaded_workers");
    assert_eq!(overload.len(), 1);
    assert_eq!(overload[0].message, "Worker may be overloaded with 16 tasks per phase");

    let capacity = of_check(&findings, "capacity_saturation");
    assert_eq!(capacity.len(), 1);
    assert_eq!(capacity[0].message, "Worker has very limited availability (1 slot)");

    let skills = of_check(&findings, "skill_coverage");
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].row, Some(0));
}

#[test]
fn concurrency_exceeding_duration() {
    let tasks = test_rows(
        EntityKind::Task,
        &[
            &[("MaxConcurrent", "3"), ("Duration", "2")],
            &[("MaxConcurrent", "2"), ("Duration", "2")],
        ],
    );
    let findings = validate(&tasks);
    let concurrency = of_check(&findings, "max_concurrency");
    assert_eq!(concurrency.len(), 1);
    assert_eq!(concurrency[0].message, "MaxConcurrent (3) exceeds Duration (2)");
}

#[test]
fn outcome_status_follows_counts() {
    let rows = test_rows(
        EntityKind::Client,
        &[&[
            ("ClientID", "C1"),
            ("ClientName", "Acme"),
            ("PriorityLevel", "9"),
            ("RequestedTaskIDs", "T1"),
            ("GroupTag", "A"),
        ]],
    );
    let report = FieldValidator::default().validate(&rows);
    assert_eq!(report.outcomes.len(), 10);
    assert_eq!(report.outcome("missing_columns").unwrap().status, CheckStatus::Passed);
    let range = report.outcome("out_of_range").unwrap();
    assert_eq!(range.status, CheckStatus::Warning);
    assert_eq!(range.warnings, 1);
    assert_eq!(report.error_count(), 0);
}

#[test]
fn validation_is_idempotent() {
    let rows = test_rows(
        EntityKind::Worker,
        &[
            &[("WorkerID", "W1"), ("Skills", "a,,b"), ("AvailableSlots", "x")],
            &[("WorkerID", "W1"), ("MaxLoadPerPhase", "25")],
        ],
    );
    assert_eq!(validate(&rows), validate(&rows));
}

struct Exploding;

impl Check for Exploding {
    fn id(&self) -> &'static str {
        "exploding"
    }

    fn name(&self) -> &'static str {
        "Exploding"
    }

    fn description(&self) -> &'static str {
        "Always fails"
    }

    fn run(&self, _rows: &RowSet) -> Result<Vec<Issue>, ValidateError> {
        Err(ValidateError::CheckFailed {
            check: "exploding".to_string(),
            reason: "boom".to_string(),
        })
    }
}

#[test]
fn failing_check_is_isolated() {
    let mut checks = alchemist_validate::default_checks();
    checks.insert(0, Box::new(Exploding));
    let validator = FieldValidator::with_checks(checks);

    let rows = test_rows(
        EntityKind::Client,
        &[&[("ClientID", "C1")], &[("ClientID", "C1")]],
    );
    let report = validator.validate(&rows);

    let failed = report.outcome("exploding").unwrap();
    assert_eq!(failed.status, CheckStatus::Failed);
    assert_eq!(failed.errors, 1);
    assert_eq!(failed.findings[0].field, "validator");
    assert_eq!(failed.findings[0].row, None);
    assert!(failed.findings[0].message.starts_with("Validator failed: exploding"));

    assert_eq!(report.outcome("duplicate_ids").unwrap().errors, 1);
}

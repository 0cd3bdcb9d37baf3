use alchemist_model::{CellValue, EntityKind, Finding, Severity};
use alchemist_validate::{ValidationReport, merge};

fn field_findings() -> Vec<Finding> {
    vec![
        Finding::warning(EntityKind::Client, Some(0), "PriorityLevel", "out of range")
            .with_check("out_of_range")
            .with_suggested_value(CellValue::Number(5.0)),
        Finding::error(EntityKind::Client, Some(2), "ClientID", "duplicate").with_check("duplicate_ids"),
    ]
}

fn cross_findings() -> Vec<Finding> {
    vec![
        Finding::error(EntityKind::Client, Some(0), "PriorityLevel", "bad level").with_check("priority"),
        Finding::info(EntityKind::Client, None, "PriorityLevel", "no critical clients").with_check("priority"),
        Finding::error(EntityKind::Task, Some(1), "RequiredSkills", "missing skill").with_check("task-worker"),
    ]
}

#[test]
fn merge_keeps_order_and_duplicates() {
    let merged = merge([field_findings(), cross_findings(), field_findings()]);
    assert_eq!(merged.len(), 7);
    let checks: Vec<&str> = merged.iter().map(|f| f.check.as_str()).collect();
    assert_eq!(
        checks,
        vec![
            "out_of_range",
            "duplicate_ids",
            "priority",
            "priority",
            "task-worker",
            "out_of_range",
            "duplicate_ids",
        ]
    );
}

#[test]
fn counts_by_severity() {
    let report = ValidationReport::merged([field_findings(), cross_findings()]);
    assert_eq!(report.len(), 5);
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.info_count(), 1);
    assert!(report.has_errors());
    assert!(!ValidationReport::default().has_errors());
}

#[test]
fn a_cell_can_carry_several_findings() {
    let report = ValidationReport::merged([field_findings(), cross_findings()]);
    let cell = report.at(EntityKind::Client, 0, "PriorityLevel");
    assert_eq!(cell.len(), 2);
    assert_eq!(
        report.severity_at(EntityKind::Client, 0, "PriorityLevel"),
        Some(Severity::Error)
    );
    assert_eq!(
        report.suggested_value_at(EntityKind::Client, 0, "PriorityLevel"),
        Some(&CellValue::Number(5.0))
    );
    assert_eq!(report.severity_at(EntityKind::Client, 1, "PriorityLevel"), None);
}

#[test]
fn row_sets_skip_dataset_level_findings() {
    let report = ValidationReport::merged([field_findings(), cross_findings()]);
    let rows: Vec<usize> = report.rows_with_findings(EntityKind::Client).into_iter().collect();
    assert_eq!(rows, vec![0, 2]);
    let errors: Vec<usize> = report.rows_with_errors(EntityKind::Task).into_iter().collect();
    assert_eq!(errors, vec![1]);
}

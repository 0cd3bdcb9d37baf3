//! Integration tests for the anomaly detector.

use alchemist_model::{
    AnomalyCategory, AnomalySeverity, CellValue, EntityKind, Row, RowId, RowSet,
};
use alchemist_validate::anomaly::detect;
use alchemist_validate::checks::validate;
use alchemist_validate::{AnomalyDetector, DetectorOptions};

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

fn numeric_rows(field: &str, values: &[f64]) -> RowSet {
    let mut set = RowSet::new(EntityKind::Client, vec![field.to_string()]);
    for (index, value) in values.iter().enumerate() {
        set.push_row(
            Row::new(RowId::from_first_16_bytes_of_sha256([index as u8; 32])).with(field, *value),
        );
    }
    set
}

#[test]
fn empty_rows_have_no_anomalies() {
    assert!(detect(&RowSet::empty(EntityKind::Task)).is_empty());
}

#[test]
fn duplicate_ids_suggest_a_suffix() {
    let rows = test_rows(
        EntityKind::Client,
        &[&[("ClientID", "C1")], &[("ClientID", "C2")], &[("ClientID", "C1")]],
    );
    let found = detect(&rows);
    assert_eq!(found.len(), 1);
    let dup = &found[0];
    assert_eq!(dup.id, "duplicate-ClientID-2");
    assert_eq!(dup.category, AnomalyCategory::Duplicate);
    assert_eq!(dup.severity, AnomalySeverity::High);
    assert_eq!(dup.confidence, 1.0);
    assert_eq!(
        dup.description,
        "Duplicate ClientID \"C1\" found (also appears in row 1)"
    );
    assert_eq!(dup.suggested_value, CellValue::text("C1_3"));
}

#[test]
fn strong_outlier_is_high_severity() {
    let mut values = vec![2.0; 11];
    values.push(50.0);
    let found = detect(&numeric_rows("PriorityLevel", &values));
    assert_eq!(found.len(), 1);
    let outlier = &found[0];
    assert_eq!(outlier.id, "outlier-PriorityLevel-11");
    assert_eq!(outlier.severity, AnomalySeverity::High);
    assert_eq!(outlier.original_value, CellValue::Number(50.0));
    assert_eq!(outlier.suggested_value, CellValue::Number(6.0));
    assert_eq!(
        outlier.description,
        "PriorityLevel value 50 is significantly different from the average (6.00)"
    );
}

#[test]
fn mild_outlier_is_medium_and_rounds_half_up() {
    let found = detect(&numeric_rows("Duration", &[1.0, 1.0, 1.0, 1.0, 1.0, 10.0]));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, AnomalySeverity::Medium);
    // mean is 2.5
    assert_eq!(found[0].suggested_value, CellValue::Number(3.0));
}

#[test]
fn uniform_values_have_no_outliers() {
    assert!(detect(&numeric_rows("Duration", &[3.0, 3.0, 3.0])).is_empty());
}

#[test]
fn broken_json_with_bare_quotes_is_wrapped() {
    let rows = test_rows(
        EntityKind::Client,
        &[
            &[("ClientID", "C1"), ("AttributesJSON", r#"{"vip": yes}"#)],
            &[("ClientID", "C2"), ("AttributesJSON", "free text")],
        ],
    );
    let found = detect(&rows);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "json-0");
    assert_eq!(
        found[0].suggested_value,
        CellValue::text(r#"{"message":"{\"vip\": yes}"}"#)
    );
}

#[test]
fn bare_slot_list_fix_passes_validation() {
    let rows = test_rows(
        EntityKind::Worker,
        &[&[("WorkerID", "W1"), ("AvailableSlots", "1,2,3")]],
    );
    let found = detect(&rows);
    let slots = found.iter().find(|a| a.id == "slots-0").unwrap();
    assert_eq!(slots.suggested_value, CellValue::text("[1,2,3]"));

    let fixed = rows
        .with_cell(slots.row, &slots.field, slots.suggested_value.clone())
        .unwrap();
    assert_eq!(fixed.rows[0].text("AvailableSlots"), Some("[1,2,3]"));
    let remaining: Vec<_> = validate(&fixed)
        .into_iter()
        .filter(|f| f.check == "malformed_lists")
        .collect();
    assert!(remaining.is_empty());
}

#[test]
fn unfixable_slots_keep_original_value() {
    let rows = test_rows(EntityKind::Worker, &[&[("AvailableSlots", "mornings")]]);
    let found = detect(&rows);
    assert_eq!(found[0].suggested_value, CellValue::text("mornings"));
    assert!(!found[0].is_actionable());
}

#[test]
fn skill_overload_keeps_first_four() {
    let rows = test_rows(EntityKind::Worker, &[&[("Skills", "a,b,c,d,e,f,g")]]);
    let found = detect(&rows);
    assert_eq!(found[0].id, "pattern-skills-0");
    assert_eq!(found[0].suggested_value, CellValue::text("a, b, c, d"));
}

#[test]
fn missing_names_get_placeholders() {
    let rows = test_rows(
        EntityKind::Client,
        &[
            &[("ClientID", "C1"), ("ClientName", "Acme")],
            &[("ClientID", ""), ("ClientName", "  ")],
        ],
    );
    let found = detect(&rows);
    let ids: Vec<&str> = found.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["missing-ClientID-1", "missing-ClientName-1"]);
    assert_eq!(found[0].suggested_value, CellValue::text("C2"));
    assert_eq!(found[1].suggested_value, CellValue::text("Client 2"));
}

#[test]
fn results_are_capped_in_priority_order() {
    let rows = test_rows(
        EntityKind::Worker,
        &[
            &[
                ("WorkerID", "W1"),
                ("WorkerName", "Ada"),
                ("Skills", "a,b,c,d,e,f,g"),
                ("AvailableSlots", "1,2"),
                ("AttributesJSON", "{bad}"),
                ("RequestedTaskIDs", "T1"),
            ],
            &[
                ("WorkerID", "W1"),
                ("Skills", "a,b,c,d,e,f,g"),
                ("AvailableSlots", "x"),
                ("AttributesJSON", "[oops"),
                ("RequestedTaskIDs", "T2"),
            ],
            &[("WorkerID", "W1"), ("AvailableSlots", "y")],
            &[("WorkerID", "bad")],
            &[("WorkerID", ""), ("WorkerName", "")],
            &[("WorkerID", "X9")],
        ],
    );

    let all = AnomalyDetector::default().detect_all(&rows);
    assert_eq!(all.len(), 15);

    let capped = detect(&rows);
    let ids: Vec<&str> = capped.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "duplicate-WorkerID-1",
            "duplicate-WorkerID-2",
            "json-0",
            "json-1",
            "slots-0",
            "slots-1",
            "slots-2",
            "pattern-skills-0",
            "pattern-skills-1",
            "id-format-WorkerID-3",
        ]
    );

    let wide = AnomalyDetector::new(DetectorOptions { max_anomalies: 50 }).detect(&rows);
    assert_eq!(wide.len(), 15);
    assert_eq!(wide[14].id, "missing-WorkerName-4");
}

//! Integration tests for header reconciliation.

use alchemist_map::{
    HeaderReconciler, MappingError, MappingState, ReconcileOptions, normalize, score,
};
use alchemist_model::{EntityKind, MappingOrigin};
use proptest::prelude::*;

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn canonical_headers_map_to_themselves() {
    let raw = headers(&[
        "ClientID",
        "ClientName",
        "PriorityLevel",
        "RequestedTaskIDs",
        "GroupTag",
        "AttributesJSON",
    ]);
    let result = HeaderReconciler::default().reconcile(&raw, &raw);
    assert_eq!(result.suggestions.len(), 6);
    for header in &raw {
        assert_eq!(result.raw_for(header), Some(header.as_str()));
        assert_eq!(result.confidence(header), Some(1.0));
    }
    assert!(result.unmapped.is_empty());
    assert!(result.unused.is_empty());
}

#[test]
fn messy_headers_are_reconciled() {
    let raw = headers(&["worker_id", "Worker Name", "skills", "slots", "max load per phase"]);
    let mapping = HeaderReconciler::default().reconcile_kind(EntityKind::Worker, &raw);
    assert_eq!(mapping.raw_for("WorkerID"), Some("worker_id"));
    assert_eq!(mapping.raw_for("WorkerName"), Some("Worker Name"));
    assert_eq!(mapping.raw_for("Skills"), Some("skills"));
    assert_eq!(mapping.raw_for("MaxLoadPerPhase"), Some("max load per phase"));
    assert_eq!(mapping.confidence("AvailableSlots"), Some(0.8));
}

#[test]
fn low_scores_stay_unmapped() {
    let raw = headers(&["zzz"]);
    let strict = HeaderReconciler::new(ReconcileOptions {
        min_confidence: 0.9,
    });
    let result = strict.reconcile(&raw, &["TaskID"]);
    assert_eq!(result.unmapped, vec!["TaskID".to_string()]);
    assert_eq!(result.unused, vec!["zzz".to_string()]);
}

#[test]
fn ties_pick_first_source_header() {
    let raw = headers(&["Task ID", "task_id"]);
    let result = HeaderReconciler::default().reconcile(&raw, &["TaskID"]);
    assert_eq!(result.raw_for("TaskID"), Some("Task ID"));
}

#[test]
fn two_fields_may_share_a_column() {
    let raw = headers(&["Task"]);
    let mapping = HeaderReconciler::default().reconcile_kind(EntityKind::Task, &raw);
    assert_eq!(mapping.raw_for("TaskID"), Some("Task"));
    assert_eq!(mapping.raw_for("TaskName"), Some("Task"));
    assert!(mapping.shared_columns().contains_key("Task"));
}

#[test]
fn manual_override_replaces_and_deletes() {
    let raw = headers(&["id", "name", "level"]);
    let mut state = MappingState::from_headers(EntityKind::Client, &raw, ReconcileOptions::default());

    state.set_mapping("PriorityLevel", Some("level")).unwrap();
    let entry = state.mapping().get("PriorityLevel").unwrap();
    assert_eq!(entry.raw, "level");
    assert_eq!(entry.origin, MappingOrigin::Manual);
    assert_eq!(entry.confidence, 1.0);

    state.set_mapping("PriorityLevel", None).unwrap();
    assert!(state.mapping().get("PriorityLevel").is_none());

    assert_eq!(
        state.set_mapping("Budget", Some("id")),
        Err(MappingError::FieldNotFound {
            entity: EntityKind::Client,
            field: "Budget".to_string()
        })
    );
    assert_eq!(
        state.set_mapping("ClientID", Some("missing")),
        Err(MappingError::ColumnNotFound("missing".to_string()))
    );
}

#[test]
fn summary_counts_required_fields() {
    let raw = headers(&["TaskID", "TaskName", "Duration", "RequiredSkills"]);
    let state = MappingState::from_headers(EntityKind::Task, &raw, ReconcileOptions::default());
    let summary = state.summary();
    assert_eq!(summary.required_total, 4);
    assert_eq!(summary.required_mapped, 4);
}

proptest! {
    #[test]
    fn score_is_symmetric(a in "[A-Za-z_ ]{0,12}", b in "[A-Za-z_ ]{0,12}") {
        prop_assert_eq!(score(&a, &b), score(&b, &a));
    }

    #[test]
    fn score_is_bounded(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let s = score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn identical_names_score_one(a in "[A-Za-z][A-Za-z0-9]{0,15}") {
        prop_assert_eq!(score(&a, &a), 1.0);
        prop_assert_eq!(score(&a, &normalize(&a)), 1.0);
    }
}

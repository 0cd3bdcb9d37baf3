use alchemist_core::{CoreError, SearchRule, Session, SessionOptions};
use alchemist_ingest::{parse_csv, sample_dataset};
use alchemist_model::{CellValue, EntityKind, MappingOrigin, RowSet};
use alchemist_validate::CheckStatus;

fn csv_rows(kind: EntityKind, text: &str) -> RowSet {
    parse_csv(kind, text.as_bytes(), "test.csv").unwrap()
}

fn sample_session() -> Session {
    let sample = sample_dataset().unwrap();
    let mut session = Session::default();
    session.load(EntityKind::Client, sample.clients).unwrap();
    session.load(EntityKind::Worker, sample.workers).unwrap();
    session.load(EntityKind::Task, sample.tasks).unwrap();
    session
}

#[test]
fn load_reconciles_headers() {
    let mut session = Session::default();
    let raw = csv_rows(
        EntityKind::Client,
        "client_id,Client Title\nC1,Acme\nC2,Globex\n",
    );
    let mapping = session.load(EntityKind::Client, raw).unwrap();
    assert_eq!(mapping.mapping().raw_for("ClientID"), Some("client_id"));
    assert_eq!(mapping.mapping().raw_for("ClientName"), Some("Client Title"));
    assert_eq!(mapping.mapping().raw_for("GroupTag"), None);

    let rows = session.rows(EntityKind::Client).unwrap();
    assert_eq!(rows.columns, vec!["ClientID", "ClientName"]);
    assert_eq!(rows.rows[1].text("ClientName"), Some("Globex"));
    assert_eq!(
        rows.rows[0].id,
        session.entity(EntityKind::Client).unwrap().raw().rows[0].id
    );
}

#[test]
fn trailing_header_comma_leaves_group_tag_missing() {
    let mut session = Session::default();
    let raw = csv_rows(
        EntityKind::Client,
        "ClientID,ClientName,PriorityLevel,RequestedTaskIDs,\nC1,Acme,3,T1,\n",
    );
    let mapping = session.load(EntityKind::Client, raw).unwrap();
    assert_eq!(mapping.mapping().raw_for("GroupTag"), None);

    let report = session.validate(EntityKind::Client).unwrap();
    let missing = report.outcome("missing_columns").unwrap();
    assert_eq!(missing.status, CheckStatus::Failed);
    assert_eq!(missing.findings.len(), 1);
    assert_eq!(missing.findings[0].field, "GroupTag");
}

#[test]
fn load_rejects_wrong_kind() {
    let mut session = Session::default();
    let err = session
        .load(EntityKind::Worker, RowSet::empty(EntityKind::Task))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::KindMismatch {
            expected: EntityKind::Worker,
            found: EntityKind::Task
        }
    ));
    assert!(matches!(
        session.rows(EntityKind::Worker),
        Err(CoreError::NotLoaded(EntityKind::Worker))
    ));
}

#[test]
fn manual_mapping_overrides_and_keeps_edits() {
    let mut session = Session::default();
    session
        .load(
            EntityKind::Client,
            csv_rows(EntityKind::Client, "ClientID,Client Title\nC1,Acme\n"),
        )
        .unwrap();

    let rows = session
        .write_cell(EntityKind::Client, 0, "ClientName", CellValue::text("Acme Corp"))
        .unwrap();
    assert_eq!(rows.rows[0].text("ClientName"), Some("Acme Corp"));
    let state = session.entity(EntityKind::Client).unwrap();
    assert_eq!(state.raw().rows[0].text("Client Title"), Some("Acme Corp"));

    session
        .set_mapping(EntityKind::Client, "ClientName", None)
        .unwrap();
    let rows = session.rows(EntityKind::Client).unwrap();
    assert!(!rows.rows[0].has("ClientName"));
    assert_eq!(rows.rows[0].text("Client Title"), Some("Acme Corp"));

    session
        .set_mapping(EntityKind::Client, "ClientName", Some("Client Title"))
        .unwrap();
    let state = session.entity(EntityKind::Client).unwrap();
    assert_eq!(
        state.mapping().mapping().get("ClientName").map(|m| m.origin),
        Some(MappingOrigin::Manual)
    );
    assert_eq!(
        state.rows().rows[0].text("ClientName"),
        Some("Acme Corp")
    );

    let err = session
        .set_mapping(EntityKind::Client, "ClientName", Some("Nope"))
        .unwrap_err();
    assert!(matches!(err, CoreError::Mapping(_)));
}

#[test]
fn writing_an_unmapped_field_adds_a_source_column() {
    let mut session = Session::default();
    session
        .load(
            EntityKind::Client,
            csv_rows(EntityKind::Client, "ClientID\nC1\n"),
        )
        .unwrap();
    let before = session.entity(EntityKind::Client).unwrap().version();
    let rows = session
        .write_cell(EntityKind::Client, 0, "GroupTag", CellValue::text("GroupA"))
        .unwrap();
    assert_eq!(rows.rows[0].text("GroupTag"), Some("GroupA"));
    assert!(session.entity(EntityKind::Client).unwrap().version() > before);

    // the new column is visible to manual mapping
    session
        .set_mapping(EntityKind::Client, "GroupTag", Some("GroupTag"))
        .unwrap();

    let err = session
        .write_cell(EntityKind::Client, 5, "GroupTag", CellValue::Missing)
        .unwrap_err();
    assert!(matches!(err, CoreError::Model(_)));
}

#[test]
fn validate_all_merges_field_and_cross_entity_findings() {
    let mut session = sample_session();
    let report = session.validate_all().unwrap();
    assert!(report.findings.iter().any(|f| {
        f.check == "task-worker"
            && f.message
                == "Task \"Website Redesign\" requires skills not available in worker pool: CSS"
    }));
    assert!(!report.findings.iter().any(|f| f.check == "client-task"));

    // field findings come before cross-entity findings
    let first_cross = report
        .findings
        .iter()
        .position(|f| f.check.contains('-'))
        .unwrap();
    assert!(
        report.findings[first_cross..]
            .iter()
            .all(|f| f.check.contains('-') || f.check == "priority" || f.check == "coverage")
    );
    assert_eq!(session.field_reports().len(), 3);
}

#[test]
fn validate_all_with_one_kind_loaded() {
    let mut session = Session::default();
    session
        .load(
            EntityKind::Client,
            csv_rows(
                EntityKind::Client,
                "ClientID,RequestedTaskIDs\nC1,\"T1,T99\"\n",
            ),
        )
        .unwrap();
    let report = session.validate_all().unwrap();
    let unknown: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.check == "client-task" && f.is_error())
        .collect();
    assert_eq!(unknown.len(), 2);
    assert_eq!(session.field_reports().len(), 1);
}

#[test]
fn apply_suggestion_writes_the_suggested_value() {
    let mut session = Session::default();
    session
        .load(
            EntityKind::Client,
            csv_rows(
                EntityKind::Client,
                "ClientID,ClientName,PriorityLevel\nC1,Acme,7\nC2,Globex,3\n",
            ),
        )
        .unwrap();
    session.validate_all().unwrap();
    let findings_before = session.report().len();

    let rows = session
        .apply_suggestion(EntityKind::Client, 0, "PriorityLevel")
        .unwrap();
    assert_eq!(rows.rows[0].get("PriorityLevel"), Some(&CellValue::Number(5.0)));
    // no re-validation until asked
    assert_eq!(session.report().len(), findings_before);

    let err = session
        .apply_suggestion(EntityKind::Client, 1, "PriorityLevel")
        .unwrap_err();
    assert!(matches!(err, CoreError::NoSuggestion { row: 1, .. }));

    session.validate_all().unwrap();
    assert!(
        session
            .report()
            .at(EntityKind::Client, 0, "PriorityLevel")
            .iter()
            .all(|f| f.check != "out_of_range")
    );
}

#[test]
fn apply_anomaly_fixes_bare_slot_list() {
    let mut session = Session::default();
    session
        .load(
            EntityKind::Worker,
            csv_rows(EntityKind::Worker, "WorkerID,available slots\nW1,\"1,2,3\"\n"),
        )
        .unwrap();
    let anomalies = session.detect_anomalies(EntityKind::Worker).unwrap();
    let slots = anomalies.iter().find(|a| a.id == "slots-0").unwrap();

    let rows = session.apply_anomaly(EntityKind::Worker, slots).unwrap();
    assert_eq!(rows.rows[0].text("AvailableSlots"), Some("[1,2,3]"));
    let raw = session.entity(EntityKind::Worker).unwrap().raw();
    assert_eq!(raw.rows[0].text("available slots"), Some("[1,2,3]"));

    let report = session.validate(EntityKind::Worker).unwrap();
    assert!(report.outcome("malformed_lists").unwrap().findings.is_empty());
    assert!(
        session
            .detect_anomalies(EntityKind::Worker)
            .unwrap()
            .iter()
            .all(|a| a.id != "slots-0")
    );

    let err = session.apply_anomaly(EntityKind::Client, slots).unwrap_err();
    assert!(matches!(err, CoreError::KindMismatch { .. }));
}

#[test]
fn anomaly_cap_follows_options() {
    let mut text = String::from("ClientID\n");
    for _ in 0..6 {
        text.push_str("C1\n");
    }
    let mut options = SessionOptions::default();
    options.detector.max_anomalies = 3;
    let mut session = Session::new(options);
    session
        .load(EntityKind::Client, csv_rows(EntityKind::Client, &text))
        .unwrap();
    let anomalies = session.detect_anomalies(EntityKind::Client).unwrap();
    assert_eq!(anomalies.len(), 3);
    assert_eq!(anomalies[0].id, "duplicate-ClientID-1");
}

#[test]
fn keyword_search_dispatches_by_rule() {
    let session = sample_session();

    let urgent = session.search(EntityKind::Client, "Urgent clients", false).unwrap();
    assert_eq!(urgent.rule, SearchRule::HighPriority);
    assert_eq!(urgent.indices(), vec![2, 3]);
    assert_eq!(urgent.description, "Showing clients with priority level 4-5");

    let js = session.search(EntityKind::Worker, "javascript devs", false).unwrap();
    assert_eq!(js.indices(), vec![0]);

    let ui = session.search(EntityKind::Task, "ui work", false).unwrap();
    assert_eq!(ui.rule, SearchRule::Frontend);
    assert_eq!(ui.indices(), vec![0, 3]);

    let busy = session.search(EntityKind::Worker, "busy", false).unwrap();
    assert_eq!(busy.indices(), vec![3]);

    let text = session.search(EntityKind::Client, "  STARK ", false).unwrap();
    assert_eq!(text.rule, SearchRule::Text);
    assert_eq!(text.description, "Searching for: stark");
    assert_eq!(text.indices(), vec![4]);

    let all = session.search(EntityKind::Task, "", false).unwrap();
    assert_eq!(all.rule, SearchRule::All);
    assert_eq!(all.hits.len(), 5);
}

#[test]
fn search_hits_carry_row_ids() {
    let session = sample_session();
    let rows = session.rows(EntityKind::Client).unwrap();
    let hits = session.search(EntityKind::Client, "globex", false).unwrap().hits;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, rows.rows[1].id);
    assert_eq!(rows.position(hits[0].id), Some(1));
}

#[test]
fn error_search_uses_last_report() {
    let mut session = sample_session();
    assert!(
        session
            .search(EntityKind::Task, "missing", false)
            .unwrap()
            .hits
            .is_empty()
    );

    session.validate_all().unwrap();
    let expected: Vec<usize> = session
        .report()
        .rows_with_errors(EntityKind::Task)
        .into_iter()
        .collect();
    let found = session.search(EntityKind::Task, "show errors", false).unwrap();
    assert_eq!(found.rule, SearchRule::WithErrors);
    assert_eq!(found.indices(), expected);
    assert!(expected.contains(&0));

    let flagged: Vec<usize> = session
        .report()
        .rows_with_findings(EntityKind::Task)
        .into_iter()
        .collect();
    let only = session.search(EntityKind::Task, "", true).unwrap();
    assert_eq!(only.indices(), flagged);
}

use alchemist_model::{EntityKind, Finding, Row, RowSet, Severity};
use serde_json::Value;

use super::{Pass, finding};
use crate::util::{display_name, invalid_phases, plural};

const OVERLOAD_THRESHOLD: f64 = 15.0;

pub(super) fn check(workers: &RowSet) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (index, worker) in workers.iter() {
        let name = display_name(worker, EntityKind::Worker, index);
        check_slots(worker, index, &name, &mut findings);

        if let Some(load) = worker.number("MaxLoadPerPhase").map(f64::trunc)
            && load > OVERLOAD_THRESHOLD
        {
            findings.push(finding(
                Pass::WorkerPhase,
                Severity::Warning,
                EntityKind::Worker,
                Some(index),
                "MaxLoadPerPhase",
                format!("Worker \"{name}\" may be overloaded with {load} tasks per phase"),
                "Consider reducing load or adding more workers",
            ));
        }
    }
    findings
}

fn check_slots(worker: &Row, index: usize, name: &str, findings: &mut Vec<Finding>) {
    let Some(raw) = worker.value("AvailableSlots") else {
        return;
    };
    let slot_finding = |severity, message: String, suggestion: &str| {
        finding(
            Pass::WorkerPhase,
            severity,
            EntityKind::Worker,
            Some(index),
            "AvailableSlots",
            message,
            suggestion,
        )
    };

    let slots = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(slots)) => slots,
        Ok(_) => {
            findings.push(slot_finding(
                Severity::Error,
                format!("Worker \"{name}\" has invalid AvailableSlots format"),
                "Use array format: [1,2,3,4,5]",
            ));
            return;
        }
        Err(_) => {
            findings.push(slot_finding(
                Severity::Error,
                format!("Worker \"{name}\" has unparseable AvailableSlots"),
                "Fix JSON format: [1,2,3,4,5]",
            ));
            return;
        }
    };

    let invalid = invalid_phases(&slots);
    if !invalid.is_empty() {
        findings.push(slot_finding(
            Severity::Warning,
            format!(
                "Worker \"{name}\" has invalid phase numbers: {}",
                invalid.join(", ")
            ),
            "Use phase numbers between 1-10",
        ));
    }
    if slots.len() < 2 {
        findings.push(slot_finding(
            Severity::Warning,
            format!(
                "Worker \"{name}\" has very limited availability ({})",
                plural(slots.len(), "phase")
            ),
            "Consider expanding worker availability or adjusting workload",
        ));
    }
}

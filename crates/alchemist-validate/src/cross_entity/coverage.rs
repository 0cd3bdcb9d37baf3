use alchemist_model::{EntityKind, Finding, Row, RowSet, Severity};
use serde_json::Value;

use super::{Pass, finding};
use crate::util::{PHASE_RANGE, display_name, invalid_phases};

pub(super) fn check(tasks: &RowSet) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (index, task) in tasks.iter() {
        let Some(cell) = task.get("PreferredPhases").filter(|c| !c.is_blank()) else {
            continue;
        };
        let phases = cell.render();
        let name = display_name(task, EntityKind::Task, index);
        let emit = |severity, message: String, suggestion: String| {
            finding(
                Pass::Coverage,
                severity,
                EntityKind::Task,
                Some(index),
                "PreferredPhases",
                message,
                suggestion,
            )
        };

        if let Some(caps) = PHASE_RANGE.captures(&phases) {
            check_range(task, &phases, &caps[1], &caps[2], &name, &emit, &mut findings);
        } else if phases.starts_with('[') && phases.ends_with(']') {
            match serde_json::from_str::<Value>(&phases) {
                Ok(Value::Array(items)) => {
                    let invalid = invalid_phases(&items);
                    if !invalid.is_empty() {
                        findings.push(emit(
                            Severity::Warning,
                            format!(
                                "Task \"{name}\" has invalid phase numbers: {}",
                                invalid.join(", ")
                            ),
                            "Use phase numbers between 1-10".to_string(),
                        ));
                    }
                }
                Ok(_) => findings.push(emit(
                    Severity::Error,
                    format!("Task \"{name}\" has invalid phase array format"),
                    "Use array format: [1,2,3] or range format: \"1-3\"".to_string(),
                )),
                Err(_) => findings.push(emit(
                    Severity::Error,
                    format!("Task \"{name}\" has unparseable PreferredPhases"),
                    "Use valid format: [1,2,3] or \"1-3\"".to_string(),
                )),
            }
        } else {
            findings.push(emit(
                Severity::Error,
                format!("Task \"{name}\" has invalid PreferredPhases format: {phases}"),
                "Use range format \"1-3\" or array format [1,2,3]".to_string(),
            ));
        }
    }
    findings
}

fn check_range(
    task: &Row,
    phases: &str,
    start: &str,
    end: &str,
    name: &str,
    emit: &dyn Fn(Severity, String, String) -> Finding,
    findings: &mut Vec<Finding>,
) {
    // Digit-only captures always parse; overflow saturates to infinity.
    let (Ok(start), Ok(end)) = (start.parse::<f64>(), end.parse::<f64>()) else {
        return;
    };
    if start > end {
        findings.push(emit(
            Severity::Error,
            format!("Task \"{name}\" has invalid phase range: {phases} (start > end)"),
            format!("Use valid range format like \"1-{end}\" or \"{end}-{start}\""),
        ));
    }
    let span = end - start + 1.0;
    if let Some(duration) = task.number("Duration").map(f64::trunc)
        && span < duration
    {
        let shown = task.value("Duration").unwrap_or_default();
        findings.push(emit(
            Severity::Warning,
            format!("Task \"{name}\" preferred phases ({span}) less than duration ({shown})"),
            format!("Extend phase range to accommodate duration of {shown} phases"),
        ));
    }
}

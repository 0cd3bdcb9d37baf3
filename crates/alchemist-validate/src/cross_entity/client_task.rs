use std::collections::HashSet;

use alchemist_model::{EntityKind, Finding, RowSet, Severity};

use super::{Pass, finding};
use crate::util::{display_name, list_tokens};

/// Requests above this count are flagged as a likely overload.
const MAX_REQUESTS: usize = 10;

pub(super) fn check(clients: &RowSet, tasks: &RowSet) -> Vec<Finding> {
    let known: HashSet<String> = tasks.rows.iter().filter_map(|t| t.value("TaskID")).collect();
    let mut findings = Vec::new();

    for (index, client) in clients.iter() {
        let Some(cell) = client.get("RequestedTaskIDs") else {
            continue;
        };
        let name = display_name(client, EntityKind::Client, index);
        let requested = cell.render();
        let tokens = list_tokens(&requested);

        for task_id in &tokens {
            if !known.contains(*task_id) {
                findings.push(
                    finding(
                        Pass::ClientTask,
                        Severity::Error,
                        EntityKind::Client,
                        Some(index),
                        "RequestedTaskIDs",
                        format!("Client \"{name}\" requests non-existent task \"{task_id}\""),
                        format!("Remove \"{task_id}\" or ensure task exists in tasks dataset"),
                    )
                    .with_related(&[EntityKind::Task]),
                );
            }
        }

        if tokens.is_empty() {
            findings.push(finding(
                Pass::ClientTask,
                Severity::Warning,
                EntityKind::Client,
                Some(index),
                "RequestedTaskIDs",
                format!("Client \"{name}\" has no requested tasks"),
                "Assign at least one task to this client",
            ));
        }

        if tokens.len() > MAX_REQUESTS {
            findings.push(finding(
                Pass::ClientTask,
                Severity::Warning,
                EntityKind::Client,
                Some(index),
                "RequestedTaskIDs",
                format!(
                    "Client \"{name}\" requests {} tasks (potentially excessive)",
                    tokens.len()
                ),
                "Consider splitting into multiple phases or clients",
            ));
        }
    }

    findings
}

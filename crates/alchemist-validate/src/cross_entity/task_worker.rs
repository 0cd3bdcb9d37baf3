use std::collections::HashSet;

use alchemist_model::{EntityKind, Finding, RowSet, Severity};

use super::{Pass, finding};
use crate::util::{display_name, list_tokens};

/// More workers than this sharing a required skill is noted as redundancy.
const REDUNDANCY_THRESHOLD: usize = 5;

pub(super) fn check(tasks: &RowSet, workers: &RowSet) -> Vec<Finding> {
    let worker_skills: Vec<HashSet<String>> = workers
        .rows
        .iter()
        .map(|w| {
            w.value("Skills")
                .map(|s| list_tokens(&s).into_iter().map(str::to_string).collect())
                .unwrap_or_default()
        })
        .collect();
    let pool: HashSet<&str> = worker_skills
        .iter()
        .flat_map(|skills| skills.iter().map(String::as_str))
        .collect();

    let mut findings = Vec::new();
    for (index, task) in tasks.iter() {
        let Some(required) = task.value("RequiredSkills") else {
            continue;
        };
        let name = display_name(task, EntityKind::Task, index);
        let required = list_tokens(&required);

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|skill| !pool.contains(skill))
            .collect();
        if !missing.is_empty() {
            let list = missing.join(", ");
            findings.push(
                finding(
                    Pass::TaskWorker,
                    Severity::Error,
                    EntityKind::Task,
                    Some(index),
                    "RequiredSkills",
                    format!("Task \"{name}\" requires skills not available in worker pool: {list}"),
                    format!("Add workers with skills: {list} or modify task requirements"),
                )
                .with_related(&[EntityKind::Worker]),
            );
        }

        for skill in &required {
            let holders = worker_skills.iter().filter(|s| s.contains(*skill)).count();
            if holders > REDUNDANCY_THRESHOLD {
                findings.push(finding(
                    Pass::TaskWorker,
                    Severity::Info,
                    EntityKind::Task,
                    Some(index),
                    "RequiredSkills",
                    format!("Skill \"{skill}\" is available in {holders} workers (high redundancy)"),
                    "Consider diversifying worker skills or optimizing assignments",
                ));
            }
        }
    }
    findings
}

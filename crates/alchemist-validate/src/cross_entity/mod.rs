//! Relationship checks spanning clients, workers and tasks.
//!
//! Five independent passes run in a fixed order and their findings are
//! concatenated without deduplication.

mod client_task;
mod coverage;
mod priority;
mod task_worker;
mod worker_phase;

use alchemist_model::{EntityKind, Finding, RowSet, Severity};
use serde::Serialize;
use tracing::{debug, info_span};

use crate::error::ValidateError;

/// Cross-entity pass, used as the finding's check id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pass {
    /// Requested tasks exist
    ClientTask,
    /// Required skills are held by some worker
    TaskWorker,
    /// Worker slots and load are sane
    WorkerPhase,
    /// Client priority distribution
    Priority,
    /// Preferred phase windows fit the task
    Coverage,
}

impl Pass {
    pub fn all() -> &'static [Pass] {
        &[
            Self::ClientTask,
            Self::TaskWorker,
            Self::WorkerPhase,
            Self::Priority,
            Self::Coverage,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ClientTask => "client-task",
            Self::TaskWorker => "task-worker",
            Self::WorkerPhase => "worker-phase",
            Self::Priority => "priority",
            Self::Coverage => "coverage",
        }
    }
}

/// Borrowed snapshot of all three entity collections.
#[derive(Debug, Clone, Copy)]
pub struct CrossEntityInput<'a> {
    pub clients: &'a RowSet,
    pub workers: &'a RowSet,
    pub tasks: &'a RowSet,
}

impl<'a> CrossEntityInput<'a> {
    pub fn new(
        clients: &'a RowSet,
        workers: &'a RowSet,
        tasks: &'a RowSet,
    ) -> Result<Self, ValidateError> {
        for (set, expected) in [
            (clients, EntityKind::Client),
            (workers, EntityKind::Worker),
            (tasks, EntityKind::Task),
        ] {
            if set.kind != expected {
                return Err(ValidateError::KindMismatch {
                    expected,
                    found: set.kind,
                });
            }
        }
        Ok(Self {
            clients,
            workers,
            tasks,
        })
    }
}

/// Run all five passes in order.
pub fn validate_cross_entity(input: CrossEntityInput<'_>) -> Vec<Finding> {
    let span = info_span!(
        "cross_entity",
        clients = input.clients.len(),
        workers = input.workers.len(),
        tasks = input.tasks.len()
    );
    let _guard = span.enter();

    let mut findings = Vec::new();
    for pass in Pass::all() {
        let found = match pass {
            Pass::ClientTask => client_task::check(input.clients, input.tasks),
            Pass::TaskWorker => task_worker::check(input.tasks, input.workers),
            Pass::WorkerPhase => worker_phase::check(input.workers),
            Pass::Priority => priority::check(input.clients),
            Pass::Coverage => coverage::check(input.tasks),
        };
        debug!(pass = pass.label(), finding_count = found.len(), "pass complete");
        findings.extend(found);
    }
    findings
}

/// Validate three collections, checking each one's entity kind first.
pub fn validate(
    clients: &RowSet,
    workers: &RowSet,
    tasks: &RowSet,
) -> Result<Vec<Finding>, ValidateError> {
    Ok(validate_cross_entity(CrossEntityInput::new(
        clients, workers, tasks,
    )?))
}

fn finding(
    pass: Pass,
    severity: Severity,
    entity: EntityKind,
    row: Option<usize>,
    field: &str,
    message: String,
    suggestion: impl Into<String>,
) -> Finding {
    Finding::new(severity, entity, row, field, message)
        .with_check(pass.label())
        .with_suggestion(suggestion)
}

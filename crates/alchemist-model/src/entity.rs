//! Entity kinds and their canonical schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

const CLIENT_FIELDS: &[&str] = &[
    "ClientID",
    "ClientName",
    "PriorityLevel",
    "RequestedTaskIDs",
    "GroupTag",
    "AttributesJSON",
];

const WORKER_FIELDS: &[&str] = &[
    "WorkerID",
    "WorkerName",
    "Skills",
    "AvailableSlots",
    "MaxLoadPerPhase",
    "WorkerGroup",
    "QualificationLevel",
];

const TASK_FIELDS: &[&str] = &[
    "TaskID",
    "TaskName",
    "Category",
    "Duration",
    "RequiredSkills",
    "PreferredPhases",
    "MaxConcurrent",
];

/// The three record families handled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Worker,
    Task,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[Self::Client, Self::Worker, Self::Task]
    }

    /// Canonical field names in schema order.
    pub fn canonical_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Client => CLIENT_FIELDS,
            Self::Worker => WORKER_FIELDS,
            Self::Task => TASK_FIELDS,
        }
    }

    /// Columns that must be present for a dataset of this kind.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Client => &CLIENT_FIELDS[..5],
            Self::Worker => &WORKER_FIELDS[..5],
            Self::Task => &["TaskID", "TaskName", "Duration", "RequiredSkills"],
        }
    }

    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Client => "ClientID",
            Self::Worker => "WorkerID",
            Self::Task => "TaskID",
        }
    }

    pub fn name_field(&self) -> &'static str {
        match self {
            Self::Client => "ClientName",
            Self::Worker => "WorkerName",
            Self::Task => "TaskName",
        }
    }

    /// Expected leading letter of this kind's identifiers (`C`, `W`, `T`).
    pub fn id_prefix(&self) -> char {
        match self {
            Self::Client => 'C',
            Self::Worker => 'W',
            Self::Task => 'T',
        }
    }

    /// Comma-joined list fields owned by this kind.
    pub fn list_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Client => &["RequestedTaskIDs"],
            Self::Worker => &["Skills"],
            Self::Task => &["RequiredSkills"],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.canonical_fields().contains(&field)
    }

    /// Lowercase singular label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Worker => "worker",
            Self::Task => "task",
        }
    }

    /// Plural label used for dataset names and file stems.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Worker => "workers",
            Self::Task => "tasks",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" | "clients" => Ok(Self::Client),
            "worker" | "workers" => Ok(Self::Worker),
            "task" | "tasks" => Ok(Self::Task),
            _ => Err(ModelError::UnknownEntityKind(s.to_string())),
        }
    }
}

use thiserror::Error;

/// Failure while executing a check, as opposed to a finding about the data.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("check '{check}' failed: {reason}")]
    CheckFailed { check: String, reason: String },
    #[error("expected {expected} rows, got {found} rows")]
    KindMismatch {
        expected: alchemist_model::EntityKind,
        found: alchemist_model::EntityKind,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] alchemist_model::ModelError),
}

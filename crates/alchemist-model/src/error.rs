use thiserror::Error;

use crate::EntityKind;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
    #[error("row {row} is out of range for {entity} ({len} rows)")]
    RowOutOfRange {
        entity: EntityKind,
        row: usize,
        len: usize,
    },
    #[error("field '{field}' is not part of the {entity} schema")]
    UnknownField { entity: EntityKind, field: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

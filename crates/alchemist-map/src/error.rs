//! Error types for mapping operations.

use thiserror::Error;

use alchemist_model::EntityKind;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field is not part of the entity's canonical schema.
    #[error("field '{field}' is not a canonical {entity} field")]
    FieldNotFound { entity: EntityKind, field: String },
    /// Column not found in source data.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
}

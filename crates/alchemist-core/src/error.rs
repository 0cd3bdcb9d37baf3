use alchemist_map::MappingError;
use alchemist_model::{EntityKind, ModelError};
use alchemist_validate::ValidateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no {} data loaded", .0.plural())]
    NotLoaded(EntityKind),

    #[error("expected {expected} rows, got {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("no suggested value for {entity} row {row} field {field}")]
    NoSuggestion {
        entity: EntityKind,
        row: usize,
        field: String,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

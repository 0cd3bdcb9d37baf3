//! Header reconciliation for client, worker and task uploads.
//!
//! Source files rarely use the canonical column names. This crate scores
//! every source header against every canonical field, proposes a mapping,
//! and tracks reviewer overrides on top of it.

#![deny(unsafe_code)]

mod engine;
mod error;
mod score;
mod state;

pub use engine::{HeaderReconciler, ReconcileOptions, ReconcileResult, Suggestion};
pub use error::MappingError;
pub use score::{normalize, score};
pub use state::{MappingState, MappingSummary};

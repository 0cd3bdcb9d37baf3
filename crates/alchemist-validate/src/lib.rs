//! Validation engine for client, worker and task data.
//!
//! Three independent validator groups read a snapshot of the rows and never
//! write to it:
//!
//! - [`checks`]: per-entity field checks with failure isolation
//! - [`anomaly`]: ranked anomalies with concrete replacement values
//! - [`cross_entity`]: referential and capacity checks across all three kinds
//!
//! [`ValidationReport`] merges their output for display and export.

#![deny(unsafe_code)]

pub mod anomaly;
pub mod checks;
pub mod cross_entity;
mod error;
mod issue;
mod report;
pub mod util;

pub use anomaly::{AnomalyDetector, DetectorOptions};
pub use checks::{
    Check, CheckOutcome, CheckStatus, FieldReport, FieldValidator, default_checks,
};
pub use cross_entity::{CrossEntityInput, Pass};
pub use error::ValidateError;
pub use issue::Issue;
pub use report::{ValidationReport, merge};

//! Working-session layer over the mapping and validation crates.
//!
//! A [`Session`] holds the loaded rows per entity kind, their header
//! mappings and the last validation report. Suggestions and anomaly fixes
//! are applied through it, and [`search_rows`] filters rows by keyword.

#![deny(unsafe_code)]

mod error;
mod search;
mod session;

pub use error::{CoreError, Result};
pub use search::{SearchHit, SearchResult, SearchRule, search_rows};
pub use session::{EntityState, Session, SessionOptions};

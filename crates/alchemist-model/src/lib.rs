#![deny(unsafe_code)]

pub mod anomaly;
pub mod entity;
pub mod error;
pub mod finding;
pub mod ids;
pub mod mapping;
pub mod rules;
pub mod table;

pub use anomaly::{Anomaly, AnomalyCategory, AnomalySeverity};
pub use entity::EntityKind;
pub use error::{ModelError, Result};
pub use finding::{Finding, Severity};
pub use ids::RowId;
pub use mapping::{HeaderMapping, MappedColumn, MappingOrigin};
pub use rules::RulesConfig;
pub use table::{CellValue, Row, RowSet};

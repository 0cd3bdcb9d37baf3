//! CLI library components for the data alchemist.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;

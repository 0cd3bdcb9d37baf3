//! Rules and weights configuration passed through to the scheduler.
//!
//! The engine never interprets this document; it only reads and writes it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Value>,
    #[serde(default)]
    pub weights: Map<String, Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Any additional top-level keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RulesConfig {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
            && self.weights.is_empty()
            && self.metadata.is_empty()
            && self.extra.is_empty()
    }
}

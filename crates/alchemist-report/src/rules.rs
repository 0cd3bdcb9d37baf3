use std::path::Path;

use alchemist_model::RulesConfig;

use crate::common::write_file;
use crate::error::{ReportError, Result};

pub fn read_rules(path: &Path) -> Result<RulesConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

pub fn write_rules(path: &Path, rules: &RulesConfig) -> Result<()> {
    let text = serde_json::to_string_pretty(rules)?;
    write_file(path, text.as_bytes())
}

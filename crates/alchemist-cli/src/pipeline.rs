//! Load-and-run steps shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use alchemist_core::{SearchResult, Session, SessionOptions};
use alchemist_ingest::read_rows;
use alchemist_model::{EntityKind, RowSet};

/// Read a file into the session and reconcile its headers.
pub fn load_into(session: &mut Session, kind: EntityKind, path: &Path) -> Result<()> {
    let rows = read_rows(kind, path).with_context(|| format!("load {}", path.display()))?;
    let state = session
        .load(kind, rows)
        .with_context(|| format!("reconcile {}", path.display()))?;
    let summary = state.summary();
    if summary.required_mapped < summary.required_total {
        warn!(
            entity = %kind,
            mapped = summary.required_mapped,
            required = summary.required_total,
            "required fields left unmapped"
        );
    }
    Ok(())
}

/// Load one file, validate it and run a keyword search over its canonical rows.
///
/// Validation always runs first so error-based queries see the findings.
pub fn search_file(
    options: SessionOptions,
    kind: EntityKind,
    path: &Path,
    query: &str,
    errors_only: bool,
) -> Result<(RowSet, SearchResult)> {
    let mut session = Session::new(options);
    load_into(&mut session, kind, path)?;
    session.validate_all().context("validate")?;
    let result = session.search(kind, query, errors_only)?;
    Ok((session.rows(kind)?, result))
}

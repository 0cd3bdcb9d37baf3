//! Keyword search over one entity's rows.
//!
//! Queries are matched against an ordered rule table; the first rule whose
//! keyword occurs in the lower-cased query decides the filter. Queries that
//! hit no rule fall back to a substring match over every cell.

use std::collections::BTreeSet;

use alchemist_model::{Row, RowId, RowSet};
use alchemist_validate::ValidationReport;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchRule {
    HighPriority,
    Javascript,
    Frontend,
    Overloaded,
    WithErrors,
    Text,
    /// Blank query: every row.
    All,
}

struct Context<'a> {
    query: &'a str,
    error_rows: BTreeSet<usize>,
}

struct Rule {
    rule: SearchRule,
    keywords: &'static [&'static str],
    description: &'static str,
    matches: fn(&Row, usize, &Context<'_>) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        rule: SearchRule::HighPriority,
        keywords: &["high priority", "urgent"],
        description: "Showing clients with priority level 4-5",
        matches: |row, _, _| int_value(row, "PriorityLevel").is_some_and(|level| level >= 4.0),
    },
    Rule {
        rule: SearchRule::Javascript,
        keywords: &["javascript", "react"],
        description: "Showing JavaScript-related records",
        matches: |row, _, _| {
            ["Skills", "RequiredSkills"].iter().any(|field| {
                contains(row, field, "javascript") || contains(row, field, "react")
            })
        },
    },
    Rule {
        rule: SearchRule::Frontend,
        keywords: &["frontend", "ui"],
        description: "Showing frontend tasks and workers",
        matches: |row, _, _| {
            contains(row, "Category", "frontend")
                || contains(row, "WorkerGroup", "frontend")
                || contains(row, "TaskName", "ui")
        },
    },
    Rule {
        rule: SearchRule::Overloaded,
        keywords: &["overloaded", "busy"],
        description: "Showing workers with high task loads",
        matches: |row, _, _| int_value(row, "MaxLoadPerPhase").is_some_and(|load| load > 8.0),
    },
    Rule {
        rule: SearchRule::WithErrors,
        keywords: &["missing", "error"],
        description: "Showing records with validation errors",
        matches: |_, index, ctx| ctx.error_rows.contains(&index),
    },
];

/// Whole-number part of a numeric cell.
fn int_value(row: &Row, field: &str) -> Option<f64> {
    row.number(field).map(f64::trunc)
}

fn contains(row: &Row, field: &str, needle: &str) -> bool {
    row.get(field)
        .is_some_and(|cell| cell.render().to_lowercase().contains(needle))
}

fn any_cell_contains(row: &Row, _: usize, ctx: &Context<'_>) -> bool {
    row.cells
        .values()
        .any(|cell| cell.render().to_lowercase().contains(ctx.query))
}

/// A matching row: its position in the collection and its stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub index: usize,
    pub id: RowId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub rule: SearchRule,
    pub description: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    pub fn indices(&self) -> Vec<usize> {
        self.hits.iter().map(|hit| hit.index).collect()
    }
}

/// Filter `rows` by `query`. With `errors_only`, keep only rows carrying any finding.
pub fn search_rows(
    rows: &RowSet,
    report: &ValidationReport,
    query: &str,
    errors_only: bool,
) -> SearchResult {
    let query = query.trim().to_lowercase();
    let ctx = Context {
        query: &query,
        error_rows: report.rows_with_errors(rows.kind),
    };

    let (rule, description, matches): (SearchRule, String, Option<fn(&Row, usize, &Context<'_>) -> bool>) =
        if query.is_empty() {
            (SearchRule::All, "Showing all records".to_string(), None)
        } else if let Some(rule) = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| query.contains(k)))
        {
            (rule.rule, rule.description.to_string(), Some(rule.matches))
        } else {
            (
                SearchRule::Text,
                format!("Searching for: {query}"),
                Some(any_cell_contains),
            )
        };

    let flagged = errors_only.then(|| report.rows_with_findings(rows.kind));
    let hits: Vec<SearchHit> = rows
        .iter()
        .filter(|(index, row)| matches.is_none_or(|m| m(row, *index, &ctx)))
        .filter(|(index, _)| flagged.as_ref().is_none_or(|f| f.contains(index)))
        .map(|(index, row)| SearchHit { index, id: row.id })
        .collect();

    debug!(
        entity = %rows.kind,
        rule = ?rule,
        hit_count = hits.len(),
        errors_only,
        "search complete"
    );
    SearchResult {
        rule,
        description,
        hits,
    }
}

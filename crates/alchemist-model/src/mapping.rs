//! Canonical-field to raw-column mapping for one entity kind.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{EntityKind, Row, RowSet};

/// How a mapping entry came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingOrigin {
    /// Chosen by the reconciler from similarity scores.
    Auto,
    /// Set explicitly by a reviewer; never re-scored.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub raw: String,
    pub confidence: f32,
    pub origin: MappingOrigin,
}

/// Partial mapping from canonical field name to source column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub kind: EntityKind,
    entries: BTreeMap<String, MappedColumn>,
}

impl HeaderMapping {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Mapping where every canonical field maps to a column of the same name.
    pub fn identity(kind: EntityKind) -> Self {
        let mut mapping = Self::new(kind);
        for field in kind.canonical_fields() {
            mapping.insert(*field, *field, 1.0, MappingOrigin::Auto);
        }
        mapping
    }

    pub fn insert(
        &mut self,
        canonical: impl Into<String>,
        raw: impl Into<String>,
        confidence: f32,
        origin: MappingOrigin,
    ) {
        self.entries.insert(
            canonical.into(),
            MappedColumn {
                raw: raw.into(),
                confidence,
                origin,
            },
        );
    }

    pub fn remove(&mut self, canonical: &str) -> Option<MappedColumn> {
        self.entries.remove(canonical)
    }

    pub fn get(&self, canonical: &str) -> Option<&MappedColumn> {
        self.entries.get(canonical)
    }

    pub fn raw_for(&self, canonical: &str) -> Option<&str> {
        self.entries.get(canonical).map(|m| m.raw.as_str())
    }

    pub fn confidence(&self, canonical: &str) -> Option<f32> {
        self.entries.get(canonical).map(|m| m.confidence)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical schema order, followed by any non-schema entries.
    pub fn entries(&self) -> Vec<(&str, &MappedColumn)> {
        let schema = self.kind.canonical_fields();
        let mut out: Vec<(&str, &MappedColumn)> = schema
            .iter()
            .filter_map(|field| self.entries.get_key_value(*field))
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        out.extend(
            self.entries
                .iter()
                .filter(|(k, _)| !schema.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v)),
        );
        out
    }

    /// Canonical fields with no mapping.
    pub fn unmapped(&self) -> Vec<&'static str> {
        self.kind
            .canonical_fields()
            .iter()
            .copied()
            .filter(|field| !self.entries.contains_key(*field))
            .collect()
    }

    /// Raw columns claimed by more than one canonical field.
    pub fn shared_columns(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut claims: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (canonical, column) in self.entries() {
            claims.entry(column.raw.as_str()).or_default().push(canonical);
        }
        claims.retain(|_, fields| fields.len() > 1);
        claims
    }

    /// Source column that backs a field of the canonical view.
    ///
    /// Unmapped fields pass through under their raw name.
    pub fn source_of<'a>(&'a self, field: &'a str) -> &'a str {
        self.raw_for(field).unwrap_or(field)
    }

    /// Project raw rows onto canonical field names.
    ///
    /// Mapped canonical columns come first in schema order, then every raw
    /// column no entry consumed. Row ids are carried over unchanged.
    pub fn apply(&self, raw: &RowSet) -> RowSet {
        let ordered = self.entries();
        let consumed: BTreeSet<&str> = ordered.iter().map(|(_, m)| m.raw.as_str()).collect();
        let canonical: BTreeSet<&str> = ordered.iter().map(|(c, _)| *c).collect();
        let passthrough: Vec<&String> = raw
            .columns
            .iter()
            .filter(|c| !consumed.contains(c.as_str()) && !canonical.contains(c.as_str()))
            .collect();

        let mut columns: Vec<String> = ordered.iter().map(|(c, _)| (*c).to_string()).collect();
        columns.extend(passthrough.iter().map(|c| (*c).clone()));

        let mut out = RowSet::new(self.kind, columns);
        for source in &raw.rows {
            let mut row = Row::new(source.id);
            for (field, column) in &ordered {
                if let Some(value) = source.get(&column.raw) {
                    row.cells.insert((*field).to_string(), value.clone());
                }
            }
            for column in &passthrough {
                if let Some(value) = source.get(column) {
                    row.cells.insert((*column).clone(), value.clone());
                }
            }
            out.push_row(row);
        }
        out
    }
}

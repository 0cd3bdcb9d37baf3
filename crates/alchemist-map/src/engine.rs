//! Canonical-field reconciliation engine.

use alchemist_model::{EntityKind, HeaderMapping, MappingOrigin};
use tracing::debug;

use crate::score::score;

/// Options for automatic reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileOptions {
    /// Best scores below this leave the canonical field unmapped.
    pub min_confidence: f32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
        }
    }
}

/// Proposed mapping for one canonical field.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub canonical: String,
    pub raw: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileResult {
    /// One entry per mapped canonical field, in canonical order.
    pub suggestions: Vec<Suggestion>,
    /// Canonical fields whose best score fell under the threshold.
    pub unmapped: Vec<String>,
    /// Source headers no suggestion uses.
    pub unused: Vec<String>,
}

impl ReconcileResult {
    pub fn raw_for(&self, canonical: &str) -> Option<&str> {
        self.suggestions
            .iter()
            .find(|s| s.canonical == canonical)
            .map(|s| s.raw.as_str())
    }

    pub fn confidence(&self, canonical: &str) -> Option<f32> {
        self.suggestions
            .iter()
            .find(|s| s.canonical == canonical)
            .map(|s| s.confidence)
    }
}

/// Maps source headers onto canonical fields by best similarity.
///
/// Each canonical field is matched independently, so two canonical fields may
/// land on the same source header. [`HeaderMapping::shared_columns`] reports
/// those cases without rejecting them.
#[derive(Debug, Clone, Default)]
pub struct HeaderReconciler {
    options: ReconcileOptions,
}

impl HeaderReconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn reconcile<R: AsRef<str>, C: AsRef<str>>(
        &self,
        raw: &[R],
        canonical: &[C],
    ) -> ReconcileResult {
        let mut result = ReconcileResult::default();

        for field in canonical {
            let field = field.as_ref();
            let mut best: Option<(&str, f32)> = None;
            for header in raw {
                let header = header.as_ref();
                let s = score(field, header);
                // Strict comparison keeps the first header on ties.
                if best.is_none_or(|(_, top)| s > top) {
                    best = Some((header, s));
                }
            }
            match best {
                Some((header, confidence)) if confidence >= self.options.min_confidence => {
                    debug!(canonical = field, raw = header, confidence, "header matched");
                    result.suggestions.push(Suggestion {
                        canonical: field.to_string(),
                        raw: header.to_string(),
                        confidence,
                    });
                }
                _ => result.unmapped.push(field.to_string()),
            }
        }

        result.unused = raw
            .iter()
            .map(|h| h.as_ref().to_string())
            .filter(|h| !result.suggestions.iter().any(|s| &s.raw == h))
            .collect();
        result
    }

    /// Reconcile source headers against an entity kind's schema.
    pub fn reconcile_kind<R: AsRef<str>>(&self, kind: EntityKind, raw: &[R]) -> HeaderMapping {
        let result = self.reconcile(raw, kind.canonical_fields());
        let mut mapping = HeaderMapping::new(kind);
        for suggestion in result.suggestions {
            mapping.insert(
                suggestion.canonical,
                suggestion.raw,
                suggestion.confidence,
                MappingOrigin::Auto,
            );
        }
        mapping
    }
}

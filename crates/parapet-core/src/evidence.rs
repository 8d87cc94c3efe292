//! Jurisdiction and effective-window filtering of retrieved evidence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of retained candidates forming the evidence set.
pub const DEFAULT_TOP_K: usize = 4;

/// Citation metadata carried alongside every retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub title: String,
    pub jurisdiction: String,
    pub policy_id: String,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
}

impl ChunkMetadata {
    /// Whether the effective window contains `date` (inclusive both ends).
    pub fn effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && date <= self.effective_to
    }
}

/// A scored fragment of a policy document, produced per request by the
/// retrieval collaborator and discarded after the request.
///
/// The score is an opaque ordering key; the pool arrives already ranked
/// and the filter preserves that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub content: String,
    pub score: f32,
    pub metadata: ChunkMetadata,
}

/// Result of filtering a candidate pool.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Retained evidence, in original pool order, at most top-K items.
    pub retained: Vec<RetrievedChunk>,

    /// True when nothing survived the jurisdiction/date predicate and the
    /// unfiltered pool was substituted.
    pub fallback: bool,
}

impl FilterOutcome {
    /// Whether any evidence is available to build prompt context from.
    /// Empty only when the pool itself was empty before filtering.
    pub fn evidence_present(&self) -> bool {
        !self.retained.is_empty()
    }
}

/// Narrows a raw candidate pool to jurisdiction- and date-valid documents.
#[derive(Debug, Clone)]
pub struct EvidenceFilter {
    top_k: usize,
}

impl Default for EvidenceFilter {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl EvidenceFilter {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Retain candidates whose jurisdiction matches and whose effective
    /// window contains `reference_date`, keeping the top-K in pool order.
    ///
    /// Fail-open fallback: when a non-empty pool filters down to nothing,
    /// the top-K of the unfiltered pool is used instead so a jurisdiction
    /// or date mismatch alone never empties the prompt context. Fallback
    /// citations may carry a non-matching jurisdiction or an expired
    /// window; that is the preserved trade-off, logged but not flagged.
    pub fn filter(
        &self,
        pool: &[RetrievedChunk],
        jurisdiction: &str,
        reference_date: NaiveDate,
    ) -> FilterOutcome {
        let retained: Vec<RetrievedChunk> = pool
            .iter()
            .filter(|chunk| {
                chunk.metadata.jurisdiction == jurisdiction
                    && chunk.metadata.effective_on(reference_date)
            })
            .take(self.top_k)
            .cloned()
            .collect();

        if retained.is_empty() && !pool.is_empty() {
            tracing::warn!(
                jurisdiction,
                %reference_date,
                pool_size = pool.len(),
                "no candidate passed jurisdiction/date filtering; using unfiltered pool"
            );
            return FilterOutcome {
                retained: pool.iter().take(self.top_k).cloned().collect(),
                fallback: true,
            };
        }

        FilterOutcome {
            retained,
            fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(policy_id: &str, jurisdiction: &str, from: &str, to: &str, score: f32) -> RetrievedChunk {
        RetrievedChunk {
            content: format!("body of {}", policy_id),
            score,
            metadata: ChunkMetadata {
                title: format!("Title_{}", policy_id),
                jurisdiction: jurisdiction.to_string(),
                policy_id: policy_id.to_string(),
                effective_from: from.parse().unwrap(),
                effective_to: to.parse().unwrap(),
            },
        }
    }

    fn ref_date() -> NaiveDate {
        "2025-09-15".parse().unwrap()
    }

    #[test]
    fn test_retains_matching_jurisdiction_and_window() {
        let pool = vec![
            chunk("A-1", "UAE", "2025-01-01", "2026-01-01", 0.1),
            chunk("B-1", "EU", "2025-01-01", "2026-01-01", 0.2),
            chunk("C-1", "UAE", "2020-01-01", "2021-01-01", 0.3),
        ];

        let outcome = EvidenceFilter::default().filter(&pool, "UAE", ref_date());

        assert!(!outcome.fallback);
        assert_eq!(outcome.retained.len(), 1);
        assert_eq!(outcome.retained[0].metadata.policy_id, "A-1");
    }

    #[test]
    fn test_never_retains_out_of_window_when_filter_succeeds() {
        let pool = vec![
            chunk("EXPIRED", "UAE", "2020-01-01", "2021-01-01", 0.1),
            chunk("LIVE", "UAE", "2025-01-01", "2026-01-01", 0.2),
        ];

        let outcome = EvidenceFilter::default().filter(&pool, "UAE", ref_date());

        assert!(!outcome.fallback);
        assert!(outcome
            .retained
            .iter()
            .all(|c| c.metadata.effective_on(ref_date())));
    }

    #[test]
    fn test_preserves_pool_order_and_caps_at_top_k() {
        let pool: Vec<_> = (0..6)
            .map(|i| chunk(&format!("P-{}", i), "UAE", "2025-01-01", "2026-01-01", i as f32))
            .collect();

        let outcome = EvidenceFilter::new(4).filter(&pool, "UAE", ref_date());

        let ids: Vec<_> = outcome
            .retained
            .iter()
            .map(|c| c.metadata.policy_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P-0", "P-1", "P-2", "P-3"]);
    }

    #[test]
    fn test_fallback_returns_unfiltered_pool_head() {
        let pool = vec![
            chunk("EU-1", "EU", "2025-01-01", "2026-01-01", 0.1),
            chunk("US-1", "US", "2025-01-01", "2026-01-01", 0.2),
        ];

        let outcome = EvidenceFilter::default().filter(&pool, "UAE", ref_date());

        assert!(outcome.fallback);
        assert_eq!(outcome.retained.len(), 2);
        // Off-jurisdiction citations are expected on the fallback path.
        assert_eq!(outcome.retained[0].metadata.jurisdiction, "EU");
        assert!(outcome.evidence_present());
    }

    #[test]
    fn test_empty_pool_yields_empty_outcome() {
        let outcome = EvidenceFilter::default().filter(&[], "UAE", ref_date());
        assert!(outcome.retained.is_empty());
        assert!(!outcome.fallback);
        assert!(!outcome.evidence_present());
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let pool = vec![chunk("A-1", "UAE", "2025-09-15", "2025-09-15", 0.1)];
        let outcome = EvidenceFilter::default().filter(&pool, "UAE", ref_date());
        assert_eq!(outcome.retained.len(), 1);
        assert!(!outcome.fallback);
    }
}

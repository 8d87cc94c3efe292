//! Offline answer evaluators.
//!
//! Post-hoc checks run over stored payloads in audits and regression
//! suites, not on the request path. The leak check reports categories and
//! counts rather than the matched substrings, same privacy posture as
//! [`crate::redactor::RedactionRecord`].

use serde::{Deserialize, Serialize};

use crate::citation::Citation;
use crate::redactor::PiiCategory;

/// Result of scanning an answer for surviving raw sensitive-data patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiLeakReport {
    pub leaked: bool,
    /// Category and match count for every category that still matched.
    pub matches: Vec<(PiiCategory, usize)>,
}

/// Scan a final answer for sensitive-data patterns that should have been
/// masked. Masked text never re-matches, so any match is a leak.
pub fn pii_leak(answer: &str) -> PiiLeakReport {
    let matches: Vec<(PiiCategory, usize)> = PiiCategory::ORDERED
        .into_iter()
        .filter_map(|category| {
            let count = category.match_count(answer);
            (count > 0).then_some((category, count))
        })
        .collect();

    PiiLeakReport {
        leaked: !matches.is_empty(),
        matches,
    }
}

/// Naive grounding check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaithfulnessReport {
    pub faithful: bool,
    pub score: f64,
}

/// The answer is considered faithful when it contains at least one leading
/// keyword from a citation snippet. A heuristic, not a proof.
pub fn faithfulness(answer: &str, citations: &[Citation]) -> FaithfulnessReport {
    let answer = answer.to_lowercase();
    let faithful = citations
        .iter()
        .filter_map(|c| c.snippet.split_whitespace().next())
        .any(|keyword| answer.contains(&keyword.to_lowercase()));

    FaithfulnessReport {
        faithful,
        score: if faithful { 1.0 } else { 0.0 },
    }
}

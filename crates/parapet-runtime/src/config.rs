//! Runtime configuration.

use crate::providers::GenerationConfig;
use std::time::Duration;

/// Tunables for a [`Pipeline`](crate::pipeline::Pipeline) instance.
///
/// Defaults match the shipped guardrail posture: a small evidence
/// window, a wider candidate pool, and short timeouts so a stalled
/// backend degrades into a refusal instead of a hang.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Jurisdiction used when a request does not specify one.
    pub default_jurisdiction: String,
    /// Evidence chunks retained after filtering.
    pub top_k: usize,
    /// Candidate chunks requested from the retriever before filtering.
    pub pool_size: usize,
    /// Budget for the retrieval call.
    pub retrieval_timeout: Duration,
    /// Model and sampling settings for the generation call.
    pub generation: GenerationConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: "UAE".to_string(),
            top_k: 4,
            pool_size: 10,
            retrieval_timeout: Duration::from_secs(5),
            generation: GenerationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_jurisdiction, "UAE");
        assert_eq!(config.top_k, 4);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.retrieval_timeout, Duration::from_secs(5));
        assert_eq!(config.generation.model, "gpt-4o-mini");
    }
}

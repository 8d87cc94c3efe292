//! Retrieval collaborator interface.
//!
//! The pipeline only ever sees this trait; the concrete engine (a vector
//! store, a remote search service, or the in-process [`crate::index::LexicalIndex`])
//! is injected at startup.

use async_trait::async_trait;
use parapet_core::RetrievedChunk;
use std::time::Duration;
use thiserror::Error;

/// Errors from retrieval collaborators.
///
/// The pipeline recovers from every variant by treating the pool as
/// empty; retrieval failure is never surfaced to the caller as an error.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Index not available: {0}")]
    NotAvailable(String),
}

/// A relevance-ranked search over the policy corpus.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `k` chunks for `query`, most relevant first. The
    /// score is an opaque ordering key owned by the implementation.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError>;

    /// Implementation name for logging.
    fn name(&self) -> &str;
}

//! In-process lexical index over the policy corpus.
//!
//! A token-overlap stand-in for the external vector-similarity engine,
//! built once at startup from the document manifest. Documents are split
//! into ~600-character chunks that each carry a copy of their document's
//! citation metadata, so the retrieval interface looks identical whether
//! it is backed by this index or by a real embedding store.

use async_trait::async_trait;
use parapet_core::{ChunkMetadata, PolicyDocument, RetrievedChunk};
use std::collections::HashSet;

use crate::retrieval::{RetrievalError, Retriever};

/// Target chunk size, in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 600;

#[derive(Debug, Clone)]
struct IndexedChunk {
    content: String,
    metadata: ChunkMetadata,
    tokens: HashSet<String>,
}

/// Token-overlap search over chunked policy documents.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    chunks: Vec<IndexedChunk>,
}

impl LexicalIndex {
    /// Build an index with the default chunk size.
    pub fn build(documents: &[PolicyDocument]) -> Self {
        Self::with_chunk_size(documents, DEFAULT_CHUNK_CHARS)
    }

    pub fn with_chunk_size(documents: &[PolicyDocument], chunk_chars: usize) -> Self {
        let mut chunks = Vec::new();

        for doc in documents {
            let metadata = ChunkMetadata {
                title: doc.title.clone(),
                jurisdiction: doc.jurisdiction.clone(),
                policy_id: doc.policy_id.clone(),
                effective_from: doc.effective_from,
                effective_to: doc.effective_to,
            };

            for content in split_chunks(&doc.body, chunk_chars) {
                let tokens = tokenize(&content);
                chunks.push(IndexedChunk {
                    content,
                    metadata: metadata.clone(),
                    tokens,
                });
            }
        }

        tracing::info!(chunks = chunks.len(), documents = documents.len(), "lexical index built");
        Self { chunks }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl Retriever for LexicalIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let query_tokens = tokenize(query);

        let mut scored: Vec<RetrievedChunk> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let overlap = chunk.tokens.intersection(&query_tokens).count();
                if overlap == 0 {
                    return None;
                }
                Some(RetrievedChunk {
                    content: chunk.content.clone(),
                    score: overlap as f32,
                    metadata: chunk.metadata.clone(),
                })
            })
            .collect();

        // Stable sort keeps manifest order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Split a document body into chunks of at most `max_chars` characters,
/// merging whole paragraphs until the budget is reached. A single
/// oversized paragraph becomes its own chunk rather than being cut.
fn split_chunks(body: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in body.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if !current.is_empty() && current.chars().count() + paragraph.chars().count() > max_chars {
            chunks.push(current.clone());
            current.clear();
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(policy_id: &str, jurisdiction: &str, body: &str) -> PolicyDocument {
        PolicyDocument {
            title: format!("Title_{}", policy_id),
            jurisdiction: jurisdiction.to_string(),
            policy_id: policy_id.to_string(),
            effective_from: "2025-01-01".parse().unwrap(),
            effective_to: "2026-01-01".parse().unwrap(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_ranks_overlapping_chunk_first() {
        let index = LexicalIndex::build(&[
            doc("FEE-DSC-007", "UAE", "All fees must be disclosed prior to account opening."),
            doc("KYC-ONB-001", "UAE", "Customer onboarding requires valid Emirates ID."),
        ]);

        let results = index.search("what fees apply when opening an account", 4).await.unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].metadata.policy_id, "FEE-DSC-007");
    }

    #[tokio::test]
    async fn test_unrelated_query_returns_empty_pool() {
        let index = LexicalIndex::build(&[doc("FEE-DSC-007", "UAE", "Fee schedule details.")]);
        let results = index.search("zzz qqq xxx", 4).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_caps_at_k() {
        let docs: Vec<_> = (0..8)
            .map(|i| doc(&format!("P-{}", i), "UAE", "shared fee disclosure wording"))
            .collect();
        let index = LexicalIndex::build(&docs);

        let results = index.search("fee disclosure", 3).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_chunking_merges_paragraphs_up_to_budget() {
        let body = format!("{}\n\n{}\n\n{}", "a".repeat(300), "b".repeat(300), "c".repeat(300));
        let chunks = split_chunks(&body, 600);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].contains("aaa"));
        assert!(chunks[0].contains("bbb"));
        assert!(chunks[1].contains("ccc"));
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let body = "x".repeat(1500);
        let chunks = split_chunks(&body, 600);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_chunks_carry_document_metadata() {
        let index = LexicalIndex::build(&[doc("KYC-ONB-001", "UAE", "Onboarding rules.")]);
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }
}

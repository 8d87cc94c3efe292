//! Citation records and the human-readable prompt context block.

use serde::{Deserialize, Serialize};

use crate::evidence::RetrievedChunk;

/// Maximum snippet length, in characters.
pub const SNIPPET_MAX_CHARS: usize = 300;

/// Sentinel context block used when the evidence set is empty. The
/// decision stage turns its presence into the insufficient-context flag.
pub const NO_EVIDENCE: &str = "NO_MATCH";

/// Public, truncated view of one retained evidence chunk.
///
/// Every citation's effective window contains the reference date used for
/// filtering, unless the evidence filter took its fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub policy_id: String,
    pub jurisdiction: String,
    pub effective_from: chrono::NaiveDate,
    pub effective_to: chrono::NaiveDate,
    pub snippet: String,
}

/// Citations plus the context block handed to the generation prompt.
#[derive(Debug, Clone)]
pub struct ContextBundle {
    pub citations: Vec<Citation>,
    pub context_block: String,
}

/// Turns retained evidence into citations and a prompt context block.
#[derive(Debug, Clone, Default)]
pub struct CitationBuilder;

impl CitationBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One context line and one citation per retained chunk, in evidence
    /// order; the [`NO_EVIDENCE`] sentinel when the set is empty.
    pub fn build(&self, evidence: &[RetrievedChunk]) -> ContextBundle {
        let mut lines = Vec::with_capacity(evidence.len());
        let mut citations = Vec::with_capacity(evidence.len());

        for chunk in evidence {
            let meta = &chunk.metadata;
            let snippet = snippet_of(&chunk.content);

            lines.push(format!(
                "- [{}|{}|{}|{}→{}] {}",
                meta.title,
                meta.policy_id,
                meta.jurisdiction,
                meta.effective_from,
                meta.effective_to,
                snippet
            ));

            citations.push(Citation {
                title: meta.title.clone(),
                policy_id: meta.policy_id.clone(),
                jurisdiction: meta.jurisdiction.clone(),
                effective_from: meta.effective_from,
                effective_to: meta.effective_to,
                snippet,
            });
        }

        let context_block = if lines.is_empty() {
            NO_EVIDENCE.to_string()
        } else {
            lines.join("\n")
        };

        ContextBundle {
            citations,
            context_block,
        }
    }
}

/// Whitespace-normalized snippet, truncated to [`SNIPPET_MAX_CHARS`]
/// characters on a char boundary.
fn snippet_of(content: &str) -> String {
    let normalized = content.split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.chars().take(SNIPPET_MAX_CHARS).collect()
}

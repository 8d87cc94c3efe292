//! Final audited response assembly.
//!
//! The [`AnswerPayload`] is the sole artifact returned to the caller and
//! the sole audit trail for a request; it is never mutated after assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::citation::Citation;
use crate::decision::{RiskFlag, Verdict};
use crate::policy::PolicyPack;
use crate::redactor::RedactionRecord;

/// Audit metadata for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Generation-service model identifier.
    pub model: String,
    pub policy_pack_version: String,
    pub cited_policy_ids: Vec<String>,
    /// UTC assembly time, serialized RFC 3339 with a `Z` marker.
    pub timestamp: DateTime<Utc>,
}

/// The aggregate audit record returned for every answered request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub jurisdiction: String,
    pub policy_pack_version: String,
    pub citations: Vec<Citation>,
    /// Pre-generation records first, then post-generation records.
    pub redactions: Vec<RedactionRecord>,
    pub risk_flags: Vec<RiskFlag>,
    pub disclaimer: String,
    pub run_metadata: RunMetadata,
}

/// Builds one immutable [`AnswerPayload`] per request.
#[derive(Debug, Clone, Default)]
pub struct PayloadAssembler;

impl PayloadAssembler {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        &self,
        verdict: Verdict,
        jurisdiction: &str,
        citations: Vec<Citation>,
        pre_redactions: Vec<RedactionRecord>,
        post_redactions: Vec<RedactionRecord>,
        pack: &PolicyPack,
        model: &str,
    ) -> AnswerPayload {
        let cited_policy_ids = citations.iter().map(|c| c.policy_id.clone()).collect();

        let mut redactions = pre_redactions;
        redactions.extend(post_redactions);

        AnswerPayload {
            answer: verdict.final_text,
            jurisdiction: jurisdiction.to_string(),
            policy_pack_version: pack.version.clone(),
            citations,
            redactions,
            risk_flags: verdict.risk_flags,
            disclaimer: pack.disclaimer.clone(),
            run_metadata: RunMetadata {
                model: model.to_string(),
                policy_pack_version: pack.version.clone(),
                cited_policy_ids,
                timestamp: Utc::now(),
            },
        }
    }
}

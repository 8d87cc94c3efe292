//! # parapet-core
//!
//! Deterministic guardrail engine for audited policy-copilot answers.
//!
//! This crate owns every decision the service must be able to defend in an
//! audit: PII redaction, banned-phrase linting, jurisdiction/date evidence
//! filtering, the refuse-vs-pass-through decision, and assembly of the
//! final [`AnswerPayload`]. Retrieval and generation live elsewhere,
//! behind traits.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No network calls**: All evaluation is rule-based
//! 3. **Traceable**: Every refusal names its risk flags and the audit
//!    payload carries both redaction passes
//! 4. **Privacy-by-design**: No matched sensitive substring ever leaves
//!    the redactor
//!
//! ## Example
//!
//! ```rust,ignore
//! use parapet_core::{finalize_answer, PolicyPack, Redactor};
//!
//! let pack = PolicyPack::from_path("packs/policy_pack.json")?;
//! let (question, pre_records) = Redactor::new().redact(raw_question);
//! // ... retrieve, filter, generate ...
//! let payload = finalize_answer(&pack, &generated, evidence_present,
//!                               "UAE", citations, pre_records, "gpt-4o-mini");
//! ```

pub mod citation;
pub mod decision;
pub mod eval;
pub mod evidence;
pub mod linter;
pub mod payload;
pub mod policy;
pub mod redactor;

// Re-export main types at crate root
pub use citation::{Citation, CitationBuilder, ContextBundle, NO_EVIDENCE, SNIPPET_MAX_CHARS};
pub use decision::{Decision, RiskFlag, Verdict, REFUSAL_PREAMBLE};
pub use evidence::{ChunkMetadata, EvidenceFilter, FilterOutcome, RetrievedChunk, DEFAULT_TOP_K};
pub use linter::Linter;
pub use payload::{AnswerPayload, PayloadAssembler, RunMetadata};
pub use policy::{
    DocumentDescriptor, DocumentManifest, ManifestError, PackError, PolicyDocument, PolicyPack,
};
pub use redactor::{PiiCategory, RedactionRecord, Redactor};

/// Run the deterministic back half of the pipeline over a generated
/// answer: redact the output, lint it, decide refuse-vs-pass-through, and
/// assemble the audited payload.
///
/// Pure apart from the payload timestamp. The orchestrator calls this
/// after the generation collaborator returns; tests call it directly.
pub fn finalize_answer(
    pack: &PolicyPack,
    generated_text: &str,
    evidence_present: bool,
    jurisdiction: &str,
    citations: Vec<Citation>,
    pre_redactions: Vec<RedactionRecord>,
    model: &str,
) -> AnswerPayload {
    let (safe_text, post_redactions) = Redactor::new().redact(generated_text);
    let violations = Linter::new(pack).lint(&safe_text);
    let verdict = Decision::new().decide(&safe_text, evidence_present, &violations);

    PayloadAssembler::new().assemble(
        verdict,
        jurisdiction,
        citations,
        pre_redactions,
        post_redactions,
        pack,
        model,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pack() -> PolicyPack {
        PolicyPack::from_json(
            r#"{
            "policy_pack_version": "2025-09-01",
            "banned_phrases": ["guaranteed approval"],
            "required_disclaimer": "This response is based on current bank policy and may vary by jurisdiction.",
            "jurisdiction_directives": {"UAE": "Follow UAE Central Bank guidance and local KYC rules."}
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_answer_passes_through() {
        let payload = finalize_answer(
            &test_pack(),
            "Fees must be disclosed before account opening, per FEE-DSC-007.",
            true,
            "UAE",
            vec![],
            vec![],
            "gpt-4o-mini",
        );

        assert!(payload.risk_flags.is_empty());
        assert!(payload.answer.contains("FEE-DSC-007"));
        assert_eq!(payload.disclaimer, test_pack().disclaimer);
    }

    #[test]
    fn test_leaked_pii_in_generation_is_masked() {
        let payload = finalize_answer(
            &test_pack(),
            "The customer's SSN is 123-45-6789.",
            true,
            "UAE",
            vec![],
            vec![],
            "gpt-4o-mini",
        );

        assert!(!payload.answer.contains("123-45-6789"));
        assert_eq!(payload.redactions.len(), 1);
        assert_eq!(payload.redactions[0].category, PiiCategory::Ssn);
    }

    #[test]
    fn test_banned_phrase_forces_refusal() {
        let payload = finalize_answer(
            &test_pack(),
            "You have guaranteed approval for the loan.",
            true,
            "UAE",
            vec![],
            vec![],
            "gpt-4o-mini",
        );

        assert!(payload.answer.starts_with(REFUSAL_PREAMBLE));
        assert_eq!(payload.risk_flags.len(), 1);
        assert!(matches!(payload.risk_flags[0], RiskFlag::PolicyViolation(_)));
    }

    #[test]
    fn test_missing_evidence_forces_refusal() {
        let payload = finalize_answer(
            &test_pack(),
            "Confident but unsupported answer.",
            false,
            "UAE",
            vec![],
            vec![],
            "gpt-4o-mini",
        );

        assert_eq!(payload.risk_flags, vec![RiskFlag::InsufficientContext]);
        assert!(payload.answer.starts_with(REFUSAL_PREAMBLE));
    }
}

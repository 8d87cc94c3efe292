//! Prompt assembly for the generation call.
//!
//! The system prompt carries the compliance posture and the active
//! jurisdiction directive; the user prompt carries the redacted
//! question, the filtered context block, and the output constraints.
//! Both are plain string templates so a reviewer can read the exact
//! text sent to the model.

/// Render the system prompt for a jurisdiction directive.
pub fn system_prompt(jurisdiction_directive: &str) -> String {
    format!(
        "You are a banking policy copilot focused on TRUST, OBSERVABILITY, and COMPLIANCE.\n\
         Answer ONLY from the provided policy context. If the context is insufficient, say so.\n\
         Never invent policy numbers, fees, thresholds, or effective dates.\n\
         Jurisdiction directive: {jurisdiction_directive}"
    )
}

/// Render the user prompt around the redacted question and the
/// formatted context block.
pub fn user_prompt(redacted_question: &str, context_block: &str) -> String {
    format!(
        "USER QUESTION:\n{redacted_question}\n\n\
         CONTEXT (policy snippets):\n{context_block}\n\n\
         CONSTRAINTS:\n\
         - Cite the policy_id of every snippet you rely on.\n\
         - Do not include personal data in the answer.\n\
         - If no snippet supports an answer, state that the context is insufficient."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_directive() {
        let prompt = system_prompt("Follow CBUAE consumer protection rules.");
        assert!(prompt.contains("Follow CBUAE consumer protection rules."));
        assert!(prompt.contains("COMPLIANCE"));
    }

    #[test]
    fn test_user_prompt_sections() {
        let prompt = user_prompt("What is the KYC threshold?", "- [KYC|POL-1|UAE|2024-01-01\u{2192}2026-01-01] snippet");
        assert!(prompt.starts_with("USER QUESTION:\nWhat is the KYC threshold?"));
        assert!(prompt.contains("CONTEXT (policy snippets):"));
        assert!(prompt.contains("CONSTRAINTS:"));
        assert!(prompt.contains("POL-1"));
    }
}

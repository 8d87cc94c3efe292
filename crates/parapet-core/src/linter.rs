//! Banned-phrase linting against the policy pack.

use crate::policy::PolicyPack;

/// Flags banned phrases in candidate answer text.
///
/// Case-insensitive substring containment, checked in pack order so
/// violation messages are deterministic. Side-effect free.
#[derive(Debug, Clone)]
pub struct Linter {
    banned: Vec<String>,
}

impl Linter {
    pub fn new(pack: &PolicyPack) -> Self {
        Self {
            banned: pack.banned_phrases.clone(),
        }
    }

    /// One violation message per banned phrase present in `text`.
    pub fn lint(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.banned
            .iter()
            .filter(|phrase| haystack.contains(&phrase.to_lowercase()))
            .map(|phrase| format!("Contains banned phrase: '{}'", phrase))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pack() -> PolicyPack {
        PolicyPack::from_json(
            r#"{
            "policy_pack_version": "2025-09-01",
            "banned_phrases": [
                "guaranteed approval",
                "we can waive any regulation",
                "ignore policy"
            ],
            "required_disclaimer": "Disclaimer.",
            "jurisdiction_directives": {}
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_text_has_no_violations() {
        let linter = Linter::new(&test_pack());
        assert!(linter.lint("Fees are disclosed before account opening.").is_empty());
    }

    #[test]
    fn test_banned_phrase_flagged() {
        let linter = Linter::new(&test_pack());
        let violations = linter.lint("You have guaranteed approval for this loan.");
        assert_eq!(violations, vec!["Contains banned phrase: 'guaranteed approval'"]);
    }

    #[test]
    fn test_case_insensitive_and_punctuation_adjacent() {
        let linter = Linter::new(&test_pack());
        assert_eq!(linter.lint("GUARANTEED APPROVAL!").len(), 1);
        assert_eq!(linter.lint("(Guaranteed Approval), really").len(), 1);
    }

    #[test]
    fn test_violations_reported_in_pack_order() {
        let linter = Linter::new(&test_pack());
        let violations = linter.lint("Ignore policy, you get guaranteed approval.");
        assert_eq!(
            violations,
            vec![
                "Contains banned phrase: 'guaranteed approval'",
                "Contains banned phrase: 'ignore policy'",
            ]
        );
    }
}

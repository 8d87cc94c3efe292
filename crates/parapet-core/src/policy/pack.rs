//! Policy pack parsing from JSON/YAML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_pack_schema;

/// Errors that can occur when loading a policy pack.
#[derive(Error, Debug)]
pub enum PackError {
    #[error("Failed to read policy pack file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Policy pack schema validation failed: {0}")]
    SchemaError(String),

    #[error("Policy pack validation failed: {0}")]
    ValidationError(String),
}

/// Versioned bundle of banned phrases, jurisdiction directives, and
/// disclaimer text governing allowed outputs.
///
/// Loaded once at process start and read-only thereafter. Concurrent reads
/// need no locking because no writer exists after initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyPack {
    /// Date-based pack version (e.g. "2025-09-01").
    #[serde(rename = "policy_pack_version")]
    pub version: String,

    /// Ordered list of phrases that must never appear in an answer.
    pub banned_phrases: Vec<String>,

    /// Disclaimer attached to every answer payload.
    #[serde(rename = "required_disclaimer")]
    pub disclaimer: String,

    /// Jurisdiction code to directive text. BTreeMap keeps iteration
    /// order deterministic.
    #[serde(rename = "jurisdiction_directives")]
    pub directives: BTreeMap<String, String>,
}

impl PolicyPack {
    /// Parse a policy pack from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a policy pack from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PackError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a policy pack from a file, dispatching on extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PackError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, PackError> {
        validate_pack_schema(&value).map_err(|errors| PackError::SchemaError(errors.join("; ")))?;
        let pack: PolicyPack = serde_json::from_value(value)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Directive text for a jurisdiction, with a generic fallback for
    /// codes the pack does not name.
    pub fn directive_for(&self, jurisdiction: &str) -> String {
        self.directives
            .get(jurisdiction)
            .cloned()
            .unwrap_or_else(|| format!("Follow local regulations for {}.", jurisdiction))
    }

    /// Structural checks beyond the JSON Schema.
    pub fn validate(&self) -> Result<(), PackError> {
        let mut seen = std::collections::HashSet::new();
        for phrase in &self.banned_phrases {
            if phrase.trim().is_empty() {
                return Err(PackError::ValidationError(
                    "banned phrase is blank".to_string(),
                ));
            }
            if !seen.insert(phrase.to_lowercase()) {
                return Err(PackError::ValidationError(format!(
                    "Duplicate banned phrase: '{}'",
                    phrase
                )));
            }
        }

        if self.disclaimer.trim().is_empty() {
            return Err(PackError::ValidationError(
                "required_disclaimer is blank".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_PACK: &str = r#"{
        "policy_pack_version": "2025-09-01",
        "banned_phrases": [
            "guaranteed approval",
            "we can waive any regulation",
            "ignore policy"
        ],
        "required_disclaimer": "This response is based on current bank policy and may vary by jurisdiction.",
        "jurisdiction_directives": {
            "UAE": "Follow UAE Central Bank guidance and local KYC rules.",
            "EU": "Follow EBA and GDPR requirements; never reveal raw PII in outputs.",
            "US": "Follow FFIEC guidance; avoid sharing full SSN or full PAN."
        }
    }"#;

    #[test]
    fn test_parse_valid_pack() {
        let pack = PolicyPack::from_json(VALID_PACK).unwrap();
        assert_eq!(pack.version, "2025-09-01");
        assert_eq!(pack.banned_phrases.len(), 3);
        assert_eq!(pack.banned_phrases[0], "guaranteed approval");
        assert!(pack.disclaimer.contains("bank policy"));
    }

    #[test]
    fn test_parse_yaml_pack() {
        let yaml = r#"
policy_pack_version: "2025-09-01"
banned_phrases:
  - "guaranteed approval"
required_disclaimer: "Disclaimer."
jurisdiction_directives:
  UAE: "Follow UAE Central Bank guidance."
"#;
        let pack = PolicyPack::from_yaml(yaml).unwrap();
        assert_eq!(pack.banned_phrases, vec!["guaranteed approval"]);
    }

    #[test]
    fn test_directive_for_known_jurisdiction() {
        let pack = PolicyPack::from_json(VALID_PACK).unwrap();
        assert!(pack.directive_for("UAE").contains("UAE Central Bank"));
    }

    #[test]
    fn test_directive_for_unknown_jurisdiction_falls_back() {
        let pack = PolicyPack::from_json(VALID_PACK).unwrap();
        assert_eq!(
            pack.directive_for("SG"),
            "Follow local regulations for SG."
        );
    }

    #[test]
    fn test_duplicate_phrase_rejected() {
        let json = r#"{
            "policy_pack_version": "2025-09-01",
            "banned_phrases": ["ignore policy", "Ignore Policy"],
            "required_disclaimer": "Disclaimer.",
            "jurisdiction_directives": {}
        }"#;
        let result = PolicyPack::from_json(json);
        assert!(matches!(result, Err(PackError::ValidationError(_))));
    }

    #[test]
    fn test_missing_field_rejected_by_schema() {
        let json = r#"{ "policy_pack_version": "2025-09-01" }"#;
        let result = PolicyPack::from_json(json);
        assert!(matches!(result, Err(PackError::SchemaError(_))));
    }
}

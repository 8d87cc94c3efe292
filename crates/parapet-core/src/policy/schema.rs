//! JSON Schema validation for policy packs.
//!
//! Packs are validated against schemas/policy_pack.schema.json before the
//! typed parse, so a malformed pack fails startup with field-level errors
//! instead of a bare serde message.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded pack schema (loaded at compile time).
const PACK_SCHEMA_JSON: &str = include_str!("../../../../schemas/policy_pack.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(PACK_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Validate a pack JSON value against the schema.
///
/// Returns Ok(()) if valid, or the list of validation error messages.
pub fn validate_pack_schema(pack_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(pack_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_pack() -> serde_json::Value {
        serde_json::json!({
            "policy_pack_version": "2025-09-01",
            "banned_phrases": ["guaranteed approval"],
            "required_disclaimer": "This response is based on current bank policy.",
            "jurisdiction_directives": {
                "UAE": "Follow UAE Central Bank guidance and local KYC rules."
            }
        })
    }

    #[test]
    fn test_valid_pack_passes_schema() {
        assert!(validate_pack_schema(&valid_pack()).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut pack = valid_pack();
        pack.as_object_mut().unwrap().remove("banned_phrases");

        let result = validate_pack_schema(&pack);
        assert!(result.is_err());
        assert!(!result.unwrap_err().is_empty());
    }

    #[test]
    fn test_invalid_version_format_fails() {
        let mut pack = valid_pack();
        pack["policy_pack_version"] = "v1".into();
        assert!(validate_pack_schema(&pack).is_err());
    }

    #[test]
    fn test_additional_properties_fail() {
        let mut pack = valid_pack();
        pack["unknown_field"] = "should fail".into();
        assert!(validate_pack_schema(&pack).is_err());
    }

    #[test]
    fn test_empty_phrase_fails() {
        let mut pack = valid_pack();
        pack["banned_phrases"] = serde_json::json!(["guaranteed approval", ""]);
        assert!(validate_pack_schema(&pack).is_err());
    }
}

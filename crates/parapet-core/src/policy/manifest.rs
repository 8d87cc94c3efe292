//! Document manifest parsing and corpus loading.
//!
//! The manifest is an ordered list of descriptors, each naming a source
//! content file plus the metadata the evidence filter needs. It is consumed
//! by the indexing collaborator; the guardrail core only defines the format
//! and the load-time invariants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a document manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest validation failed: {0}")]
    ValidationError(String),

    #[error("Missing document body file '{file}' for policy {policy_id}")]
    MissingBody { file: String, policy_id: String },
}

/// One manifest entry: a source content file plus citation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDescriptor {
    /// Content file, relative to the manifest's directory.
    pub file: String,
    pub title: String,
    pub jurisdiction: String,
    pub policy_id: String,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
}

/// An ordered document manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentManifest {
    pub entries: Vec<DocumentDescriptor>,
}

/// Immutable reference evidence: a manifest entry with its body text loaded.
///
/// Never mutated after load; superseded only by redeploying a new manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    pub title: String,
    pub jurisdiction: String,
    pub policy_id: String,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub body: String,
}

impl DocumentManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: DocumentManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a manifest from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the full corpus: read each descriptor's body file from
    /// `base_dir` and produce [`PolicyDocument`]s in manifest order.
    pub fn load_documents(&self, base_dir: impl AsRef<Path>) -> Result<Vec<PolicyDocument>, ManifestError> {
        let base_dir = base_dir.as_ref();
        let mut documents = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let body = fs::read_to_string(base_dir.join(&entry.file)).map_err(|_| {
                ManifestError::MissingBody {
                    file: entry.file.clone(),
                    policy_id: entry.policy_id.clone(),
                }
            })?;

            documents.push(PolicyDocument {
                title: entry.title.clone(),
                jurisdiction: entry.jurisdiction.clone(),
                policy_id: entry.policy_id.clone(),
                effective_from: entry.effective_from,
                effective_to: entry.effective_to,
                body,
            });
        }

        Ok(documents)
    }

    /// Load-time invariants: effective windows must be well-formed and
    /// policy ids unique.
    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = std::collections::HashSet::new();

        for entry in &self.entries {
            if entry.effective_from > entry.effective_to {
                return Err(ManifestError::ValidationError(format!(
                    "{}: effective_from {} is after effective_to {}",
                    entry.policy_id, entry.effective_from, entry.effective_to
                )));
            }

            if !seen.insert(&entry.policy_id) {
                return Err(ManifestError::ValidationError(format!(
                    "Duplicate policy id: {}",
                    entry.policy_id
                )));
            }
        }

        Ok(())
    }
}

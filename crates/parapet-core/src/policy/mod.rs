//! Policy pack and document manifest parsing.
//!
//! A PolicyPack is the versioned rule bundle governing allowed outputs;
//! the document manifest describes the reference corpus the retrieval
//! collaborator indexes. Both are loaded once at process start, validated,
//! and immutable for the life of the process. A version bump means a
//! redeploy, never an in-place patch.

mod manifest;
mod pack;
mod schema;

pub use manifest::{DocumentDescriptor, DocumentManifest, ManifestError, PolicyDocument};
pub use pack::{PackError, PolicyPack};

//! # parapet-runtime
//!
//! Async runtime layer for the parapet guardrail engine.
//!
//! This crate owns the non-deterministic collaborators: retrieval over a
//! policy corpus, LLM generation behind the [`GenerationProvider`] trait,
//! and the [`Pipeline`] that sequences them around the deterministic
//! engine in parapet-core. The engine never makes a network call; this
//! crate never makes a guardrail decision.

pub mod config;
pub mod index;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod retrieval;

pub use config::RuntimeConfig;
pub use index::LexicalIndex;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineError};
pub use providers::{
    Generation, GenerationConfig, GenerationProvider, ProviderError, TokenUsage,
};
pub use retrieval::{RetrievalError, Retriever};

#[cfg(feature = "openai")]
pub use providers::OpenAiProvider;

//! End-to-end guardrail pipeline.
//!
//! The pipeline wires the async collaborators (retrieval, generation)
//! around the deterministic engine in parapet-core. It implements:
//! - Input redaction before anything leaves the process
//! - Timeout-bounded retrieval that degrades to an empty pool
//! - Jurisdiction/date evidence filtering against today's date
//! - Prompt assembly from the redacted question and filtered context
//! - Deterministic finalization (output redaction, lint, decision, payload)

use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

use chrono::Utc;
use parapet_core::{
    finalize_answer, AnswerPayload, CitationBuilder, EvidenceFilter, PolicyPack, Redactor,
};

use crate::config::RuntimeConfig;
use crate::prompts;
use crate::providers::{GenerationProvider, ProviderError};
use crate::retrieval::Retriever;

/// Errors from the answer pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Pipeline not configured: {0}")]
    NotConfigured(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] ProviderError),
}

/// The answer pipeline runs one question through the full guardrail
/// sequence and returns an audited [`AnswerPayload`].
///
/// # Architecture
/// - Collaborators are trait objects: any [`Retriever`] and any
///   [`GenerationProvider`] plug in
/// - Every non-deterministic step is timeout-bounded
/// - Retrieval failure degrades to a refusal, never an error
/// - Generation failure is an error the caller must surface
pub struct Pipeline {
    pack: Arc<PolicyPack>,
    retriever: Arc<dyn Retriever>,
    provider: Arc<dyn GenerationProvider>,
    config: RuntimeConfig,
    redactor: Redactor,
    filter: EvidenceFilter,
    citations: CitationBuilder,
}

impl Pipeline {
    pub fn new(
        pack: Arc<PolicyPack>,
        retriever: Arc<dyn Retriever>,
        provider: Arc<dyn GenerationProvider>,
        config: RuntimeConfig,
    ) -> Self {
        let filter = EvidenceFilter::new(config.top_k);
        Self {
            pack,
            retriever,
            provider,
            config,
            redactor: Redactor::new(),
            filter,
            citations: CitationBuilder::new(),
        }
    }

    /// The active policy pack.
    pub fn pack(&self) -> &PolicyPack {
        &self.pack
    }

    /// Answer one question under full guardrails.
    ///
    /// # Execution Flow
    /// 1. Redact the question (nothing raw leaves the process)
    /// 2. Retrieve a candidate pool with the redacted question
    /// 3. Filter evidence by jurisdiction and effective dates
    /// 4. Generate a draft answer from the filtered context
    /// 5. Finalize: redact output, lint, decide, assemble payload
    pub async fn answer(
        &self,
        question: &str,
        jurisdiction: Option<&str>,
    ) -> Result<AnswerPayload, PipelineError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PipelineError::EmptyQuestion);
        }

        let jurisdiction = jurisdiction.unwrap_or(&self.config.default_jurisdiction);

        let span = tracing::info_span!(
            "answer",
            jurisdiction,
            policy_pack_version = %self.pack.version,
        );
        self.answer_inner(question, jurisdiction).instrument(span).await
    }

    async fn answer_inner(
        &self,
        question: &str,
        jurisdiction: &str,
    ) -> Result<AnswerPayload, PipelineError> {
        // Redact before retrieval so the raw question never reaches a
        // backend or a log line.
        let (redacted_question, pre_redactions) = self.redactor.redact(question);
        if !pre_redactions.is_empty() {
            tracing::info!(
                categories = pre_redactions.len(),
                "Masked sensitive data in question"
            );
        }

        let pool = self.retrieve_pool(&redacted_question).await;
        let outcome = self
            .filter
            .filter(&pool, jurisdiction, Utc::now().date_naive());
        let bundle = self.citations.build(&outcome.retained);

        let directive = self.pack.directive_for(jurisdiction);
        let system = prompts::system_prompt(&directive);
        let user = prompts::user_prompt(&redacted_question, &bundle.context_block);

        let generation = tokio::time::timeout(
            self.config.generation.timeout,
            self.provider.generate(&system, &user, &self.config.generation),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.config.generation.timeout))??;

        Ok(finalize_answer(
            &self.pack,
            &generation.text,
            outcome.evidence_present(),
            jurisdiction,
            bundle.citations,
            pre_redactions,
            &generation.model,
        ))
    }

    /// Retrieve the candidate pool with a timeout. Failure and timeout
    /// both degrade to an empty pool; the decision stage turns that into
    /// a refusal downstream.
    async fn retrieve_pool(&self, query: &str) -> Vec<parapet_core::RetrievedChunk> {
        let search = self.retriever.search(query, self.config.pool_size);

        match tokio::time::timeout(self.config.retrieval_timeout, search).await {
            Ok(Ok(pool)) => pool,
            Ok(Err(e)) => {
                tracing::warn!(
                    retriever = self.retriever.name(),
                    error = %e,
                    "Retrieval failed, continuing with empty pool"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    retriever = self.retriever.name(),
                    timeout = ?self.config.retrieval_timeout,
                    "Retrieval timed out, continuing with empty pool"
                );
                Vec::new()
            }
        }
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    pack: Option<Arc<PolicyPack>>,
    retriever: Option<Arc<dyn Retriever>>,
    provider: Option<Arc<dyn GenerationProvider>>,
    config: RuntimeConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            pack: None,
            retriever: None,
            provider: None,
            config: RuntimeConfig::default(),
        }
    }

    pub fn pack(mut self, pack: PolicyPack) -> Self {
        self.pack = Some(Arc::new(pack));
        self
    }

    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let pack = self
            .pack
            .ok_or_else(|| PipelineError::NotConfigured("No policy pack set".to_string()))?;
        let retriever = self
            .retriever
            .ok_or_else(|| PipelineError::NotConfigured("No retriever set".to_string()))?;
        let provider = self
            .provider
            .ok_or_else(|| PipelineError::NotConfigured("No generation provider set".to_string()))?;

        Ok(Pipeline::new(pack, retriever, provider, self.config))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Command-line entry point for the parapet guardrail service.

mod routes;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use parapet_core::{DocumentManifest, PolicyPack};
use parapet_runtime::{LexicalIndex, OpenAiProvider, Pipeline, PipelineBuilder};

#[derive(Parser)]
#[command(name = "parapet")]
#[command(about = "Guardrailed banking policy copilot", version)]
struct Cli {
    /// Policy pack file (JSON or YAML)
    #[arg(long, default_value = "packs/policy_pack.json", global = true)]
    pack: PathBuf,

    /// Policy document manifest
    #[arg(long, default_value = "data/policies/docs_manifest.json", global = true)]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },

    /// Answer one question and print the audited payload as JSON
    Ask {
        /// The question to answer
        question: String,

        /// Jurisdiction code (defaults to the runtime default)
        #[arg(short, long)]
        jurisdiction: Option<String>,
    },

    /// Validate the policy pack and document manifest, then exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { addr } => {
            let pipeline = build_pipeline(&cli.pack, &cli.manifest)?;
            server::run(addr, Arc::new(pipeline)).await
        }
        Commands::Ask {
            question,
            jurisdiction,
        } => {
            let pipeline = build_pipeline(&cli.pack, &cli.manifest)?;
            let payload = pipeline
                .answer(&question, jurisdiction.as_deref())
                .await
                .context("Pipeline failed")?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Commands::Check => check(&cli.pack, &cli.manifest),
    }
}

/// Load the pack and corpus, build the lexical index, and wire the
/// pipeline with the OpenAI provider.
fn build_pipeline(pack_path: &PathBuf, manifest_path: &PathBuf) -> anyhow::Result<Pipeline> {
    let pack = PolicyPack::from_path(pack_path)
        .with_context(|| format!("Failed to load policy pack from {}", pack_path.display()))?;
    pack.validate().context("Policy pack is invalid")?;

    let manifest = DocumentManifest::from_path(manifest_path).with_context(|| {
        format!(
            "Failed to load document manifest from {}",
            manifest_path.display()
        )
    })?;
    let base_dir = manifest_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let documents = manifest
        .load_documents(&base_dir)
        .context("Failed to load policy documents")?;

    let index = LexicalIndex::build(&documents);
    tracing::info!(
        documents = documents.len(),
        chunks = index.len(),
        pack_version = %pack.version,
        "Corpus indexed"
    );

    let provider = OpenAiProvider::from_env().context("OpenAI provider not configured")?;

    let pipeline = PipelineBuilder::new()
        .pack(pack)
        .retriever(Arc::new(index))
        .provider(Arc::new(provider))
        .build()?;

    Ok(pipeline)
}

/// Validate configuration without touching the network.
fn check(pack_path: &PathBuf, manifest_path: &PathBuf) -> anyhow::Result<()> {
    let pack = PolicyPack::from_path(pack_path)
        .with_context(|| format!("Failed to load policy pack from {}", pack_path.display()))?;
    pack.validate().context("Policy pack is invalid")?;
    println!(
        "pack ok: version {} ({} banned phrases, {} jurisdictions)",
        pack.version,
        pack.banned_phrases.len(),
        pack.directives.len()
    );

    let manifest = DocumentManifest::from_path(manifest_path).with_context(|| {
        format!(
            "Failed to load document manifest from {}",
            manifest_path.display()
        )
    })?;
    let base_dir = manifest_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let documents = manifest.load_documents(&base_dir)?;
    println!("manifest ok: {} documents with bodies", documents.len());

    Ok(())
}

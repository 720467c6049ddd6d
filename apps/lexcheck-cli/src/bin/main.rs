use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lexcheck_embed::GeminiClient;
use lexcheck_review::parser::parse_uploaded_doc;
use lexcheck_review::{check_against_checklist, Annotator, ComplianceChecker, GeminiGenerator, ReviewPipeline};

#[derive(Parser)]
#[command(name = "lexcheck", version, about = "ADGM document compliance assistant")]
struct Cli {
    /// Directory holding config.toml.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the reference index.
    Build {
        /// Reference corpus directory (defaults to `paths.reference_dir`).
        reference_dir: Option<PathBuf>,
    },
    /// Print the reference chunks closest to a query.
    Retrieve {
        query: String,
        /// Number of results (defaults to `retrieval.top_k`).
        #[arg(short, long)]
        k: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Review a DOCX upload and write an annotated copy.
    Review {
        document: PathBuf,
        /// Checklist process (defaults to `review.process`).
        #[arg(long)]
        process: Option<String>,
        /// Fail instead of building a missing index.
        #[arg(long)]
        no_auto_build: bool,
    },
    /// Classify a DOCX upload and compare it with the checklist.
    Classify {
        document: PathBuf,
        #[arg(long)]
        process: Option<String>,
    },
    /// List models available to the configured API key.
    Models,
}

fn main() -> Result<()> {
    lexcheck_cli::init();
    let cli = Cli::parse();
    let settings = lexcheck_cli::load_settings(cli.config_dir.as_deref())?;

    match cli.command {
        Command::Build { reference_dir } => {
            let reference_dir = reference_dir.unwrap_or_else(|| settings.paths.reference_dir());
            let embedder = lexcheck_cli::embedder(&settings, None)?;
            let report = lexcheck_cli::index_builder(&settings, embedder, true).build(&reference_dir)?;
            println!("Indexed {} chunks from {} files", report.chunks, report.files_indexed);
        }
        Command::Retrieve { query, k, json } => {
            let embedder = lexcheck_cli::embedder(&settings, None)?;
            let hits = lexcheck_cli::retriever(&settings, embedder).retrieve(&query, k.unwrap_or(settings.retrieval.top_k))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for (rank, hit) in hits.iter().enumerate() {
                    println!("{}. [{}] (distance {:.4})\n   {}\n", rank + 1, hit.file, hit.distance, hit.text);
                }
            }
        }
        Command::Review { document, process, no_auto_build } => {
            let client = GeminiClient::from_settings(&settings.provider).context("creating Gemini client")?;
            let embedder = lexcheck_cli::embedder(&settings, Some(&client))?;
            let generator = GeminiGenerator::from_settings(client, &settings.generation);
            let pipeline = ReviewPipeline::new(
                lexcheck_cli::index_builder(&settings, embedder.clone(), true),
                lexcheck_cli::retriever(&settings, embedder),
                ComplianceChecker::new(Arc::new(generator)),
                Annotator::new(settings.paths.output_dir()),
                settings.paths.reference_dir(),
            )
            .with_process(process.unwrap_or_else(|| settings.review.process.clone()))
            .with_top_k(settings.retrieval.top_k)
            .with_auto_build(settings.review.auto_build_index && !no_auto_build);

            let outcome = pipeline.review(&document).with_context(|| format!("reviewing {}", document.display()))?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Classify { document, process } => {
            let parsed = parse_uploaded_doc(&document)?;
            let process = process.unwrap_or_else(|| settings.review.process.clone());
            let report = check_against_checklist(&[parsed.document_type], &process);
            println!("Document type: {}", parsed.document_type);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Models => {
            let client = GeminiClient::from_settings(&settings.provider)?;
            for model in client.list_models()? {
                println!("{}", model.name);
            }
        }
    }
    Ok(())
}

//! Wiring shared by the `lexcheck` binaries: environment, logging, settings
//! and construction of the pipeline components from them.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use lexcheck_core::config::{Config, Settings};
use lexcheck_core::data_processor::{ChunkingConfig, DataProcessor};
use lexcheck_core::traits::Embedder;
use lexcheck_embed::{select_embedder, GeminiClient};
use lexcheck_text::ExtractorRegistry;
use lexcheck_vector::{IndexBuilder, IndexPaths, Retriever};

/// Load `.env`, install the log subscriber (`RUST_LOG`, default `info`).
pub fn init() {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

pub fn load_settings(config_dir: Option<&Path>) -> Result<Settings> {
    let config = match config_dir {
        Some(dir) => Config::load_from(dir),
        None => Config::load(),
    }
    .context("loading configuration")?;
    Ok(config.settings()?)
}

pub fn index_paths(settings: &Settings) -> IndexPaths {
    IndexPaths::from_settings(&settings.paths)
}

pub fn embedder(settings: &Settings, client: Option<&GeminiClient>) -> Result<Arc<dyn Embedder>> {
    let embedder = select_embedder(settings, client).context("creating embedder")?;
    Ok(Arc::from(embedder))
}

pub fn index_builder(settings: &Settings, embedder: Arc<dyn Embedder>, show_progress: bool) -> IndexBuilder {
    let processor = DataProcessor::with_chunking(ChunkingConfig { max_words: settings.retrieval.chunk_size });
    IndexBuilder::new(Arc::new(ExtractorRegistry::with_defaults()), embedder, index_paths(settings))
        .with_processor(processor)
        .with_progress(show_progress)
}

pub fn retriever(settings: &Settings, embedder: Arc<dyn Embedder>) -> Retriever {
    Retriever::new(embedder, index_paths(settings))
}

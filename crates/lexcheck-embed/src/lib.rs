//! lexcheck-embed
//!
//! Embedding backends: the Gemini `embedContent` API and a deterministic fake
//! used offline. [`select_embedder`] picks one from settings.

pub mod client;
pub mod fake;
pub mod gemini;

use tracing::info;

use lexcheck_core::config::{EmbeddingBackend, Settings};
use lexcheck_core::traits::Embedder;
use lexcheck_core::Result;

pub use client::{GeminiClient, ModelInfo};
pub use fake::FakeEmbedder;
pub use gemini::GeminiEmbedder;

/// `APP_USE_FAKE_EMBEDDINGS=1` (or `true`) forces the fake backend.
pub fn fake_requested_by_env() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The embedder configured in `settings`. A Gemini embedder reuses `client`
/// when given, otherwise builds one from the provider settings.
pub fn select_embedder(settings: &Settings, client: Option<&GeminiClient>) -> Result<Box<dyn Embedder>> {
    if settings.embedding.backend == EmbeddingBackend::Fake || fake_requested_by_env() {
        info!(dim = settings.embedding.fake_dimension, "using fake embedder");
        return Ok(Box::new(FakeEmbedder::new(settings.embedding.fake_dimension)));
    }
    let client = match client {
        Some(client) => client.clone(),
        None => GeminiClient::from_settings(&settings.provider)?,
    };
    info!(model = %settings.embedding.model, "using gemini embedder");
    Ok(Box::new(GeminiEmbedder::new(client, &settings.embedding.model)))
}

pub fn get_default_embedder(settings: &Settings) -> Result<Box<dyn Embedder>> {
    select_embedder(settings, None)
}

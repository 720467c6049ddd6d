use serde::{Deserialize, Serialize};
use tracing::debug;

use lexcheck_core::traits::Embedder;
use lexcheck_core::{Error, Result};

use crate::client::{model_path, Content, GeminiClient, PROVIDER};

/// Embeds one text per `embedContent` call. No caching, batching or retry.
pub struct GeminiEmbedder {
    client: GeminiClient,
    model: String,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(client: GeminiClient, model: &str) -> Self {
        Self { client, model: model_path(model) }
    }
}

impl Embedder for GeminiEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedContentRequest { model: &self.model, content: Content::text(text) };
        let path = format!("v1beta/{}:embedContent", self.model);
        let response: EmbedContentResponse = self.client.post_json(&path, &request)?;
        let values = response.embedding.values;
        if values.is_empty() {
            return Err(Error::provider(PROVIDER, format!("{} returned an empty embedding", self.model)));
        }
        debug!(model = %self.model, dim = values.len(), chars = text.len(), "embedded text");
        Ok(values)
    }
}

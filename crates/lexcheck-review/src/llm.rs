use serde::{Deserialize, Serialize};
use tracing::debug;

use lexcheck_core::config::GenerationSettings;
use lexcheck_core::traits::LanguageModel;
use lexcheck_core::{Error, Result};
use lexcheck_embed::client::{model_path, Content, GeminiClient, PROVIDER};

/// Sampling options sent with every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl From<&GenerationSettings> for GenerationOptions {
    fn from(settings: &GenerationSettings) -> Self {
        Self { temperature: settings.temperature, max_output_tokens: settings.max_output_tokens }
    }
}

/// Text generation through Gemini `generateContent`.
pub struct GeminiGenerator {
    client: GeminiClient,
    model: String,
    options: GenerationOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationOptions,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient, model: &str, options: GenerationOptions) -> Self {
        Self { client, model: model_path(model), options }
    }

    pub fn from_settings(client: GeminiClient, settings: &GenerationSettings) -> Self {
        Self::new(client, &settings.model, GenerationOptions::from(settings))
    }
}

impl LanguageModel for GeminiGenerator {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest { contents: vec![Content::text(prompt)], generation_config: self.options };
        let path = format!("v1beta/{}:generateContent", self.model);
        let response: GenerateContentResponse = self.client.post_json(&path, &request)?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let feedback = response.prompt_feedback.map(|f| f.to_string()).unwrap_or_default();
            return Err(Error::provider(PROVIDER, format!("{} returned no candidates {feedback}", self.model)));
        };
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
            return Err(Error::provider(PROVIDER, format!("{} returned no text (finish reason {reason})", self.model)));
        }
        debug!(model = %self.model, chars = text.len(), "generated");
        Ok(text)
    }
}

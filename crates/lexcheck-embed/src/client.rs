//! Blocking HTTP client for the Gemini REST API.
//!
//! One `GeminiClient` carries the credentials and base URL and is cloned into
//! every component that talks to the provider.

use std::env;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lexcheck_core::config::ProviderSettings;
use lexcheck_core::{Error, Result};

pub const PROVIDER: &str = "gemini";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::provider(PROVIDER, format!("http client build: {e}")))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from settings, reading the API key from the configured
    /// environment variable.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let api_key = env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::InvalidConfig(format!("environment variable {} is not set", settings.api_key_env))
            })?;
        Self::new(api_key, settings.base_url.clone(), Duration::from_secs(settings.timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .map_err(|e| Error::provider(PROVIDER, format!("POST {url}: {e}")))?;
        read_json(resp, &url)
    }

    pub fn get_json<R: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<R> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .map_err(|e| Error::provider(PROVIDER, format!("GET {url}: {e}")))?;
        read_json(resp, &url)
    }

    /// Every model visible to the API key, following pagination.
    pub fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let query: Vec<(&str, &str)> = match page_token.as_deref() {
                Some(token) => vec![("pageToken", token)],
                None => Vec::new(),
            };
            let page: ListModelsResponse = self.get_json("v1beta/models", &query)?;
            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(models)
    }
}

fn read_json<R: DeserializeOwned>(resp: Response, url: &str) -> Result<R> {
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| Error::provider(PROVIDER, format!("read body from {url}: {e}")))?;
    if !status.is_success() {
        return Err(Error::provider(PROVIDER, format!("{url} returned {status}; body: {body}")));
    }
    serde_json::from_str(&body).map_err(|e| Error::provider(PROVIDER, format!("parse response from {url}: {e}")))
}

/// Qualify a bare model name with the `models/` collection.
pub fn model_path(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Request content made of text parts.
#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    pub fn text(text: &'a str) -> Self {
        Self { parts: vec![Part { text }] }
    }
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

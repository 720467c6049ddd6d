//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars. Nested keys use `__` in env vars, e.g.
//! `APP_EMBEDDING__MODEL=models/embedding-001`.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration files from `dir` instead of the working directory.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub provider: ProviderSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub retrieval: RetrievalSettings,
    pub review: ReviewSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.retrieval.chunk_size == 0 {
            return Err(Error::InvalidConfig("retrieval.chunk_size must be greater than zero".into()));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::InvalidConfig("retrieval.top_k must be greater than zero".into()));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(Error::InvalidConfig("embedding.model must not be empty".into()));
        }
        if self.generation.model.trim().is_empty() {
            return Err(Error::InvalidConfig("generation.model must not be empty".into()));
        }
        Ok(())
    }
}

/// Locations of the reference corpus, the persisted index pair and review output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathSettings {
    pub reference_dir: String,
    pub index_dir: String,
    pub index_file: String,
    pub mapping_file: String,
    pub output_dir: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            reference_dir: "data/reference_docs".to_string(),
            index_dir: "data/embeddings".to_string(),
            index_file: "reference.index".to_string(),
            mapping_file: "doc_mapping.bin".to_string(),
            output_dir: "outputs".to_string(),
        }
    }
}

impl PathSettings {
    pub fn reference_dir(&self) -> PathBuf {
        expand_path(&self.reference_dir)
    }

    pub fn index_dir(&self) -> PathBuf {
        expand_path(&self.index_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        resolve_with_base(&self.index_dir(), &self.index_file)
    }

    pub fn mapping_path(&self) -> PathBuf {
        resolve_with_base(&self.index_dir(), &self.mapping_file)
    }

    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.output_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    Gemini,
    Fake,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub model: String,
    pub fake_dimension: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Gemini,
            model: "models/text-embedding-004".to_string(),
            fake_dimension: 768,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { model: "gemini-2.5-pro".to_string(), temperature: Some(0.0), max_output_tokens: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Maximum words per chunk.
    pub chunk_size: usize,
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { chunk_size: 500, top_k: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewSettings {
    pub process: String,
    /// Build the reference index before reviewing when it is missing.
    pub auto_build_index: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self { process: "Company Incorporation".to_string(), auto_build_index: true }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

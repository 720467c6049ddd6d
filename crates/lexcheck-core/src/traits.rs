use std::path::Path;

use crate::error::Result;

/// Pulls plain text out of one file.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Maps a text to a fixed-dimension vector.
pub trait Embedder: Send + Sync {
    /// Identifier of the model producing the vectors, e.g. `models/text-embedding-004`.
    fn model_id(&self) -> &str;
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Single-prompt text generation.
pub trait LanguageModel: Send + Sync {
    fn model_id(&self) -> &str;
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for Box<T> {
    fn extract(&self, path: &Path) -> Result<String> {
        (**self).extract(path)
    }
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

impl<T: LanguageModel + ?Sized> LanguageModel for Box<T> {
    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    MissingInput(String),

    #[error(
        "Reference index not built yet (expected {} and {}); run the indexer first",
        .index.display(),
        .mapping.display()
    )]
    NotBuilt { index: PathBuf, mapping: PathBuf },

    #[error("No content: no file under {} produced any text to index", .0.display())]
    NoContent(PathBuf),

    #[error("Failed to extract text from {}: {message}", .path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid persisted data: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn extraction(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Extraction { path: path.into(), message: message.to_string() }
    }

    pub fn provider(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::Provider { provider: provider.into(), message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

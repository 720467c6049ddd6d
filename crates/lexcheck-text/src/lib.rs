//! lexcheck-text
//!
//! Plain-text extraction for reference and uploaded documents. Each format is
//! a [`TextExtractor`] strategy looked up by lowercase file extension in an
//! [`ExtractorRegistry`]; new formats are added with [`ExtractorRegistry::register`].

pub mod docx;
pub mod json;
pub mod pdf;
pub mod plain;

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::trace;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

pub use docx::DocxExtractor;
pub use json::JsonRecordExtractor;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;

pub struct ExtractorRegistry {
    strategies: HashMap<String, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// A registry that knows no formats; every file extracts to empty text.
    pub fn empty() -> Self {
        Self { strategies: HashMap::new() }
    }

    /// PDF, DOCX, plain text and JSON record files.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry
            .register("pdf", PdfExtractor)
            .register("docx", DocxExtractor)
            .register("txt", PlainTextExtractor)
            .register("json", JsonRecordExtractor);
        registry
    }

    /// Register (or replace) the strategy for `extension` (case-insensitive, no dot).
    pub fn register(&mut self, extension: &str, extractor: impl TextExtractor + 'static) -> &mut Self {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        self.strategies.insert(key, Box::new(extractor));
        self
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.strategy_for(path).is_some()
    }

    fn strategy_for(&self, path: &Path) -> Option<&dyn TextExtractor> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.strategies.get(&ext).map(|s| s.as_ref())
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TextExtractor for ExtractorRegistry {
    /// Extract with the strategy registered for the file's extension and trim
    /// the result. Unsupported extensions yield empty text.
    fn extract(&self, path: &Path) -> Result<String> {
        match self.strategy_for(path) {
            Some(strategy) => Ok(strategy.extract(path)?.trim().to_string()),
            None => {
                trace!(file = %path.display(), "unsupported extension");
                Ok(String::new())
            }
        }
    }
}

pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| read_error(path, e))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| read_error(path, e))
}

fn read_error(path: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::MissingInput(format!("file {}", path.display()))
    } else {
        Error::extraction(path, e)
    }
}

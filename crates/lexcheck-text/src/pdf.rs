use std::path::Path;

use pdf_oxide::PdfDocument;
use tracing::debug;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

/// Text of every page in page order, one page per line block.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(Error::MissingInput(format!("file {}", path.display())));
        }
        let path_str = path.to_string_lossy();
        let mut doc = PdfDocument::open(path_str.as_ref()).map_err(|e| Error::extraction(path, e))?;
        let page_count = doc.page_count().map_err(|e| Error::extraction(path, e))?;
        let mut text = String::new();
        for page_index in 0..page_count {
            let page = doc.extract_text(page_index).map_err(|e| Error::extraction(path, e))?;
            text.push_str(&page);
            text.push('\n');
        }
        debug!(file = %path.display(), pages = page_count, "extracted pdf");
        Ok(text)
    }
}

use std::path::Path;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

use crate::read_bytes;

/// UTF-8 text files, read verbatim.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        String::from_utf8(read_bytes(path)?).map_err(|e| Error::extraction(path, e))
    }
}

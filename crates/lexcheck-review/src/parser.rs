use std::path::Path;

use serde::Serialize;

use lexcheck_core::{Error, Result};
use lexcheck_text::docx::read_paragraphs;

use crate::classify::{classify_document, DocumentType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub document_type: DocumentType,
    pub document_text: String,
}

/// Non-blank body paragraphs of a DOCX file, trimmed and joined by newlines.
pub fn extract_docx_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::MissingInput(format!("file {}", path.display())));
    }
    let paragraphs = read_paragraphs(path)?;
    Ok(paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn parse_uploaded_doc(path: &Path) -> Result<ParsedDocument> {
    let document_text = extract_docx_text(path)?;
    Ok(ParsedDocument { document_type: classify_document(&document_text), document_text })
}

use serde::{Deserialize, Serialize};

use crate::classify::DocumentType;

pub const COMPANY_INCORPORATION: &str = "Company Incorporation";

/// Documents a process requires. Unknown processes require nothing.
pub fn required_documents(process: &str) -> &'static [DocumentType] {
    match process {
        COMPANY_INCORPORATION => &DocumentType::KNOWN,
        _ => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistReport {
    pub process: String,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub missing_documents: Vec<DocumentType>,
}

/// Compare detected document types with what `process` requires.
pub fn check_against_checklist(detected: &[DocumentType], process: &str) -> ChecklistReport {
    let required = required_documents(process);
    ChecklistReport {
        process: process.to_string(),
        documents_uploaded: detected.len(),
        required_documents: required.len(),
        missing_documents: required.iter().copied().filter(|doc| !detected.contains(doc)).collect(),
    }
}

//! lexcheck-review
//!
//! Compliance review of uploaded corporate documents: classification,
//! checklist comparison, model-based issue detection grounded in retrieved
//! reference text, and DOCX annotation.

pub mod annotate;
pub mod checker;
pub mod checklist;
pub mod classify;
pub mod issues;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompt;

pub use annotate::{Annotator, Placement};
pub use checker::ComplianceChecker;
pub use checklist::{check_against_checklist, ChecklistReport};
pub use classify::{classify_document, DocumentType};
pub use issues::{ComplianceIssue, IssueReport, ParsedIssues, RawIssueText};
pub use llm::{GeminiGenerator, GenerationOptions};
pub use parser::{parse_uploaded_doc, ParsedDocument};
pub use pipeline::{retrieval_query, ReviewOutcome, ReviewPipeline};

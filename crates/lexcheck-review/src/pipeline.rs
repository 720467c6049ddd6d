use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use lexcheck_core::Result;
use lexcheck_vector::{format_context, BuildReport, IndexBuilder, Retriever};

use crate::annotate::Annotator;
use crate::checker::ComplianceChecker;
use crate::checklist::{check_against_checklist, ChecklistReport};
use crate::classify::DocumentType;
use crate::issues::IssueReport;
use crate::parser::parse_uploaded_doc;

/// Result of reviewing one uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub document_type: DocumentType,
    pub checklist_result: ChecklistReport,
    pub issues: IssueReport,
    pub reviewed_path: PathBuf,
}

pub struct ReviewPipeline {
    builder: IndexBuilder,
    retriever: Retriever,
    checker: ComplianceChecker,
    annotator: Annotator,
    reference_dir: PathBuf,
    process: String,
    top_k: usize,
    auto_build_index: bool,
}

/// Retrieval query used for a document type.
pub fn retrieval_query(document_type: DocumentType) -> String {
    format!("{document_type} ADGM requirements and related regulatory clauses")
}

impl ReviewPipeline {
    pub fn new(
        builder: IndexBuilder,
        retriever: Retriever,
        checker: ComplianceChecker,
        annotator: Annotator,
        reference_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            retriever,
            checker,
            annotator,
            reference_dir: reference_dir.into(),
            process: crate::checklist::COMPANY_INCORPORATION.to_string(),
            top_k: lexcheck_vector::DEFAULT_TOP_K,
            auto_build_index: true,
        }
    }

    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.process = process.into();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_auto_build(mut self, auto_build_index: bool) -> Self {
        self.auto_build_index = auto_build_index;
        self
    }

    /// Build the reference index when it is missing. Returns the build report
    /// when a build happened.
    pub fn ensure_index(&self) -> Result<Option<BuildReport>> {
        if self.builder.paths().exists() {
            return Ok(None);
        }
        info!(reference_dir = %self.reference_dir.display(), "reference index missing, building");
        self.builder.build(&self.reference_dir).map(Some)
    }

    pub fn review(&self, document: &Path) -> Result<ReviewOutcome> {
        if self.auto_build_index {
            self.ensure_index()?;
        }
        let parsed = parse_uploaded_doc(document)?;
        info!(file = %document.display(), document_type = %parsed.document_type, "parsed upload");

        let checklist_result = check_against_checklist(&[parsed.document_type], &self.process);
        let hits = self.retriever.retrieve(&retrieval_query(parsed.document_type), self.top_k)?;
        let context = format_context(&hits);
        let issues = self.checker.check(&parsed.document_text, Some(&context))?;
        let reviewed_path = self.annotator.annotate(document, issues.issues())?;

        Ok(ReviewOutcome { document_type: parsed.document_type, checklist_result, issues, reviewed_path })
    }
}

use std::sync::Arc;

use tracing::info;

use lexcheck_core::traits::LanguageModel;
use lexcheck_core::Result;

use crate::issues::IssueReport;
use crate::prompt::compliance_prompt;

/// Asks a language model to review one document against reference context.
pub struct ComplianceChecker {
    model: Arc<dyn LanguageModel>,
}

impl ComplianceChecker {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn check(&self, document_text: &str, context: Option<&str>) -> Result<IssueReport> {
        let prompt = compliance_prompt(document_text, context);
        let response = self.model.generate(&prompt)?;
        let report = IssueReport::from_response(&response);
        info!(
            model = %self.model.model_id(),
            parsed = report.is_parsed(),
            issues = report.issues().len(),
            "compliance check done"
        );
        Ok(report)
    }
}

pub const NO_CONTEXT: &str = "No additional context.";

/// Review prompt for one document, with optional retrieved reference context.
pub fn compliance_prompt(document_text: &str, context: Option<&str>) -> String {
    let context = context.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(NO_CONTEXT);
    format!(
        "You are an ADGM compliance assistant.
Task: Review the provided document for:
  - Missing clauses
  - Wrong jurisdiction (should be ADGM)
  - Missing signatory blocks
  - Non-compliance with ADGM templates
Provide output in JSON format with keys: document, section, issue, severity, suggestion.

Context from ADGM reference docs:
{context}

Document Text:
{document_text}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_falls_back() {
        let prompt = compliance_prompt("Clause 1", Some("  "));
        assert!(prompt.contains("Context from ADGM reference docs:\nNo additional context.\n"));
        assert!(prompt.ends_with("Document Text:\nClause 1\n"));
    }

    #[test]
    fn lists_required_keys() {
        let prompt = compliance_prompt("x", Some("[reg.pdf]\nSection 5"));
        assert!(prompt.contains("keys: document, section, issue, severity, suggestion"));
        assert!(prompt.contains("[reg.pdf]\nSection 5"));
    }
}

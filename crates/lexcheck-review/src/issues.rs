//! Interpretation of the model's review response.
//!
//! A response is either JSON ([`IssueReport::Parsed`]) or free text kept as-is
//! ([`IssueReport::Raw`]). Issues are read leniently from the JSON so that
//! partially conforming answers still annotate.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ComplianceIssue {
    /// Read an issue from a JSON object. Non-string scalars are stringified,
    /// nulls count as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            document: field(obj, "document"),
            section: field(obj, "section"),
            issue: field(obj, "issue").unwrap_or_default(),
            severity: field(obj, "severity"),
            suggestion: field(obj, "suggestion"),
        })
    }

    /// `[severity] issue | Suggestion: suggestion`, severity defaulting to `Info`.
    pub fn comment_text(&self) -> String {
        format!(
            "[{}] {} | Suggestion: {}",
            self.severity.as_deref().unwrap_or("Info"),
            self.issue,
            self.suggestion.as_deref().unwrap_or("")
        )
    }
}

fn field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIssues {
    /// The response JSON as returned.
    pub value: Value,
    pub issues: Vec<ComplianceIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIssueText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueReport {
    Parsed(ParsedIssues),
    Raw(RawIssueText),
}

impl IssueReport {
    /// Parse a model response, tolerating a surrounding markdown code fence.
    pub fn from_response(response: &str) -> Self {
        match serde_json::from_str::<Value>(strip_code_fence(response)) {
            Ok(value) => {
                let issues = extract_issues(&value);
                IssueReport::Parsed(ParsedIssues { value, issues })
            }
            Err(_) => IssueReport::Raw(RawIssueText { text: response.trim().to_string() }),
        }
    }

    /// Issues available for annotation; none for a raw report.
    pub fn issues(&self) -> &[ComplianceIssue] {
        match self {
            IssueReport::Parsed(parsed) => &parsed.issues,
            IssueReport::Raw(_) => &[],
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, IssueReport::Parsed(_))
    }
}

impl Serialize for IssueReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IssueReport::Parsed(parsed) => parsed.value.serialize(serializer),
            IssueReport::Raw(raw) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("issues_raw", &raw.text)?;
                map.end()
            }
        }
    }
}

/// Issues from a top-level array, an `issues_found` or `issues` array, or a
/// single issue object.
pub fn extract_issues(value: &Value) -> Vec<ComplianceIssue> {
    match value {
        Value::Array(items) => items.iter().filter_map(ComplianceIssue::from_value).collect(),
        Value::Object(obj) => {
            let list = ["issues_found", "issues"].iter().find_map(|key| obj.get(*key).and_then(Value::as_array));
            match list {
                Some(items) => items.iter().filter_map(ComplianceIssue::from_value).collect(),
                None if obj.contains_key("issue") => ComplianceIssue::from_value(value).into_iter().collect(),
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_json_is_parsed() {
        let response = "```json\n{\"issues_found\": [{\"section\": \"Clause 3.1\", \"issue\": \"Wrong courts\", \"severity\": \"High\"}]}\n```";
        let report = IssueReport::from_response(response);
        assert!(report.is_parsed());
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.issues()[0].section.as_deref(), Some("Clause 3.1"));
    }

    #[test]
    fn prose_is_kept_raw() {
        let report = IssueReport::from_response("  The document looks fine overall.\n");
        assert_eq!(report, IssueReport::Raw(RawIssueText { text: "The document looks fine overall.".into() }));
        assert!(report.issues().is_empty());
        assert_eq!(serde_json::to_value(&report).unwrap(), json!({"issues_raw": "The document looks fine overall."}));
    }

    #[test]
    fn parsed_report_serializes_original_json() {
        let report = IssueReport::from_response(r#"[{"issue": "Missing signature", "severity": 2}]"#);
        assert_eq!(serde_json::to_value(&report).unwrap(), json!([{"issue": "Missing signature", "severity": 2}]));
        assert_eq!(report.issues()[0].severity.as_deref(), Some("2"));
    }

    #[test]
    fn single_issue_object() {
        let issues = extract_issues(&json!({"document": "AoA", "issue": "No ADGM reference", "section": null}));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section, None);
        assert_eq!(issues[0].document.as_deref(), Some("AoA"));
    }

    #[test]
    fn unrelated_json_has_no_issues() {
        assert!(extract_issues(&json!({"summary": "ok"})).is_empty());
        assert!(extract_issues(&json!("text")).is_empty());
    }

    #[test]
    fn comment_text_defaults() {
        let issue = ComplianceIssue { issue: "Missing clause".into(), ..Default::default() };
        assert_eq!(issue.comment_text(), "[Info] Missing clause | Suggestion: ");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Corporate document kinds recognised by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Articles of Association")]
    ArticlesOfAssociation,
    #[serde(rename = "Memorandum of Association")]
    MemorandumOfAssociation,
    #[serde(rename = "Board Resolution")]
    BoardResolution,
    #[serde(rename = "UBO Declaration Form")]
    UboDeclarationForm,
    #[serde(rename = "Register of Members and Directors")]
    RegisterOfMembersAndDirectors,
    #[serde(rename = "Unknown Document")]
    Unknown,
}

impl DocumentType {
    /// Known types in classification order.
    pub const KNOWN: [DocumentType; 5] = [
        DocumentType::ArticlesOfAssociation,
        DocumentType::MemorandumOfAssociation,
        DocumentType::BoardResolution,
        DocumentType::UboDeclarationForm,
        DocumentType::RegisterOfMembersAndDirectors,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::ArticlesOfAssociation => "Articles of Association",
            DocumentType::MemorandumOfAssociation => "Memorandum of Association",
            DocumentType::BoardResolution => "Board Resolution",
            DocumentType::UboDeclarationForm => "UBO Declaration Form",
            DocumentType::RegisterOfMembersAndDirectors => "Register of Members and Directors",
            DocumentType::Unknown => "Unknown Document",
        }
    }

    /// Lowercase substrings that identify the type.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            DocumentType::ArticlesOfAssociation => &["articles of association", "aoa"],
            DocumentType::MemorandumOfAssociation => &["memorandum of association", "moa", "mou"],
            DocumentType::BoardResolution => &["board resolution", "board of directors"],
            DocumentType::UboDeclarationForm => &["ubo", "ultimate beneficial owner"],
            DocumentType::RegisterOfMembersAndDirectors => &["register of members", "register of directors"],
            DocumentType::Unknown => &[],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First known type with any keyword in `text` (case-insensitive substring).
/// Keywords are plain substrings, so short ones like "aoa" also match inside words.
pub fn classify_document(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    DocumentType::KNOWN
        .into_iter()
        .find(|ty| ty.keywords().iter().any(|kw| lower.contains(kw)))
        .unwrap_or(DocumentType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_types_win() {
        let text = "Resolution of the Board of Directors adopting the Articles of Association";
        assert_eq!(classify_document(text), DocumentType::ArticlesOfAssociation);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_document("ULTIMATE BENEFICIAL OWNER declaration"), DocumentType::UboDeclarationForm);
        assert_eq!(classify_document("Register of Directors"), DocumentType::RegisterOfMembersAndDirectors);
    }

    #[test]
    fn nothing_matches() {
        assert_eq!(classify_document("Lease agreement"), DocumentType::Unknown);
        assert_eq!(DocumentType::Unknown.to_string(), "Unknown Document");
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&DocumentType::BoardResolution).unwrap();
        assert_eq!(json, "\"Board Resolution\"");
    }
}

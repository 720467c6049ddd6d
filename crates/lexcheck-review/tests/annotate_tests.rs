mod common;

use tempfile::TempDir;

use lexcheck_core::Error;
use lexcheck_review::parser::{extract_docx_text, parse_uploaded_doc};
use lexcheck_review::{Annotator, ComplianceIssue, DocumentType, Placement};
use lexcheck_text::docx::read_paragraphs;

use common::{read_part, write_docx, STYLES};

fn issue(section: Option<&str>, text: &str, severity: Option<&str>, suggestion: &str) -> ComplianceIssue {
    ComplianceIssue {
        document: Some("Articles of Association".into()),
        section: section.map(str::to_string),
        issue: text.into(),
        severity: severity.map(str::to_string),
        suggestion: Some(suggestion.into()),
    }
}

#[test]
fn comments_land_by_section_keyword_or_at_the_end() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("aoa.docx");
    write_docx(
        &input,
        &["Articles of Association", "", "Clause 3.1 Jurisdiction: UAE Federal Courts", "Signed by the directors"],
    );
    let issues = vec![
        issue(Some("clause 3.1"), "Jurisdiction clause does not specify ADGM", Some("High"), "Update jurisdiction to ADGM Courts."),
        issue(None, "Directors must initial each page", None, "Add initials & date"),
        issue(Some("Schedule 9"), "Zzz qqq", None, ""),
        issue(None, "qqq extra", None, ""),
    ];
    let output = tmp.path().join("out").join("reviewed.docx");

    let placements = Annotator::new(tmp.path()).annotate_to(&input, &issues, &output).expect("annotate");
    assert_eq!(
        placements,
        vec![Placement::Paragraph(2), Placement::Paragraph(3), Placement::Unplaced, Placement::Unplaced]
    );

    let paragraphs = read_paragraphs(&output).unwrap();
    assert_eq!(
        paragraphs,
        vec![
            "Articles of Association".to_string(),
            String::new(),
            "Clause 3.1 Jurisdiction: UAE Federal Courts  <-- COMMENT: [High] Jurisdiction clause does not specify ADGM | Suggestion: Update jurisdiction to ADGM Courts.".to_string(),
            "Signed by the directors  <-- COMMENT: [Info] Directors must initial each page | Suggestion: Add initials & date".to_string(),
            "COMMENT (Unplaced): [Info] Zzz qqq | Suggestion:   <-- COMMENT: [Info] qqq extra | Suggestion: ".to_string(),
        ]
    );

    let xml = read_part(&output, "word/document.xml");
    let unplaced = xml.find("COMMENT (Unplaced)").unwrap();
    assert!(unplaced < xml.find("<w:sectPr>").unwrap(), "unplaced comment stays inside the body content");
    assert!(xml.contains("<w:rPr><w:i/></w:rPr>"));
    assert_eq!(read_part(&output, "word/styles.xml"), STYLES);
    assert_eq!(read_part(&output, "[Content_Types].xml"), "<Types/>");
}

#[test]
fn no_issues_copies_the_document() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.docx");
    write_docx(&input, &["Board Resolution"]);
    let output = tmp.path().join("copy.docx");

    let placements = Annotator::new(tmp.path()).annotate_to(&input, &[], &output).unwrap();
    assert!(placements.is_empty());
    assert_eq!(read_part(&output, "word/document.xml"), read_part(&input, "word/document.xml"));
}

#[test]
fn annotate_names_output_by_timestamp() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.docx");
    write_docx(&input, &["Register of Members"]);
    let out_dir = tmp.path().join("outputs");

    let path = Annotator::new(&out_dir).annotate(&input, &[issue(None, "Register incomplete", Some("Low"), "")]).unwrap();

    assert_eq!(path.parent().unwrap(), out_dir.as_path());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("reviewed_") && name.ends_with(".docx"), "{name}");
    assert_eq!(name.len(), "reviewed_20250101_120000.docx".len());
    assert!(path.is_file());
}

#[test]
fn missing_upload_is_reported() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.docx");

    let err = Annotator::new(tmp.path()).annotate(&missing, &[]).unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)));
    assert!(matches!(parse_uploaded_doc(&missing), Err(Error::MissingInput(_))));
}

#[test]
fn upload_text_drops_blank_paragraphs_and_classifies() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("moa.docx");
    write_docx(&input, &["  Memorandum of Association  ", "", "   ", "Object clause"]);

    assert_eq!(extract_docx_text(&input).unwrap(), "Memorandum of Association\nObject clause");
    let parsed = parse_uploaded_doc(&input).unwrap();
    assert_eq!(parsed.document_type, DocumentType::MemorandumOfAssociation);
}

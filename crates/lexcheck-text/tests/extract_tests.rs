use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};
use lexcheck_text::docx::read_paragraphs;
use lexcheck_text::ExtractorRegistry;

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"));
    }
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}<w:sectPr/></w:body></w:document>"
    );
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

#[test]
fn json_records_use_passage_or_question() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("qa.json");
    fs::write(&path, r#"[{"Question":"Q1"},{"Passage":"P1"}]"#).unwrap();

    let text = ExtractorRegistry::with_defaults().extract(&path).unwrap();
    assert_eq!(text, "Q1\nP1");
}

#[test]
fn json_object_is_serialized_whole() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("one.json");
    fs::write(&path, r#"{"Passage": "only"}"#).unwrap();

    let text = ExtractorRegistry::with_defaults().extract(&path).unwrap();
    assert_eq!(text, r#"{"Passage":"only"}"#);
}

#[test]
fn numeric_passage_is_an_extraction_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("numbers.json");
    fs::write(&path, r#"[{"Passage":12}]"#).unwrap();

    let err = ExtractorRegistry::with_defaults().extract(&path).unwrap_err();
    assert!(matches!(err, Error::Extraction { .. }), "got {err:?}");
}

#[test]
fn malformed_json_is_an_extraction_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "[{").unwrap();

    let err = ExtractorRegistry::with_defaults().extract(&path).unwrap_err();
    assert!(matches!(err, Error::Extraction { .. }), "got {err:?}");
}

#[test]
fn plain_text_is_trimmed() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("NOTES.TXT");
    fs::write(&path, "\n  hello there \n\n").unwrap();

    assert_eq!(ExtractorRegistry::with_defaults().extract(&path).unwrap(), "hello there");
}

#[test]
fn unsupported_extension_yields_empty_text() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("photo.png");
    fs::write(&path, [0x89u8, 0x50, 0x4e, 0x47]).unwrap();

    let registry = ExtractorRegistry::with_defaults();
    assert!(!registry.supports(&path));
    assert_eq!(registry.extract(&path).unwrap(), "");
}

#[test]
fn missing_supported_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    let err = ExtractorRegistry::with_defaults().extract(&tmp.path().join("gone.txt")).unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)), "got {err:?}");
}

#[test]
fn docx_paragraphs_in_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("aoa.docx");
    write_docx(&path, &["Articles of Association", "", "Clause 1 &amp; 2"]);

    let paragraphs = read_paragraphs(&path).unwrap();
    assert_eq!(paragraphs, vec!["Articles of Association", "", "Clause 1 & 2"]);

    let text = ExtractorRegistry::with_defaults().extract(&path).unwrap();
    assert_eq!(text, "Articles of Association\n\nClause 1 & 2");
}

#[test]
fn docx_that_is_not_a_zip_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fake.docx");
    fs::write(&path, "plain text pretending").unwrap();

    let err = ExtractorRegistry::with_defaults().extract(&path).unwrap_err();
    assert!(matches!(err, Error::Extraction { .. }), "got {err:?}");
}

struct Shout;

impl TextExtractor for Shout {
    fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?.to_uppercase())
    }
}

#[test]
fn custom_strategy_can_be_registered() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("memo.md");
    fs::write(&path, "quiet words ").unwrap();

    let mut registry = ExtractorRegistry::with_defaults();
    registry.register(".MD", Shout);
    assert_eq!(registry.extract(&path).unwrap(), "QUIET WORDS");
}

#![allow(dead_code)]

#[path = "../../../lexcheck-embed/tests/common/mod.rs"]
mod stub;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub use stub::StubServer;

pub const STYLES: &str = "<w:styles/>";

/// Minimal Word package with one run per paragraph and a trailing `w:sectPr`.
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut body = String::new();
    for p in paragraphs {
        if p.is_empty() {
            body.push_str("<w:p/>");
        } else {
            body.push_str(&format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"));
        }
    }
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}<w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/></w:sectPr></w:body></w:document>"
    );
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();
    zip.finish().unwrap();
}

pub fn read_part(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut out = String::new();
    part.read_to_string(&mut out).unwrap();
    out
}

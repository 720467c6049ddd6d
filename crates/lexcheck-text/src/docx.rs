//! Word documents. Only the main document part is read; headers, footers,
//! footnotes and table cells are not part of the extracted text.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

use crate::open_file;

/// Archive entry holding the document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Body paragraphs in order, each followed by a newline.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let mut text = String::new();
        for paragraph in read_paragraphs(path)? {
            text.push_str(&paragraph);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Raw XML of the main document part.
pub fn read_document_xml(path: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(open_file(path)?).map_err(|e| Error::extraction(path, e))?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| Error::extraction(path, e))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| Error::extraction(path, e))?;
    Ok(xml)
}

/// Text of every body-level paragraph of the document at `path`, including empty ones.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let xml = read_document_xml(path)?;
    body_paragraphs(&xml).map_err(|message| Error::extraction(path, message))
}

/// Paragraphs that are direct children of `w:body`.
///
/// Run text (`w:t`) is concatenated; `w:tab` becomes a tab and `w:br`/`w:cr`
/// a newline. Only runs directly in the paragraph or in a `w:hyperlink` count;
/// paragraph properties and drawings (text boxes included) are skipped.
pub fn body_paragraphs(xml: &str) -> std::result::Result<Vec<String>, String> {
    Ok(scan_body(xml)?.paragraphs.into_iter().map(|p| p.text).collect())
}

/// A body-level paragraph and where it sits in the document XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyParagraph {
    pub text: String,
    /// Byte offset of the opening `<w:p`.
    pub start: usize,
    /// Byte offset of the closing `</w:p>`, or of the end of a self-closing `<w:p/>`.
    pub end: usize,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLayout {
    pub paragraphs: Vec<BodyParagraph>,
    /// Byte offset where trailing body content goes: the body-level `w:sectPr`
    /// if present, otherwise `</w:body>`.
    pub tail: usize,
}

pub fn scan_body(xml: &str) -> std::result::Result<BodyLayout, String> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<(String, usize)> = None;
    let mut in_text = false;
    let mut skipped = 0usize;
    let mut section_props: Option<usize> = None;
    let mut body_end: Option<usize> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| format!("invalid document xml: {e}"))?;
        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if parent_is_body(&open) {
                    match name.as_slice() {
                        b"w:p" => current = Some((String::new(), before)),
                        b"w:sectPr" => {
                            section_props.get_or_insert(before);
                        }
                        _ => {}
                    }
                } else if is_skipped(&name) {
                    skipped += 1;
                } else if name == b"w:t" && skipped == 0 && in_run(&open) {
                    in_text = true;
                }
                open.push(name);
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if parent_is_body(&open) => paragraphs.push(BodyParagraph {
                    text: String::new(),
                    start: before,
                    end: reader.buffer_position() as usize,
                    self_closing: true,
                }),
                b"w:sectPr" if parent_is_body(&open) => {
                    section_props.get_or_insert(before);
                }
                b"w:tab" if skipped == 0 && in_run(&open) => {
                    if let Some((text, _)) = current.as_mut() {
                        text.push('\t');
                    }
                }
                b"w:br" | b"w:cr" if skipped == 0 && in_run(&open) => {
                    if let Some((text, _)) = current.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some((text, _)) = current.as_mut() {
                    let unescaped = t.unescape().map_err(|e| format!("invalid text run: {e}"))?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) => {
                open.pop();
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    name if is_skipped(name) => skipped = skipped.saturating_sub(1),
                    b"w:p" if parent_is_body(&open) => {
                        if let Some((text, start)) = current.take() {
                            paragraphs.push(BodyParagraph { text, start, end: before, self_closing: false });
                        }
                    }
                    b"w:body" => body_end = Some(before),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    let tail = section_props
        .or(body_end)
        .ok_or_else(|| "document xml has no w:body".to_string())?;
    Ok(BodyLayout { paragraphs, tail })
}

fn parent_is_body(open: &[Vec<u8>]) -> bool {
    open.last().is_some_and(|name| name.as_slice() == b"w:body")
}

/// Innermost element is a run sitting in a paragraph or a hyperlink.
fn in_run(open: &[Vec<u8>]) -> bool {
    match open {
        [.., parent, run] => {
            run.as_slice() == b"w:r" && matches!(parent.as_slice(), b"w:p" | b"w:hyperlink")
        }
        _ => false,
    }
}

fn is_skipped(name: &[u8]) -> bool {
    matches!(name, b"w:pPr" | b"w:drawing" | b"w:pict" | b"mc:AlternateContent")
}

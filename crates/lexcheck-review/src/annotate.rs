//! Writes review comments into a copy of the uploaded DOCX.
//!
//! Comments are inline italic runs rather than Word comment parts, so the
//! output opens in any editor that reads the main document part.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use quick_xml::escape::escape;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use lexcheck_core::{Error, Result};
use lexcheck_text::docx::{read_document_xml, scan_body, DOCUMENT_PART};

use crate::issues::ComplianceIssue;

const KEYWORD_COUNT: usize = 3;

/// Where one comment ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the body paragraph at this index.
    Paragraph(usize),
    Unplaced,
}

pub struct Annotator {
    output_dir: PathBuf,
}

impl Annotator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    /// Annotate `input` into `{output_dir}/reviewed_{YYYYMMDD_HHMMSS}.docx`.
    pub fn annotate(&self, input: &Path, issues: &[ComplianceIssue]) -> Result<PathBuf> {
        let name = format!("reviewed_{}.docx", Local::now().format("%Y%m%d_%H%M%S"));
        let output = self.output_dir.join(name);
        self.annotate_to(input, issues, &output)?;
        Ok(output)
    }

    pub fn annotate_to(&self, input: &Path, issues: &[ComplianceIssue], output: &Path) -> Result<Vec<Placement>> {
        if !input.is_file() {
            return Err(Error::MissingInput(format!("file {}", input.display())));
        }
        let xml = read_document_xml(input)?;
        let (annotated, placements) = annotate_xml(&xml, issues).map_err(|message| Error::extraction(input, message))?;

        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        write_package(input, &annotated, output)?;
        info!(
            output = %output.display(),
            comments = placements.len(),
            unplaced = placements.iter().filter(|p| **p == Placement::Unplaced).count(),
            "annotated document"
        );
        Ok(placements)
    }
}

struct Slot {
    text: String,
    runs: String,
}

/// Insert a comment for every issue into the document XML.
///
/// Placement tries the issue's section, then any of the first words of the
/// issue text, against the current paragraph texts (comments already placed
/// included). Anything else becomes a new paragraph at the end of the body.
pub fn annotate_xml(xml: &str, issues: &[ComplianceIssue]) -> std::result::Result<(String, Vec<Placement>), String> {
    let layout = scan_body(xml)?;
    let mut slots: Vec<Slot> =
        layout.paragraphs.iter().map(|p| Slot { text: p.text.to_lowercase(), runs: String::new() }).collect();
    let existing = slots.len();
    let mut placements = Vec::with_capacity(issues.len());

    for issue in issues {
        let comment = issue.comment_text();
        let target = find_paragraph(&slots, issue);
        match target {
            Some(index) => {
                let run_text = format!("  <-- COMMENT: {comment}");
                slots[index].text.push_str(&run_text.to_lowercase());
                slots[index].runs.push_str(&comment_run(&run_text));
                debug!(paragraph = index, "placed comment");
                placements.push(if index < existing { Placement::Paragraph(index) } else { Placement::Unplaced });
            }
            None => {
                let text = format!("COMMENT (Unplaced): {comment}");
                slots.push(Slot { text: text.to_lowercase(), runs: plain_run(&text) });
                placements.push(Placement::Unplaced);
            }
        }
    }

    let mut out = String::with_capacity(xml.len() + 256 * issues.len());
    let mut cursor = 0;
    for (paragraph, slot) in layout.paragraphs.iter().zip(&slots) {
        if slot.runs.is_empty() {
            continue;
        }
        if paragraph.self_closing {
            out.push_str(&xml[cursor..paragraph.start]);
            let open = xml[paragraph.start..paragraph.end].trim_end_matches('>').trim_end_matches('/').trim_end();
            out.push_str(open);
            out.push('>');
            out.push_str(&slot.runs);
            out.push_str("</w:p>");
        } else {
            out.push_str(&xml[cursor..paragraph.end]);
            out.push_str(&slot.runs);
        }
        cursor = paragraph.end;
    }
    out.push_str(&xml[cursor..layout.tail]);
    for slot in &slots[existing..] {
        out.push_str("<w:p>");
        out.push_str(&slot.runs);
        out.push_str("</w:p>");
    }
    out.push_str(&xml[layout.tail..]);
    Ok((out, placements))
}

fn find_paragraph(slots: &[Slot], issue: &ComplianceIssue) -> Option<usize> {
    if let Some(section) = issue.section.as_deref().filter(|s| !s.is_empty()) {
        let section = section.to_lowercase();
        if let Some(index) = slots.iter().position(|s| s.text.contains(&section)) {
            return Some(index);
        }
    }
    let keywords: Vec<String> = issue.issue.split_whitespace().take(KEYWORD_COUNT).map(str::to_lowercase).collect();
    if keywords.is_empty() {
        return None;
    }
    slots.iter().position(|s| keywords.iter().any(|kw| s.text.contains(kw.as_str())))
}

fn comment_run(text: &str) -> String {
    format!(r#"<w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text))
}

fn plain_run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text))
}

/// Copy every part of `input` into `output`, replacing the main document part.
fn write_package(input: &Path, document_xml: &str, output: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(input)?).map_err(|e| Error::extraction(input, e))?;
    let mut writer = ZipWriter::new(File::create(output)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(|e| Error::extraction(input, e))?;
        if entry.name() == DOCUMENT_PART {
            writer.start_file(DOCUMENT_PART, options).map_err(zip_error)?;
            writer.write_all(document_xml.as_bytes())?;
        } else {
            writer.raw_copy_file(entry).map_err(zip_error)?;
        }
    }
    writer.finish().map_err(zip_error)?;
    Ok(())
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::Io(io::Error::other(e))
}

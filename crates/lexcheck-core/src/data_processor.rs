use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::traits::TextExtractor;
use crate::types::DocumentChunk;

#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum number of whitespace-delimited words per chunk.
    pub max_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_words: 500 }
    }
}

/// Chunks produced from a corpus walk, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct ProcessedCorpus {
    pub chunks: Vec<DocumentChunk>,
    pub files_scanned: usize,
    pub files_with_text: usize,
}

#[derive(Debug, Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunking(chunking_config: ChunkingConfig) -> Self {
        Self { chunking_config }
    }

    /// Walk `data_dir`, extract every regular file and split its text into chunks.
    ///
    /// Files whose extracted text is empty (including unsupported formats) are
    /// skipped. An extraction error aborts the whole walk.
    pub fn process_directory(&self, data_dir: &Path, extractor: &dyn TextExtractor) -> Result<ProcessedCorpus> {
        let files = self.list_files(data_dir)?;
        let mut corpus = ProcessedCorpus { files_scanned: files.len(), ..ProcessedCorpus::default() };
        for (file_index, file_path) in files.iter().enumerate() {
            debug!(file = %file_path.display(), "processing file {}/{}", file_index + 1, files.len());
            let text = extractor.extract(file_path)?;
            if text.is_empty() {
                debug!(file = %file_path.display(), "no text extracted, skipping");
                continue;
            }
            let chunks = self.chunk_document(&text, file_path);
            corpus.files_with_text += 1;
            corpus.chunks.extend(chunks);
        }
        info!(
            files = corpus.files_scanned,
            with_text = corpus.files_with_text,
            chunks = corpus.chunks.len(),
            "processed {}",
            data_dir.display()
        );
        Ok(corpus)
    }

    fn chunk_document(&self, text: &str, file_path: &Path) -> Vec<DocumentChunk> {
        let file = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pieces = chunk_text(text, self.chunking_config.max_words);
        let total_chunks = pieces.len();
        pieces
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| DocumentChunk {
                file: file.clone(),
                doc_path: file_path.to_string_lossy().into_owned(),
                text,
                chunk_index,
                total_chunks,
            })
            .collect()
    }

    /// Every regular file under `root`, recursively, in file-name order.
    pub fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(Error::MissingInput(format!("reference directory {}", root.display())));
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable entry"),
            }
        }
        Ok(files)
    }
}

/// Split `text` into consecutive, non-overlapping windows of at most
/// `max_words` words. A size of zero is treated as one.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(max_words.max(1)).map(|window| window.join(" ")).collect()
}

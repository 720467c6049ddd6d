use std::fs;
use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use lexcheck_core::data_processor::DataProcessor;
use lexcheck_core::traits::{Embedder, TextExtractor};
use lexcheck_core::{Error, Result};

use crate::flat::FlatL2Index;
use crate::mapping::DocMapping;
use crate::store::IndexPaths;

/// Summary of one index build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub files_scanned: usize,
    pub files_indexed: usize,
    pub chunks: usize,
    pub dimension: usize,
    pub model: String,
}

/// Walks a reference corpus and writes a fresh index/mapping pair.
pub struct IndexBuilder {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn Embedder>,
    processor: DataProcessor,
    paths: IndexPaths,
    show_progress: bool,
}

impl IndexBuilder {
    pub fn new(extractor: Arc<dyn TextExtractor>, embedder: Arc<dyn Embedder>, paths: IndexPaths) -> Self {
        Self { extractor, embedder, processor: DataProcessor::new(), paths, show_progress: false }
    }

    pub fn with_processor(mut self, processor: DataProcessor) -> Self {
        self.processor = processor;
        self
    }

    /// Draw a progress bar on stderr while embedding.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn paths(&self) -> &IndexPaths {
        &self.paths
    }

    /// Extract, chunk and embed every file under `root`, then overwrite the
    /// persisted pair. Positions follow corpus order.
    ///
    /// Nothing is written when the corpus yields no chunks.
    pub fn build(&self, root: &Path) -> Result<BuildReport> {
        for file in [&self.paths.index, &self.paths.mapping] {
            if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
        }

        let corpus = self.processor.process_directory(root, self.extractor.as_ref())?;
        if corpus.chunks.is_empty() {
            return Err(Error::NoContent(root.to_path_buf()));
        }
        info!(chunks = corpus.chunks.len(), model = %self.embedder.model_id(), "embedding reference chunks");

        let pb = if self.show_progress {
            let pb = ProgressBar::new(corpus.chunks.len() as u64);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            pb.set_style(style);
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut index: Option<FlatL2Index> = None;
        let mut mapping = DocMapping::new();
        for chunk in &corpus.chunks {
            pb.set_message(chunk.file.clone());
            let vector = self.embedder.embed(&chunk.text)?;
            if index.is_none() {
                if vector.is_empty() {
                    return Err(Error::provider(self.embedder.model_id(), "returned an empty embedding"));
                }
                debug!(dim = vector.len(), "index dimension fixed by first embedding");
            }
            let index = index.get_or_insert_with(|| FlatL2Index::new(vector.len()));
            let position = index.add(&vector)?;
            mapping.insert(position, chunk.record());
            pb.inc(1);
        }
        pb.finish_and_clear();

        let index = index.ok_or_else(|| Error::NoContent(root.to_path_buf()))?;
        self.paths.save(&index, &mapping)?;

        let report = BuildReport {
            files_scanned: corpus.files_scanned,
            files_indexed: corpus.files_with_text,
            chunks: index.len(),
            dimension: index.dim(),
            model: self.embedder.model_id().to_string(),
        };
        info!(
            files = report.files_indexed,
            chunks = report.chunks,
            dim = report.dimension,
            "reference index built"
        );
        Ok(report)
    }
}

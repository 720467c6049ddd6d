use std::sync::Arc;

use tracing::{debug, info};

use lexcheck_core::traits::Embedder;
use lexcheck_core::types::SearchHit;
use lexcheck_core::Result;

use crate::flat::FlatL2Index;
use crate::mapping::DocMapping;
use crate::store::IndexPaths;

pub const DEFAULT_TOP_K: usize = 5;

/// A loaded index/mapping pair.
#[derive(Debug, Clone)]
pub struct PersistedIndex {
    pub index: FlatL2Index,
    pub mapping: DocMapping,
}

impl PersistedIndex {
    pub fn load(paths: &IndexPaths) -> Result<Self> {
        let (index, mapping) = paths.load()?;
        Ok(Self { index, mapping })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Nearest records to `query`. Positions without a mapping entry are dropped.
    pub fn search_vector(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        let neighbors = self.index.search(query, k)?;
        Ok(neighbors
            .into_iter()
            .filter_map(|n| {
                self.mapping.get(n.position).map(|record| SearchHit {
                    position: n.position,
                    distance: n.distance,
                    file: record.file.clone(),
                    text: record.text.clone(),
                })
            })
            .collect())
    }
}

pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    paths: IndexPaths,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, paths: IndexPaths) -> Self {
        Self { embedder, paths }
    }

    pub fn paths(&self) -> &IndexPaths {
        &self.paths
    }

    /// The `k` reference chunks closest to `query`, nearest first.
    ///
    /// Fails with `NotBuilt` when either persisted file is missing; the index
    /// is never built implicitly.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let persisted = PersistedIndex::load(&self.paths)?;
        let query_vector = self.embedder.embed(query)?;
        let hits = persisted.search_vector(&query_vector, k)?;
        debug!(k, returned = hits.len(), "retrieved");
        info!(query = %truncate(query, 80), hits = hits.len(), "retrieval done");
        Ok(hits)
    }
}

/// Render hits as prompt context, one block per hit.
pub fn format_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("[{}]\n{}", hit.file, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

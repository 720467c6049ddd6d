//! Domain types shared by extraction, indexing and retrieval.

use serde::{Deserialize, Serialize};

/// Dense index position assigned to a chunk at build time.
pub type Position = usize;

/// A chunk of a source document that is independently embedded.
///
/// - `file`: file name of the source document (no directories)
/// - `doc_path`: original path to the source file
/// - `text`: the words of the chunk joined by single spaces
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub file: String,
    pub doc_path: String,
    pub text: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

impl DocumentChunk {
    pub fn record(&self) -> DocRecord {
        DocRecord { file: self.file.clone(), text: self.text.clone() }
    }
}

/// Provenance and content stored in the doc mapping for one index position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    pub file: String,
    pub text: String,
}

/// One retrieval result, nearest first.
///
/// `distance` is the squared Euclidean distance between the query embedding
/// and the chunk embedding; lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: Position,
    pub distance: f32,
    pub file: String,
    pub text: String,
}


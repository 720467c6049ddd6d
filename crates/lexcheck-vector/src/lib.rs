//! lexcheck-vector
//!
//! Exact L2 vector index over reference chunks, its persisted form, and the
//! build and retrieval operations on top of it.

pub mod flat;
pub mod index_build;
pub mod mapping;
pub mod schema;
pub mod search;
pub mod store;

pub use flat::{FlatL2Index, Neighbor};
pub use index_build::{BuildReport, IndexBuilder};
pub use mapping::DocMapping;
pub use search::{format_context, PersistedIndex, Retriever, DEFAULT_TOP_K};
pub use store::IndexPaths;

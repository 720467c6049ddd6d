use std::collections::BTreeMap;

use lexcheck_core::types::{DocRecord, Position};

/// Index position to source record, stored alongside the vector index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocMapping {
    entries: BTreeMap<u64, DocRecord>,
}

impl DocMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: Position, record: DocRecord) {
        self.entries.insert(position as u64, record);
    }

    pub fn get(&self, position: Position) -> Option<&DocRecord> {
        self.entries.get(&(position as u64))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &DocRecord)> {
        self.entries.iter().map(|(k, v)| (*k as Position, v))
    }

    pub(crate) fn from_entries(entries: Vec<(u64, DocRecord)>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    pub(crate) fn to_entries(&self) -> Vec<(u64, &DocRecord)> {
        self.entries.iter().map(|(k, v)| (*k, v)).collect()
    }
}

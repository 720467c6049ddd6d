use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use lexcheck_core::config::PathSettings;
use lexcheck_core::{Error, Result};

use crate::flat::FlatL2Index;
use crate::mapping::DocMapping;
use crate::schema;

/// Locations of the persisted index and its doc mapping. The two files are
/// always written and read together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub index: PathBuf,
    pub mapping: PathBuf,
}

impl IndexPaths {
    pub fn new(index: impl Into<PathBuf>, mapping: impl Into<PathBuf>) -> Self {
        Self { index: index.into(), mapping: mapping.into() }
    }

    pub fn from_settings(paths: &PathSettings) -> Self {
        Self::new(paths.index_path(), paths.mapping_path())
    }

    /// Both files present.
    pub fn exists(&self) -> bool {
        self.index.is_file() && self.mapping.is_file()
    }

    /// Write both files, replacing any previous pair.
    ///
    /// Each file is staged next to its destination and renamed into place
    /// once both are fully written.
    pub fn save(&self, index: &FlatL2Index, mapping: &DocMapping) -> Result<()> {
        let index_bytes = schema::encode_index(index)?;
        let mapping_bytes = schema::encode_mapping(mapping)?;

        let staged_index = stage(&self.index, &index_bytes)?;
        let staged_mapping = stage(&self.mapping, &mapping_bytes)?;
        staged_index.persist(&self.index).map_err(|e| Error::Io(e.error))?;
        staged_mapping.persist(&self.mapping).map_err(|e| Error::Io(e.error))?;

        info!(
            index = %self.index.display(),
            mapping = %self.mapping.display(),
            vectors = index.len(),
            "saved reference index"
        );
        Ok(())
    }

    pub fn load(&self) -> Result<(FlatL2Index, DocMapping)> {
        if !self.exists() {
            return Err(Error::NotBuilt { index: self.index.clone(), mapping: self.mapping.clone() });
        }
        let index = schema::decode_index(&fs::read(&self.index)?)?;
        let mapping = schema::decode_mapping(&fs::read(&self.mapping)?)?;
        if index.len() != mapping.len() {
            return Err(Error::Format(format!(
                "index holds {} vectors but mapping holds {} records",
                index.len(),
                mapping.len()
            )));
        }
        Ok((index, mapping))
    }
}

fn stage(dest: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

//! On-disk layout of the index and mapping files.
//!
//! Both files start with an 8-byte magic and a little-endian `u32` format
//! version, followed by a bincode body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lexcheck_core::types::DocRecord;
use lexcheck_core::{Error, Result};

use crate::flat::FlatL2Index;
use crate::mapping::DocMapping;

pub const FORMAT_VERSION: u32 = 1;
pub const INDEX_MAGIC: &[u8; 8] = b"LXCKIDX\0";
pub const MAPPING_MAGIC: &[u8; 8] = b"LXCKMAP\0";

const HEADER_LEN: usize = 12;

#[derive(Serialize)]
struct IndexBodyRef<'a> {
    dim: u64,
    data: &'a [f32],
}

#[derive(Deserialize)]
struct IndexBody {
    dim: u64,
    data: Vec<f32>,
}

pub fn encode_index(index: &FlatL2Index) -> Result<Vec<u8>> {
    encode(INDEX_MAGIC, &IndexBodyRef { dim: index.dim() as u64, data: index.as_slice() })
}

pub fn decode_index(bytes: &[u8]) -> Result<FlatL2Index> {
    let body: IndexBody = decode(INDEX_MAGIC, bytes, "index")?;
    FlatL2Index::from_parts(body.dim as usize, body.data)
}

pub fn encode_mapping(mapping: &DocMapping) -> Result<Vec<u8>> {
    encode(MAPPING_MAGIC, &mapping.to_entries())
}

pub fn decode_mapping(bytes: &[u8]) -> Result<DocMapping> {
    let entries: Vec<(u64, DocRecord)> = decode(MAPPING_MAGIC, bytes, "mapping")?;
    Ok(DocMapping::from_entries(entries))
}

fn encode<T: Serialize + ?Sized>(magic: &[u8; 8], body: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(magic);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bincode::serialize_into(&mut out, body).map_err(|e| Error::Format(format!("encode: {e}")))?;
    Ok(out)
}

fn decode<T: DeserializeOwned>(magic: &[u8; 8], bytes: &[u8], what: &str) -> Result<T> {
    if bytes.len() < HEADER_LEN || &bytes[..8] != magic {
        return Err(Error::Format(format!("not a lexcheck {what} file")));
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[8..HEADER_LEN]);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(Error::Format(format!(
            "{what} file has format version {version}, expected {FORMAT_VERSION}"
        )));
    }
    bincode::deserialize(&bytes[HEADER_LEN..]).map_err(|e| Error::Format(format!("corrupt {what} file: {e}")))
}

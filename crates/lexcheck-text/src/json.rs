//! Question/passage datasets stored as JSON.

use std::path::Path;

use serde_json::Value;

use lexcheck_core::traits::TextExtractor;
use lexcheck_core::{Error, Result};

use crate::read_bytes;

pub struct JsonRecordExtractor;

impl TextExtractor for JsonRecordExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let value: Value = serde_json::from_slice(&read_bytes(path)?).map_err(|e| Error::extraction(path, e))?;
        records_to_text(&value).map_err(|message| Error::extraction(path, message))
    }
}

/// A list of records contributes each record's `Passage`, falling back to its
/// `Question`, one per line. A single record is serialized back whole.
///
/// `null` counts as a missing field; any other non-string value is an error.
pub fn records_to_text(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::Array(entries) => {
            let mut text = String::new();
            for (i, record) in entries.iter().enumerate() {
                let Some(record) = record.as_object() else { continue };
                let field = ["Passage", "Question"]
                    .into_iter()
                    .find_map(|key| record.get(key).filter(|v| !v.is_null()).map(|v| (key, v)));
                match field {
                    Some((_, Value::String(s))) => {
                        text.push_str(s);
                        text.push('\n');
                    }
                    Some((key, other)) => return Err(format!("record {i}: {key} must be a string, got {other}")),
                    None => {}
                }
            }
            Ok(text)
        }
        Value::Object(_) => Ok(value.to_string()),
        _ => Ok(String::new()),
    }
}

// Dictionary documents as returned by exact lookup

use serde::Serialize;
use serde_json::Value;

use crate::turso::{DatasetVariant, RawDocument};

/// A word and its structured entry (IPA, definitions, tags, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub word: String,
    /// Schema version the payload was read with
    pub variant: DatasetVariant,
    /// The entry itself; `Value::Null` for reserved words
    pub payload: Value,
}

impl Document {
    /// Parse a stored row. Fails with the serde error text when the payload isn't JSON.
    pub fn from_raw(raw: RawDocument, variant: DatasetVariant) -> Result<Self, String> {
        let payload = match raw.payload.as_deref() {
            None => Value::Null,
            Some(text) => serde_json::from_str(text).map_err(|e| e.to_string())?,
        };
        Ok(Self {
            word: raw.word,
            variant,
            payload,
        })
    }

    /// True for intentionally absent entries (NULL, `{}`, `[]`, `""`).
    pub fn is_absent(&self) -> bool {
        is_absent_payload(&self.payload)
    }
}

fn is_absent_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

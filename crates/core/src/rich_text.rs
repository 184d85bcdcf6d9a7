//! Rich-text payload normalization.
//!
//! Draft content is stored as an opaque serialized editor document. Newer
//! payloads are JSON objects carrying a `blocks` array; legacy payloads are
//! plain text. [`RichDocument::parse`] is the single place that decides which
//! shape a payload has, so callers never inspect the JSON themselves.

use serde::Deserialize;
use serde_json::Value;

/// A parsed draft payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RichDocument {
    /// A structured editor document; one entry per block, holding its text.
    Structured(Vec<String>),
    /// Anything else, kept verbatim and treated as already-plain text.
    Opaque(String),
}

/// Shape of a structured editor document. Only `blocks[].text` is read;
/// a block that is not an object counts as empty.
#[derive(Debug, Deserialize)]
struct DocumentShape {
    blocks: Vec<Value>,
}

fn block_text(block: Value) -> String {
    match block {
        Value::Object(mut fields) => match fields.remove("text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        },
        _ => String::new(),
    }
}

impl RichDocument {
    /// Classify a payload. Never fails: unparseable input becomes `Opaque`.
    pub fn parse(payload: &str) -> Self {
        if payload.is_empty() {
            return Self::Opaque(String::new());
        }
        match serde_json::from_str::<DocumentShape>(payload) {
            Ok(doc) => Self::Structured(doc.blocks.into_iter().map(block_text).collect()),
            Err(_) => Self::Opaque(payload.to_string()),
        }
    }

    /// Plain text for search and analysis.
    ///
    /// Structured documents join their block texts with single spaces and
    /// trim the result; opaque payloads are returned unchanged.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Structured(blocks) => blocks.join(" ").trim().to_string(),
            Self::Opaque(raw) => raw.clone(),
        }
    }
}

/// Convert a serialized draft payload into plain text.
pub fn extract_plain_text(payload: &str) -> String {
    RichDocument::parse(payload).plain_text()
}

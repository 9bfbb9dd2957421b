// textsift-core/src/record.rs
//! Provides core data structures for extracted records and per-unit
//! diagnostics within the `textsift-core` library.

use serde::{Serialize, Deserialize};
use std::collections::HashMap;

/// Maximum number of characters of a skipped unit retained in diagnostics.
pub const SNIPPET_MAX_LEN: usize = 50;

/// Represents a single input unit processed by a line schema.
///
/// A record is produced for every non-blank unit handed to the extractor.
/// `matched` is false when the schema pattern did not match, in which case
/// `fields` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExtractedRecord {
    pub schema_name: String,
    /// 1-based position of the unit within its source.
    pub source_index: usize,
    pub matched: bool,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl ExtractedRecord {
    /// Builds the record for a unit the schema pattern did not match.
    pub fn unmatched(schema_name: &str, source_index: usize) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            source_index,
            matched: false,
            fields: HashMap::new(),
        }
    }

    /// Returns the value of a named field, if the record carries it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A unit the extractor could not match, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedUnit {
    /// 1-based position of the unit within its source.
    pub source_index: usize,
    /// Leading characters of the unit, truncated for safe display.
    pub snippet: String,
}

/// Truncates a unit to `SNIPPET_MAX_LEN` characters for diagnostics.
///
/// Truncation counts characters, not bytes, so multi-byte input never
/// splits a code point.
pub fn unit_snippet(unit: &str) -> String {
    let mut chars = unit.char_indices();
    match chars.nth(SNIPPET_MAX_LEN) {
        Some((byte_idx, _)) => format!("{}...", &unit[..byte_idx]),
        None => unit.to_string(),
    }
}

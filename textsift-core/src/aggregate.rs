// textsift-core/src/aggregate.rs
//! Frequency aggregation over extracted records.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::record::ExtractedRecord;

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Counts distinct values of one field across a record stream.
///
/// Entries sort by descending count; values with equal counts keep the
/// order in which they were first observed, so repeated runs over the same
/// input always produce the same ranking.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    first_seen: Vec<String>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one observation of `value`.
    pub fn record(&mut self, value: &str) {
        let slot = self.counts.entry(value.to_string()).or_insert(0);
        if *slot == 0 {
            self.first_seen.push(value.to_string());
        }
        *slot += 1;
    }

    /// Returns how often `value` was observed.
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct values observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All entries, most frequent first. Ties keep first-seen order; the
    /// sort is stable and `first_seen` already holds that order.
    pub fn entries(&self) -> Vec<FrequencyEntry> {
        let mut entries: Vec<FrequencyEntry> = self
            .first_seen
            .iter()
            .map(|value| FrequencyEntry {
                value: value.clone(),
                count: self.count(value),
            })
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.count));
        entries
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> Vec<FrequencyEntry> {
        let mut entries = self.entries();
        entries.truncate(n);
        entries
    }
}

/// Builds a frequency table of `field` over `records`.
///
/// Unmatched records never contribute, and matched records without the
/// field are skipped.
pub fn aggregate<'a, I>(records: I, field: &str) -> FrequencyTable
where
    I: IntoIterator<Item = &'a ExtractedRecord>,
{
    let mut table = FrequencyTable::new();
    for record in records {
        if !record.matched {
            continue;
        }
        if let Some(value) = record.field(field) {
            table.record(value);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn matched(field: &str, value: &str, source_index: usize) -> ExtractedRecord {
        let mut fields = HashMap::new();
        fields.insert(field.to_string(), value.to_string());
        ExtractedRecord {
            schema_name: "apache_access".to_string(),
            source_index,
            matched: true,
            fields,
        }
    }

    #[test]
    fn test_unmatched_records_are_excluded() {
        let records = vec![
            matched("status", "200", 1),
            ExtractedRecord::unmatched("apache_access", 2),
            matched("status", "200", 3),
        ];
        let table = aggregate(&records, "status");
        assert_eq!(table.count("200"), 2);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn test_entries_sort_by_count_descending() {
        let records = vec![
            matched("ip", "10.0.0.1", 1),
            matched("ip", "10.0.0.2", 2),
            matched("ip", "10.0.0.2", 3),
        ];
        let table = aggregate(&records, "ip");
        let entries = table.entries();
        assert_eq!(entries[0].value, "10.0.0.2");
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].value, "10.0.0.1");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        table.record("b");
        table.record("a");
        table.record("c");
        let values: Vec<String> = table.entries().into_iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut table = FrequencyTable::new();
        table.record("x");
        table.record("x");
        table.record("y");
        table.record("z");
        let top = table.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].value, "x");
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let records = vec![matched("status", "200", 1)];
        let table = aggregate(&records, "method");
        assert!(table.is_empty());
    }
}

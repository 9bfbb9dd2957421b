// textsift-core/src/extract/scan.rs
//! Whole-document scanning.
//!
//! A `DocumentScanner` applies every scan rule of one compiled scan schema
//! across a whole document and routes the collected values into named,
//! deduplicated buckets.
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::sync::Arc;
use anyhow::{Context, Result};
use log::debug;
use strip_ansi_escapes::strip;

use crate::collect::{DedupedSet, UrlResolver};
use crate::errors::SiftError;
use crate::extract::compiler::{get_or_compile_schemas, CompiledSchema, CompiledSchemas};
use crate::schema::{ExtractionMode, SchemaConfig, SchemaNotFoundError};

#[derive(Debug)]
pub struct DocumentScanner {
    compiled: Arc<CompiledSchemas>,
    index: usize,
}

impl DocumentScanner {
    /// Creates a scanner for the named scan schema in `config`.
    ///
    /// Fails when the schema is unknown, fails to compile, or is not a
    /// `scan` mode schema.
    pub fn new(config: &SchemaConfig, schema_name: &str) -> Result<Self> {
        let compiled = get_or_compile_schemas(config)
            .context("Failed to compile extraction schemas for DocumentScanner")?;

        let index = compiled
            .schemas
            .iter()
            .position(|s| s.name == schema_name)
            .ok_or_else(|| SchemaNotFoundError { schema_name: schema_name.to_string() })?;

        if compiled.schemas[index].mode != ExtractionMode::Scan {
            return Err(SiftError::ModeMismatch(schema_name.to_string(), "document").into());
        }

        Ok(Self { compiled, index })
    }

    fn schema(&self) -> &CompiledSchema {
        &self.compiled.schemas[self.index]
    }

    pub fn schema_name(&self) -> &str {
        &self.schema().name
    }

    /// Scans `document` and returns one deduplicated bucket per `collect_as`
    /// name, keyed by bucket name.
    ///
    /// Stripped elements (e.g. `<script>`, `<style>`) are removed before any
    /// rule runs, so text inside them is never collected. Every bucket the
    /// schema declares is present in the result, even when empty. An invalid
    /// `base_url` is an error; a missing one simply disables resolution.
    pub fn scan(&self, document: &str, base_url: Option<&str>) -> Result<BTreeMap<String, DedupedSet>> {
        let schema = self.schema();

        let resolver = match base_url {
            Some(base) => Some(UrlResolver::new(base)?),
            None => None,
        };

        let stripped_bytes = strip(document.as_bytes());
        let mut text = String::from_utf8_lossy(&stripped_bytes).into_owned();

        for strip_re in &schema.strip_elements {
            text = strip_re.replace_all(&text, "").into_owned();
        }

        let mut buckets: BTreeMap<String, DedupedSet> = BTreeMap::new();
        for scan in &schema.scans {
            // Declare the bucket up front so rules with zero matches still
            // surface an empty collection.
            buckets.entry(scan.collect_as.clone()).or_default();

            let mut found = 0usize;
            for caps in scan.regex.captures_iter(&text) {
                let matched = match caps.get(scan.group) {
                    Some(m) => m.as_str(),
                    None => continue,
                };

                let value = match (&resolver, scan.resolve_against_base) {
                    (Some(resolver), true) => resolver.resolve(matched),
                    _ => matched.to_string(),
                };

                if let Some(bucket) = buckets.get_mut(&scan.collect_as) {
                    if bucket.insert(value) {
                        found += 1;
                    }
                }
            }
            debug!(
                "Scan rule '{}/{}' collected {} new value(s) into '{}'.",
                schema.name, scan.name, found, scan.collect_as
            );
        }

        Ok(buckets)
    }
}

// textsift-core/src/extract/line.rs
//! Line-oriented record extraction.
//!
//! A `RecordExtractor` applies one compiled line schema to one unit of input
//! at a time. Every non-blank unit yields an `ExtractedRecord`; units the
//! pattern does not match yield records with `matched == false`.
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::Arc;
use anyhow::{Context, Result};
use log::debug;
use strip_ansi_escapes::strip;

use crate::errors::SiftError;
use crate::extract::compiler::{get_or_compile_schemas, CompiledSchema, CompiledSchemas};
use crate::record::ExtractedRecord;
use crate::schema::{ExtractionMode, SchemaConfig, SchemaNotFoundError};

#[derive(Debug)]
pub struct RecordExtractor {
    compiled: Arc<CompiledSchemas>,
    index: usize,
}

impl RecordExtractor {
    /// Creates an extractor for the named line schema in `config`.
    ///
    /// Fails when the schema is unknown, fails to compile, or is not a
    /// `line` mode schema.
    pub fn new(config: &SchemaConfig, schema_name: &str) -> Result<Self> {
        let compiled = get_or_compile_schemas(config)
            .context("Failed to compile extraction schemas for RecordExtractor")?;

        let index = compiled
            .schemas
            .iter()
            .position(|s| s.name == schema_name)
            .ok_or_else(|| SchemaNotFoundError { schema_name: schema_name.to_string() })?;

        if compiled.schemas[index].mode != ExtractionMode::Line {
            return Err(SiftError::ModeMismatch(schema_name.to_string(), "line").into());
        }

        Ok(Self { compiled, index })
    }

    fn schema(&self) -> &CompiledSchema {
        &self.compiled.schemas[self.index]
    }

    pub fn schema_name(&self) -> &str {
        &self.schema().name
    }

    /// Field names in schema declaration order, used for stable column layouts.
    pub fn field_names(&self) -> Vec<String> {
        self.schema().fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Applies the schema pattern to a single unit.
    ///
    /// ANSI escape codes are stripped before matching. Field post-processing
    /// runs trim first, then the literal substitution, so a substitution
    /// always compares against the trimmed value.
    pub fn extract(&self, unit: &str, source_index: usize) -> ExtractedRecord {
        let schema = self.schema();
        let stripped_bytes = strip(unit.as_bytes());
        let stripped_input = String::from_utf8_lossy(&stripped_bytes);

        let caps = match schema.pattern.as_ref().and_then(|re| re.captures(&stripped_input)) {
            Some(caps) => caps,
            None => {
                debug!("Schema '{}' did not match unit {}.", schema.name, source_index);
                return ExtractedRecord::unmatched(&schema.name, source_index);
            }
        };

        let mut fields = HashMap::with_capacity(schema.fields.len());
        for spec in &schema.fields {
            match caps.get(spec.group) {
                Some(m) => {
                    let mut value = m.as_str().to_string();
                    if spec.trim {
                        value = value.trim().to_string();
                    }
                    if let Some(sub) = &spec.substitute {
                        if value == sub.from {
                            value = sub.to.clone();
                        }
                    }
                    fields.insert(spec.name.clone(), value);
                }
                None if spec.required => {
                    debug!(
                        "Schema '{}': required field '{}' missing on unit {}.",
                        schema.name, spec.name, source_index
                    );
                    return ExtractedRecord::unmatched(&schema.name, source_index);
                }
                None => {}
            }
        }

        ExtractedRecord {
            schema_name: schema.name.clone(),
            source_index,
            matched: true,
            fields,
        }
    }
}

//! compiler.rs - Manages the compilation and caching of extraction schemas.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `SchemaConfig` into `CompiledSchemas`, which are optimized for
//! efficient extraction. It uses a global, shared cache to avoid
//! redundant compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use crate::schema::{ExtractionMode, ExtractionSchema, FieldSpec, SchemaConfig, MAX_PATTERN_LENGTH};
use crate::errors::SiftError;

/// Represents a single compiled scan rule.
///
/// This struct holds a compiled regular expression along with the collection
/// metadata needed to route its matches into the right bucket.
#[derive(Debug)]
pub struct CompiledScan {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The unique name of the scan rule.
    pub name: String,
    /// Capture group whose text is collected; 0 collects the whole match.
    pub group: usize,
    /// Name of the collection bucket this rule feeds.
    pub collect_as: String,
    /// If true, collected values are resolved against the document base URL.
    pub resolve_against_base: bool,
}

/// Represents a single compiled extraction schema.
///
/// Line patterns are anchored at the start of the haystack during
/// compilation, so a compiled line schema never matches mid-line.
#[derive(Debug)]
pub struct CompiledSchema {
    /// The unique name of the schema.
    pub name: String,
    /// How the schema consumes input.
    pub mode: ExtractionMode,
    /// The compiled line pattern. Present for `line` mode schemas.
    pub pattern: Option<Regex>,
    /// Named fields captured by the line pattern.
    pub fields: Vec<FieldSpec>,
    /// Compiled scan rules. Present for `scan` mode schemas.
    pub scans: Vec<CompiledScan>,
    /// Compiled element-stripping patterns applied before scanning.
    pub strip_elements: Vec<Regex>,
}

/// Represents a collection of all compiled schemas for efficient extraction.
#[derive(Debug)]
pub struct CompiledSchemas {
    /// A vector of `CompiledSchema` instances ready for application.
    pub schemas: Vec<CompiledSchema>,
}

impl CompiledSchemas {
    /// Looks up a compiled schema by name.
    pub fn schema(&self, name: &str) -> Option<&CompiledSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled schemas.
    /// The key is a hash of the serialized `SchemaConfig`.
    static ref COMPILED_SCHEMAS_CACHE: RwLock<HashMap<u64, Arc<CompiledSchemas>>> = RwLock::new(HashMap::new());
}

/// Hashes the `SchemaConfig` to create a stable, unique key for the cache.
///
/// To ensure determinism, the schemas are sorted by name before hashing.
fn hash_config(config: &SchemaConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut schemas_to_hash = config.schemas.clone();

    // Sort schemas to ensure a deterministic hash key.
    schemas_to_hash.sort_by(|a, b| a.name.cmp(&b.name));

    // Hash the sorted schemas.
    schemas_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Anchors a line pattern at the start of its haystack.
fn anchor_line_pattern(pattern: &str) -> String {
    if pattern.starts_with('^') {
        pattern.to_string()
    } else {
        format!("^{}", pattern)
    }
}

/// Builds the pattern that removes an HTML-style element and its content.
fn strip_element_pattern(element: &str) -> String {
    format!("<{0}[^>]*>.*?</{0}>", regex::escape(element))
}

/// Compiles a list of `ExtractionSchema`s into `CompiledSchemas` for efficient
/// matching. This is the low-level function that performs the actual regex
/// compilation.
pub fn compile_schemas(schemas_to_compile: Vec<ExtractionSchema>) -> Result<CompiledSchemas, SiftError> {
    debug!("Starting compilation of {} schemas.", schemas_to_compile.len());

    let mut compiled_schemas = Vec::new();
    let mut compilation_errors = Vec::new();

    for schema in schemas_to_compile {
        let mut pattern = None;
        let mut scans = Vec::new();
        let mut strip_elements = Vec::new();

        match schema.mode {
            ExtractionMode::Line => {
                let raw = match schema.pattern.as_ref() {
                    Some(p) => p,
                    None => {
                        warn!("Skipping schema '{}' because its pattern is missing.", &schema.name);
                        continue;
                    }
                };

                debug!(
                    "Attempting to compile schema: '{}' with pattern '{:?}'",
                    &schema.name, raw
                );

                if raw.len() > MAX_PATTERN_LENGTH {
                    compilation_errors.push(SiftError::PatternLengthExceeded(
                        schema.name.clone(),
                        raw.len(),
                        MAX_PATTERN_LENGTH,
                    ));
                    continue;
                }

                let regex_result = RegexBuilder::new(&anchor_line_pattern(raw))
                    .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                    .build();

                match regex_result {
                    Ok(regex) => {
                        log::debug!(
                            target: "textsift_core::extract",
                            "Schema '{}' compiled successfully.",
                            &schema.name
                        );
                        pattern = Some(regex);
                    }
                    Err(e) => {
                        compilation_errors.push(SiftError::SchemaCompilationError(schema.name.clone(), e));
                        continue;
                    }
                }
            }
            ExtractionMode::Scan => {
                let mut failed = false;

                for scan in &schema.scans {
                    if scan.pattern.len() > MAX_PATTERN_LENGTH {
                        compilation_errors.push(SiftError::PatternLengthExceeded(
                            format!("{}/{}", schema.name, scan.name),
                            scan.pattern.len(),
                            MAX_PATTERN_LENGTH,
                        ));
                        failed = true;
                        continue;
                    }

                    let regex_result = RegexBuilder::new(&scan.pattern)
                        .case_insensitive(scan.case_insensitive)
                        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                        .build();

                    match regex_result {
                        Ok(regex) => {
                            scans.push(CompiledScan {
                                regex,
                                name: scan.name.clone(),
                                group: scan.group,
                                collect_as: scan.collect_as.clone(),
                                resolve_against_base: scan.resolve_against_base,
                            });
                        }
                        Err(e) => {
                            compilation_errors.push(SiftError::SchemaCompilationError(
                                format!("{}/{}", schema.name, scan.name),
                                e,
                            ));
                            failed = true;
                        }
                    }
                }

                for element in &schema.strip_elements {
                    let regex_result = RegexBuilder::new(&strip_element_pattern(element))
                        .case_insensitive(true)
                        .dot_matches_new_line(true)
                        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                        .build();

                    match regex_result {
                        Ok(regex) => strip_elements.push(regex),
                        Err(e) => {
                            compilation_errors.push(SiftError::SchemaCompilationError(
                                format!("{}/strip:{}", schema.name, element),
                                e,
                            ));
                            failed = true;
                        }
                    }
                }

                if failed {
                    continue;
                }

                log::debug!(
                    target: "textsift_core::extract",
                    "Schema '{}' compiled successfully ({} scan rules).",
                    &schema.name,
                    scans.len()
                );
            }
        }

        compiled_schemas.push(CompiledSchema {
            name: schema.name,
            mode: schema.mode,
            pattern,
            fields: schema.fields,
            scans,
            strip_elements,
        });
    }

    if !compilation_errors.is_empty() {
        // Collect errors into a single string for a concise error report
        let error_message = compilation_errors.iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(SiftError::Fatal(format!(
            "Failed to compile {} schema(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!(
            "Finished compiling schemas. Total compiled: {}.",
            compiled_schemas.len()
        );
        Ok(CompiledSchemas { schemas: compiled_schemas })
    }
}

/// Gets a `CompiledSchemas` instance from the cache or compiles them if not found.
///
/// This is the public entry point for retrieving compiled schemas. It returns an `Arc`
/// to a `CompiledSchemas` instance, allowing for cheap sharing.
pub fn get_or_compile_schemas(config: &SchemaConfig) -> Result<Arc<CompiledSchemas>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_SCHEMAS_CACHE.read().unwrap();
        if let Some(schemas) = cache.get(&cache_key) {
            debug!("Serving compiled schemas from cache for key: {}", &cache_key);
            return Ok(Arc::clone(schemas));
        }
    } // Read lock is released here.

    // Not in cache, so we compile.
    debug!("Compiled schemas not found in cache. Compiling now.");
    let compiled = compile_schemas(config.schemas.clone())?;
    let compiled_arc = Arc::new(compiled);

    // Acquire a write lock to insert the new schemas.
    COMPILED_SCHEMAS_CACHE.write().unwrap().insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached schemas for key: {}", &cache_key);
    Ok(compiled_arc)
}

//! Configuration management for `TextSift-core`.
//!
//! This module defines the core data structures for extraction schemas.
//! It handles serialization/deserialization of YAML configurations and provides
//! utilities for loading, merging, and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Determines how a schema consumes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// One record per input line, matched from the start of the line.
    #[default]
    Line,
    /// Whole-document scan collecting every occurrence of each scan rule.
    Scan,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractionMode::Line => write!(f, "line"),
            ExtractionMode::Scan => write!(f, "scan"),
        }
    }
}

/// A literal replacement applied to a captured field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

/// Maps one capture group of a line schema to a named record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldSpec {
    /// Field name in the extracted record (e.g., "status").
    pub name: String,
    /// Capture group index in the schema pattern (1-based).
    pub group: usize,
    /// If true, a missing capture makes the whole line count as unmatched.
    pub required: bool,
    /// If true, surrounding whitespace is trimmed from the captured value.
    pub trim: bool,
    /// Optional literal substitution applied after trimming.
    pub substitute: Option<Substitution>,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            group: 0,
            required: true,
            trim: false,
            substitute: None,
        }
    }
}

/// One repeated pattern collected across a whole document by a scan schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanRule {
    /// Unique identifier for the rule within its schema (e.g., "href_url").
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Capture group whose text is collected; 0 collects the whole match.
    pub group: usize,
    /// Name of the collection bucket this rule feeds (e.g., "urls").
    pub collect_as: String,
    /// If true, the pattern is compiled case-insensitively.
    pub case_insensitive: bool,
    /// If true, collected values are resolved against the document base URL.
    pub resolve_against_base: bool,
}

impl Default for ScanRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            pattern: String::new(),
            group: 0,
            collect_as: String::new(),
            case_insensitive: false,
            resolve_against_base: false,
        }
    }
}

/// Represents a single extraction schema used by the extraction engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionSchema {
    /// Unique identifier for the schema (e.g., "apache_access").
    pub name: String,
    /// Human-readable description of what the schema extracts.
    pub description: Option<String>,
    /// How the schema consumes input.
    pub mode: ExtractionMode,
    /// The line pattern string. Required for `line` mode, unused in `scan` mode.
    pub pattern: Option<String>,
    /// Named fields captured by the line pattern.
    pub fields: Vec<FieldSpec>,
    /// Scan rules applied across the document. Required for `scan` mode.
    pub scans: Vec<ScanRule>,
    /// HTML-style elements whose content is removed before scanning.
    pub strip_elements: Vec<String>,
    pub version: String,
    pub created_at: String,
    pub author: String,
    pub updated_at: String,
    /// Explicit override for enabling/disabling the schema.
    pub enabled: Option<bool>,
}

impl Default for ExtractionSchema {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            mode: ExtractionMode::Line,
            pattern: None,
            fields: Vec::new(),
            scans: Vec::new(),
            strip_elements: Vec::new(),
            version: "1.0.0".to_string(),
            created_at: "1970-01-01T00:00:00Z".to_string(),
            updated_at: "1970-01-01T00:00:00Z".to_string(),
            author: "Relay Team".to_string(),
            enabled: None,
        }
    }
}

/// Represents the top-level configuration structure for TextSift.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchemaConfig {
    /// A list of extraction schemas.
    pub schemas: Vec<ExtractionSchema>,
}

/// Error type for missing schema configurations.
#[derive(Debug)]
pub struct SchemaNotFoundError {
    pub schema_name: String,
}

impl fmt::Display for SchemaNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Extraction schema '{}' not found.", self.schema_name)
    }
}

impl std::error::Error for SchemaNotFoundError {}

impl SchemaConfig {
    /// Loads extraction schemas from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom schemas from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SchemaConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_schemas(&config.schemas)?;
        info!("Loaded {} schemas from file {}.", config.schemas.len(), path.display());

        Ok(config)
    }

    /// Loads the default extraction schemas from the embedded configuration.
    pub fn load_default_schemas() -> Result<Self> {
        debug!("Loading default schemas from embedded string...");
        let default_yaml = include_str!("../config/default_schemas.yaml");
        let config: SchemaConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default schemas")?;

        debug!("Loaded {} default schemas.", config.schemas.len());
        Ok(config)
    }

    /// Looks up a schema by name.
    pub fn schema(&self, name: &str) -> Option<&ExtractionSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Filters active schemas based on enable/disable lists provided via CLI.
    pub fn set_active_schemas(&mut self, enable_schemas: &[String], disable_schemas: &[String]) {
        let enable_set: HashSet<&str> = enable_schemas.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_schemas.iter().map(String::as_str).collect();

        debug!("Initial schema count before filtering: {}", self.schemas.len());

        let all_schema_names: HashSet<&str> = self.schemas.iter().map(|s| s.name.as_str()).collect();

        for schema_name in enable_set.difference(&all_schema_names) {
            warn!("Schema '{}' in `enable_schemas` list does not exist.", schema_name);
        }

        for schema_name in disable_set.difference(&all_schema_names) {
            warn!("Schema '{}' in `disable_schemas` list does not exist.", schema_name);
        }

        self.schemas.retain(|schema| {
            let schema_name_str = schema.name.as_str();
            !disable_set.contains(schema_name_str)
                && (schema.enabled != Some(false) || enable_set.contains(schema_name_str))
        });

        debug!("Final active schema count after filtering: {}", self.schemas.len());
    }
}

/// Merges user-defined schemas with the defaults. User schemas win by name.
pub fn merge_schemas(
    default_config: SchemaConfig,
    user_config: Option<SchemaConfig>,
) -> SchemaConfig {
    debug!("merge_schemas called. Initial default schema count: {}", default_config.schemas.len());

    let mut final_schemas_map: HashMap<String, ExtractionSchema> = default_config.schemas.into_iter()
        .map(|schema| (schema.name.clone(), schema))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user schemas.", user_cfg.schemas.len());
        for user_schema in user_cfg.schemas {
            final_schemas_map.insert(user_schema.name.clone(), user_schema);
        }
    }

    let mut final_schemas: Vec<ExtractionSchema> = final_schemas_map.into_values().collect();
    // Keep a deterministic order for listings and cache keys.
    final_schemas.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Final total schemas after merge: {}", final_schemas.len());

    SchemaConfig { schemas: final_schemas }
}

/// Validates schema integrity (regex compilation, capture groups, mode shape).
pub fn validate_schemas(schemas: &[ExtractionSchema]) -> Result<()> {
    let mut schema_names = HashSet::new();
    let mut errors = Vec::new();

    for schema in schemas {
        if schema.name.is_empty() {
            errors.push("A schema has an empty `name` field.".to_string());
        } else if !schema_names.insert(schema.name.clone()) {
            errors.push(format!("Duplicate schema name found: '{}'.", schema.name));
        }

        match schema.mode {
            ExtractionMode::Line => {
                let pattern = match &schema.pattern {
                    Some(p) => p,
                    None => {
                        errors.push(format!("Schema '{}' is missing the `pattern` field.", schema.name));
                        continue;
                    }
                };

                if pattern.is_empty() {
                    errors.push(format!("Schema '{}' has an empty `pattern` field.", schema.name));
                    continue;
                }

                if schema.fields.is_empty() {
                    errors.push(format!("Schema '{}' declares no fields.", schema.name));
                }

                let group_count = match Regex::new(pattern) {
                    Ok(re) => re.captures_len() - 1,
                    Err(e) => {
                        errors.push(format!("Schema '{}' has an invalid regex pattern: {}", schema.name, e));
                        continue;
                    }
                };

                for field in &schema.fields {
                    if field.name.is_empty() {
                        errors.push(format!("Schema '{}' has a field with an empty `name`.", schema.name));
                    }
                    if field.group == 0 || field.group > group_count {
                        errors.push(format!(
                            "Schema '{}': field '{}' references non-existent capture group '{}'.",
                            schema.name, field.name, field.group
                        ));
                    }
                }
            }
            ExtractionMode::Scan => {
                if schema.scans.is_empty() {
                    errors.push(format!("Schema '{}' declares no scan rules.", schema.name));
                }

                let mut scan_names = HashSet::new();
                for scan in &schema.scans {
                    if scan.name.is_empty() {
                        errors.push(format!("Schema '{}' has a scan rule with an empty `name`.", schema.name));
                    } else if !scan_names.insert(scan.name.clone()) {
                        errors.push(format!(
                            "Schema '{}': duplicate scan rule name '{}'.",
                            schema.name, scan.name
                        ));
                    }
                    if scan.collect_as.is_empty() {
                        errors.push(format!(
                            "Schema '{}': scan rule '{}' has an empty `collect_as` field.",
                            schema.name, scan.name
                        ));
                    }
                    if scan.pattern.is_empty() {
                        errors.push(format!(
                            "Schema '{}': scan rule '{}' has an empty `pattern` field.",
                            schema.name, scan.name
                        ));
                        continue;
                    }
                    match Regex::new(&scan.pattern) {
                        Ok(re) => {
                            if scan.group >= re.captures_len() {
                                errors.push(format!(
                                    "Schema '{}': scan rule '{}' references non-existent capture group '{}'.",
                                    schema.name, scan.name, scan.group
                                ));
                            }
                        }
                        Err(e) => {
                            errors.push(format!(
                                "Schema '{}': scan rule '{}' has an invalid regex pattern: {}",
                                schema.name, scan.name, e
                            ));
                        }
                    }
                }
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Schema validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

pub fn schema_candidate_paths(name: &str) -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".textsift").join("schemas")),
        dirs::config_dir().map(|p| p.join("textsift").join("schemas")),
        Some(PathBuf::from("/etc/textsift/schemas")),
        Some(PathBuf::from("./config")),
        Some(PathBuf::from("../config")),
    ];

    base_dirs.into_iter()
        .flatten()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a schema configuration given either a direct file path or a bare
/// name resolved against the candidate directories.
pub fn load_schemas_by_name(name_or_path: &str) -> Result<SchemaConfig> {
    debug!("Attempting to load schema config from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.exists() && path.is_file() {
            debug!("Input is a valid file path. Loading directly from: {}", path.display());
            Some(path.to_path_buf())
        } else {
            schema_candidate_paths(name_or_path)
                .into_iter()
                .find(|p| p.exists())
        }
    }.context("Schema config not found. It is not a valid file path, and was not found in expected locations.")?;

    let cfg = SchemaConfig::load_from_file(&path_to_load)?;
    debug!("Successfully loaded schema config '{}'.", name_or_path);
    Ok(cfg)
}

/// Best-effort listing of schema configs found in the candidate directories.
pub fn list_available_schema_files() -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    let candidate_dirs = vec![
        dirs::home_dir().map(|p| p.join(".textsift").join("schemas")),
        dirs::config_dir().map(|p| p.join("textsift").join("schemas")),
        Some(PathBuf::from("/etc/textsift/schemas")),
    ];

    for maybe_dir in candidate_dirs.into_iter().flatten() {
        if let Ok(entries) = fs::read_dir(&maybe_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) == Some("yaml") && seen_paths.insert(path.clone()) {
                    debug!("Found schema config at: {}", path.display());
                    out.push(path);
                }
            }
        } else {
            debug!("Candidate schema directory not found: {}", maybe_dir.display());
        }
    }
    out
}

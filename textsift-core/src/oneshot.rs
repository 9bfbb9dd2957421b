// textsift-core/src/oneshot.rs

//! `oneshot.rs`
//! Convenience wrappers for running core pipelines in one-shot mode (non-UI).
//! Provides helper functions for a full, single-call extraction over
//! in-memory content.

use anyhow::Result;

use crate::extract::line::RecordExtractor;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::schema::SchemaConfig;
use crate::validate::{validate_email_record, EmailRules, ValidationResult};

fn lines_of(content: &str) -> impl Iterator<Item = std::io::Result<String>> + '_ {
    content.lines().map(|line| Ok(line.to_string()))
}

/// Runs a line schema over `content` and returns the full report.
///
/// # Arguments
///
/// * `config` - The merged SchemaConfig (defaults + optional user overrides).
/// * `schema_name` - The line schema to apply.
/// * `content` - The text to extract from, one unit per line.
/// * `source_id` - A stable identifier for the input (file path or pseudo id).
pub fn extract_lines(
    config: &SchemaConfig,
    schema_name: &str,
    content: &str,
    source_id: &str,
) -> Result<PipelineReport> {
    let mut pipeline = Pipeline::from_schema(config, schema_name)?;
    let report = pipeline.run_lines(source_id, lines_of(content))?;
    Ok(report)
}

/// Runs a line schema with email validation attached over `content`.
pub fn validate_lines(
    config: &SchemaConfig,
    schema_name: &str,
    content: &str,
    source_id: &str,
) -> Result<PipelineReport> {
    let mut pipeline = Pipeline::from_schema(config, schema_name)?.with_validator(EmailRules::default());
    let report = pipeline.run_lines(source_id, lines_of(content))?;
    Ok(report)
}

/// Runs a scan schema over an in-memory document and returns the full report.
pub fn scan_document(
    config: &SchemaConfig,
    schema_name: &str,
    document: &str,
    base_url: Option<&str>,
    source_id: &str,
) -> Result<PipelineReport> {
    let mut pipeline = Pipeline::from_schema(config, schema_name)?;
    let owned = document.to_string();
    let report = pipeline.run_document(source_id, move || Ok(owned), base_url)?;
    Ok(report)
}

/// Validates a single address against a line schema, in one call.
pub fn validate_address(
    config: &SchemaConfig,
    schema_name: &str,
    address: &str,
) -> Result<ValidationResult> {
    let extractor = RecordExtractor::new(config, schema_name)?;
    let record = extractor.extract(address.trim(), 1);
    Ok(validate_email_record(&record, &EmailRules::default()))
}

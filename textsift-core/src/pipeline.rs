// textsift-core/src/pipeline.rs
//! Pipeline driver sequencing extraction, validation, and collection.
//!
//! A `Pipeline` owns one compiled schema and walks one input source to
//! completion, producing a `PipelineReport`. Unmatched units are tolerated
//! and recorded; only a failing input source aborts a run. A pipeline runs
//! exactly once: after it completes or aborts it refuses further input.
//!
//! License: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::io;

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::collect::DedupedSet;
use crate::errors::SiftError;
use crate::extract::line::RecordExtractor;
use crate::extract::scan::DocumentScanner;
use crate::record::{unit_snippet, ExtractedRecord, SkippedUnit};
use crate::schema::{ExtractionMode, SchemaConfig, SchemaNotFoundError};
use crate::validate::{validate_email_record, EmailRules, ValidationResult};

/// Lifecycle of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// Accepting input.
    Running,
    /// The source was consumed to its end.
    Completed,
    /// The source failed mid-run; partial results were discarded.
    Aborted,
}

/// Validation outcome for one input unit, paired with the value it judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedUnit {
    pub value: String,
    /// 1-based position of the unit within its source.
    pub source_index: usize,
    pub result: ValidationResult,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineReport {
    pub source_id: String,
    pub schema_name: String,
    /// Every unit offered by the source, blank units included.
    pub units_total: usize,
    /// Units the schema pattern matched.
    pub units_extracted: usize,
    pub records: Vec<ExtractedRecord>,
    pub skipped: Vec<SkippedUnit>,
    pub validations: Vec<ValidatedUnit>,
    pub collections: BTreeMap<String, DedupedSet>,
    /// RFC 3339 timestamp set when the run completed.
    pub finished_at: Option<String>,
}

impl PipelineReport {
    fn new(source_id: &str, schema_name: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            schema_name: schema_name.to_string(),
            ..Default::default()
        }
    }

    pub fn units_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn units_valid(&self) -> usize {
        self.validations.iter().filter(|v| v.result.valid).count()
    }

    pub fn units_invalid(&self) -> usize {
        self.validations.iter().filter(|v| !v.result.valid).count()
    }

    fn finalize(&mut self) {
        self.finished_at = Some(Utc::now().to_rfc3339());
    }
}

#[derive(Debug)]
enum Extractor {
    Line(RecordExtractor),
    Document(DocumentScanner),
}

/// Drives one schema over one input source.
#[derive(Debug)]
pub struct Pipeline {
    extractor: Extractor,
    validator: Option<EmailRules>,
    schema_name: String,
    state: PipelineState,
}

impl Pipeline {
    /// Builds a pipeline for the named schema, selecting the extraction
    /// engine from the schema's mode.
    pub fn from_schema(config: &SchemaConfig, schema_name: &str) -> Result<Self> {
        let schema = config
            .schema(schema_name)
            .ok_or_else(|| SchemaNotFoundError { schema_name: schema_name.to_string() })?;

        let extractor = match schema.mode {
            ExtractionMode::Line => Extractor::Line(RecordExtractor::new(config, schema_name)?),
            ExtractionMode::Scan => Extractor::Document(DocumentScanner::new(config, schema_name)?),
        };

        Ok(Self {
            extractor,
            validator: None,
            schema_name: schema_name.to_string(),
            state: PipelineState::Running,
        })
    }

    /// Attaches email validation to the run. Matched records are validated
    /// field-by-field; unmatched units become format failures instead of
    /// skips.
    pub fn with_validator(mut self, rules: EmailRules) -> Self {
        self.validator = Some(rules);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    fn ensure_running(&self) -> Result<(), SiftError> {
        if self.state != PipelineState::Running {
            return Err(SiftError::PipelineFinished(self.schema_name.clone()));
        }
        Ok(())
    }

    /// Runs a line schema over a unit source.
    ///
    /// Units are trimmed before matching; blank units count toward
    /// `units_total` but produce neither a record nor a skip entry. A unit
    /// the source fails to produce aborts the whole run and discards the
    /// partial report.
    pub fn run_lines<I>(&mut self, source_id: &str, units: I) -> Result<PipelineReport, SiftError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        self.ensure_running()?;
        let extractor = match &self.extractor {
            Extractor::Line(extractor) => extractor,
            Extractor::Document(_) => {
                return Err(SiftError::ModeMismatch(self.schema_name.clone(), "line"));
            }
        };

        let mut report = PipelineReport::new(source_id, &self.schema_name);
        debug!("Pipeline '{}' starting over source '{}'.", self.schema_name, source_id);

        for unit in units {
            let unit = match unit {
                Ok(unit) => unit,
                Err(e) => {
                    self.state = PipelineState::Aborted;
                    warn!(
                        "Source '{}' failed after {} unit(s): {}",
                        source_id, report.units_total, e
                    );
                    return Err(SiftError::SourceFailure(e));
                }
            };

            report.units_total += 1;
            let line = unit.trim();
            if line.is_empty() {
                continue;
            }

            let record = extractor.extract(line, report.units_total);

            if let Some(rules) = &self.validator {
                let result = validate_email_record(&record, rules);
                report.validations.push(ValidatedUnit {
                    value: line.to_string(),
                    source_index: report.units_total,
                    result,
                });
                if record.matched {
                    report.units_extracted += 1;
                    report.records.push(record);
                }
            } else if record.matched {
                report.units_extracted += 1;
                report.records.push(record);
            } else {
                report.skipped.push(SkippedUnit {
                    source_index: report.units_total,
                    snippet: unit_snippet(line),
                });
            }
        }

        self.state = PipelineState::Completed;
        report.finalize();
        info!(
            "Pipeline '{}' completed over '{}': {}/{} unit(s) extracted, {} skipped.",
            self.schema_name,
            source_id,
            report.units_extracted,
            report.units_total,
            report.units_skipped()
        );
        Ok(report)
    }

    /// Runs a scan schema over a whole document produced by `load`.
    ///
    /// The document counts as a single unit. A loader failure aborts the
    /// run, as does an unparseable `base_url`.
    pub fn run_document<F>(
        &mut self,
        source_id: &str,
        load: F,
        base_url: Option<&str>,
    ) -> Result<PipelineReport, SiftError>
    where
        F: FnOnce() -> io::Result<String>,
    {
        self.ensure_running()?;
        let scanner = match &self.extractor {
            Extractor::Document(scanner) => scanner,
            Extractor::Line(_) => {
                return Err(SiftError::ModeMismatch(self.schema_name.clone(), "document"));
            }
        };

        let mut report = PipelineReport::new(source_id, &self.schema_name);
        debug!("Pipeline '{}' starting over document '{}'.", self.schema_name, source_id);

        let document = match load() {
            Ok(document) => document,
            Err(e) => {
                self.state = PipelineState::Aborted;
                warn!("Source '{}' failed to load: {}", source_id, e);
                return Err(SiftError::SourceFailure(e));
            }
        };

        report.units_total = 1;
        match scanner.scan(&document, base_url) {
            Ok(buckets) => {
                report.units_extracted = 1;
                report.collections = buckets;
            }
            Err(e) => {
                self.state = PipelineState::Aborted;
                warn!("Pipeline '{}' aborted over '{}': {}", self.schema_name, source_id, e);
                return Err(SiftError::AnyhowWrapper(e));
            }
        }

        self.state = PipelineState::Completed;
        report.finalize();
        let collected: usize = report.collections.values().map(DedupedSet::len).sum();
        info!(
            "Pipeline '{}' completed over '{}': {} value(s) collected into {} bucket(s).",
            self.schema_name,
            source_id,
            collected,
            report.collections.len()
        );
        Ok(report)
    }
}

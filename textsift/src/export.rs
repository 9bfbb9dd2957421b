// textsift/src/export.rs
//! File and stdout exports for run reports.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use textsift_core::pipeline::PipelineReport;
use textsift_core::record::ExtractedRecord;

/// A run report wrapped with tool provenance, the shape written by
/// `--json-file` and `--json-stdout`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: String,
    #[serde(flatten)]
    pub report: &'a PipelineReport,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a PipelineReport) -> Self {
        Self {
            tool: "textsift",
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now().to_rfc3339(),
            report,
        }
    }
}

/// Writes the report as pretty JSON to `path`.
pub fn write_json_report(path: &Path, report: &PipelineReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::new(report))
        .context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    info!("Run report exported to {}", path.display());
    Ok(())
}

/// Writes the report as pretty JSON to the given writer (normally stdout).
pub fn print_json_report(writer: &mut dyn Write, report: &PipelineReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::new(report))
        .context("Failed to serialize run report")?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

/// Writes extracted records to a CSV file, one row per record.
///
/// The first column is the record's position within the source; the rest
/// follow the schema's field declaration order. Fields a record is missing
/// are written as empty cells.
pub fn write_records_csv(path: &Path, records: &[ExtractedRecord], field_names: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    let mut header = vec!["unit".to_string()];
    header.extend(field_names.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.source_index.to_string()];
        for field in field_names {
            row.push(record.field(field).unwrap_or_default().to_string());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    info!("{} record(s) exported to {}", records.len(), path.display());
    Ok(())
}

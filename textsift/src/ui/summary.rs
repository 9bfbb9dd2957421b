// textsift/src/ui/summary.rs
//! Rendering of run reports, rankings, and validation verdicts.
//!
//! All functions here write to a caller-supplied writer so commands can
//! direct summaries to stderr while keeping stdout clean for data.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::AnsiColors;
use std::io::Write;

use textsift_core::aggregate::FrequencyTable;
use textsift_core::pipeline::PipelineReport;
use textsift_core::schema::SchemaConfig;
use textsift_core::validate::ValidationResult;

use crate::ui::paint;

/// Prints the extraction totals and one frequency table per aggregated field.
pub fn print_log_analysis(
    writer: &mut dyn Write,
    report: &PipelineReport,
    rankings: &[(String, FrequencyTable)],
    top: usize,
    colored: bool,
) -> Result<()> {
    writeln!(writer, "\n{}", paint("--- Extraction Summary ---", AnsiColors::Cyan, colored))?;
    writeln!(writer, "Source:            {}", report.source_id)?;
    writeln!(writer, "Schema:            {}", report.schema_name)?;
    writeln!(writer, "Units read:        {}", report.units_total)?;
    writeln!(writer, "Records extracted: {}", report.units_extracted)?;
    writeln!(writer, "Units skipped:     {}", report.units_skipped())?;

    for (field, table) in rankings {
        if table.is_empty() {
            continue;
        }
        writeln!(
            writer,
            "\n{}",
            paint(
                &format!("{} ({} distinct values)", field, table.distinct()),
                AnsiColors::Green,
                colored,
            )
        )?;
        writeln!(writer, "{}", ranking_table(table, top))?;
    }
    writeln!(writer)?;
    Ok(())
}

fn ranking_table(table: &FrequencyTable, top: usize) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Value", "Count"]);
    for entry in table.top(top) {
        out.add_row(vec![entry.value, entry.count.to_string()]);
    }
    out
}

/// Prints the per-bucket counts of a document scan.
pub fn print_scan_report(writer: &mut dyn Write, report: &PipelineReport, colored: bool) -> Result<()> {
    writeln!(writer, "\n{}", paint("--- Scrape Summary ---", AnsiColors::Cyan, colored))?;
    writeln!(writer, "Source: {}", report.source_id)?;
    writeln!(writer, "Schema: {}", report.schema_name)?;
    for (bucket, values) in &report.collections {
        writeln!(writer, "{}: {}", bucket_title(bucket), values.len())?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes the collected values themselves, one section per bucket. This is
/// the scrape command's primary output, so it stays free of color.
pub fn write_collections(writer: &mut dyn Write, report: &PipelineReport) -> Result<()> {
    for (bucket, values) in &report.collections {
        writeln!(writer, "{}:", bucket)?;
        for value in values.iter() {
            writeln!(writer, "  {}", value)?;
        }
    }
    Ok(())
}

fn bucket_title(name: &str) -> String {
    match name {
        "urls" => "URLs".to_string(),
        "emails" => "Emails".to_string(),
        "phone_numbers" => "Phone Numbers".to_string(),
        other => other
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Prints one address verdict with its errors and warnings indented below.
pub fn print_validation(
    writer: &mut dyn Write,
    value: &str,
    result: &ValidationResult,
    colored: bool,
) -> Result<()> {
    let verdict = if result.valid {
        paint("VALID", AnsiColors::Green, colored)
    } else {
        paint("INVALID", AnsiColors::Red, colored)
    };
    writeln!(writer, "{} ... {}", value, verdict)?;
    for error in &result.errors {
        writeln!(writer, "  {} {}", paint("error:", AnsiColors::Red, colored), error)?;
    }
    for warning in &result.warnings {
        writeln!(writer, "  {} {}", paint("warning:", AnsiColors::Yellow, colored), warning)?;
    }
    Ok(())
}

/// Prints the batch validation totals.
pub fn print_validation_totals(writer: &mut dyn Write, report: &PipelineReport, colored: bool) -> Result<()> {
    writeln!(writer, "\n{}", paint("--- Validation Summary ---", AnsiColors::Cyan, colored))?;
    writeln!(writer, "Addresses checked: {}", report.validations.len())?;
    writeln!(writer, "Valid:             {}", report.units_valid())?;
    writeln!(writer, "Invalid:           {}", report.units_invalid())?;
    Ok(())
}

/// Prints the merged schema set as a table.
pub fn print_schema_list(writer: &mut dyn Write, config: &SchemaConfig) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Mode", "Version", "Description"]);
    for schema in &config.schemas {
        table.add_row(vec![
            schema.name.clone(),
            schema.mode.to_string(),
            schema.version.clone(),
            schema.description.clone().unwrap_or_default(),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

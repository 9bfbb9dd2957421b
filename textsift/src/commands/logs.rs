// textsift/src/commands/logs.rs
//! The `logs` command: line-by-line record extraction plus frequency analysis.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io;

use textsift_core::aggregate::{aggregate, FrequencyTable};
use textsift_core::pipeline::Pipeline;

use crate::cli::LogsCommand;
use crate::commands::{load_schema_config, open_line_source, source_label};
use crate::export;
use crate::ui::summary;
use crate::ui::warn_msg;

pub fn run(cmd: &LogsCommand, quiet: bool) -> Result<i32> {
    info!("Starting log extraction with schema '{}'.", cmd.schema);
    let config = load_schema_config(cmd.config.as_deref())?;
    let mut pipeline = Pipeline::from_schema(&config, &cmd.schema)?;

    // Field declaration order drives both the CSV layout and the default
    // aggregation set.
    let schema_fields: Vec<String> = config
        .schema(&cmd.schema)
        .map(|s| s.fields.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default();

    if cmd.input_file.is_none() {
        info!("Reading input from stdin...");
    }
    let source_id = source_label(cmd.input_file.as_deref());
    let units = open_line_source(cmd.input_file.as_deref());
    let report = pipeline.run_lines(&source_id, units)?;

    let fields = if cmd.fields.is_empty() { &schema_fields } else { &cmd.fields };
    let rankings: Vec<(String, FrequencyTable)> = fields
        .iter()
        .map(|field| (field.clone(), aggregate(&report.records, field)))
        .collect();

    if let Some(path) = &cmd.csv {
        export::write_records_csv(path, &report.records, &schema_fields)?;
    }
    if let Some(path) = &cmd.json_file {
        export::write_json_report(path, &report)?;
    }
    if cmd.json_stdout {
        export::print_json_report(&mut io::stdout().lock(), &report)?;
    }

    if report.units_skipped() > 0 && !quiet {
        warn_msg(format!(
            "{} unit(s) did not match schema '{}'.",
            report.units_skipped(),
            report.schema_name
        ));
    }

    if !cmd.no_summary && !quiet {
        let colored = io::stderr().is_terminal();
        summary::print_log_analysis(&mut io::stderr(), &report, &rankings, cmd.top, colored)?;
    }

    info!("Log extraction completed.");
    Ok(0)
}

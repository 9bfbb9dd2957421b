// textsift/src/commands/validate.rs
//! The `validate` command: single-address and batch email validation.
//!
//! A single address exits non-zero when it fails validation; a batch run
//! exits zero regardless of verdicts unless `--strict` is set.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Write};

use textsift_core::oneshot::validate_address;
use textsift_core::pipeline::Pipeline;
use textsift_core::validate::EmailRules;

use crate::cli::ValidateCommand;
use crate::commands::{load_schema_config, open_line_source, source_label};
use crate::export;
use crate::ui::summary;

pub fn run(cmd: &ValidateCommand, quiet: bool) -> Result<i32> {
    let config = load_schema_config(cmd.config.as_deref())?;

    if let Some(address) = &cmd.address {
        let address = address.trim();
        let result = validate_address(&config, &cmd.schema, address)?;

        let stdout = io::stdout();
        let colored = stdout.is_terminal();
        let mut writer = stdout.lock();
        if cmd.json_stdout {
            let json = serde_json::json!({
                "address": address,
                "valid": result.valid,
                "errors": result.errors,
                "warnings": result.warnings,
            });
            writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        } else {
            summary::print_validation(&mut writer, address, &result, colored)?;
        }
        return Ok(if result.valid { 0 } else { 1 });
    }

    info!("Starting batch validation with schema '{}'.", cmd.schema);
    let mut pipeline =
        Pipeline::from_schema(&config, &cmd.schema)?.with_validator(EmailRules::default());

    if cmd.input_file.is_none() {
        info!("Reading addresses from stdin...");
    }
    let source_id = source_label(cmd.input_file.as_deref());
    let units = open_line_source(cmd.input_file.as_deref());
    let report = pipeline.run_lines(&source_id, units)?;

    if cmd.json_stdout {
        export::print_json_report(&mut io::stdout().lock(), &report)?;
    } else {
        let stdout = io::stdout();
        let colored = stdout.is_terminal();
        let mut writer = stdout.lock();
        for unit in &report.validations {
            summary::print_validation(&mut writer, &unit.value, &unit.result, colored)?;
        }
    }

    if !quiet {
        let colored = io::stderr().is_terminal();
        summary::print_validation_totals(&mut io::stderr(), &report, colored)?;
    }

    info!(
        "Batch validation completed: {} valid, {} invalid.",
        report.units_valid(),
        report.units_invalid()
    );

    if cmd.strict && report.units_invalid() > 0 {
        return Ok(1);
    }
    Ok(0)
}

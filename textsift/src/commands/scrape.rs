// textsift/src/commands/scrape.rs
//! The `scrape` command: whole-document scanning for URLs, emails, and
//! phone numbers.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::fs;
use std::io;

use textsift_core::pipeline::Pipeline;

use crate::cli::ScrapeCommand;
use crate::commands::{document_loader, load_schema_config, source_label};
use crate::export;
use crate::ui::info_msg;
use crate::ui::summary;

pub fn run(cmd: &ScrapeCommand, quiet: bool) -> Result<i32> {
    info!("Starting document scan with schema '{}'.", cmd.schema);
    let config = load_schema_config(cmd.config.as_deref())?;
    let mut pipeline = Pipeline::from_schema(&config, &cmd.schema)?;

    if cmd.input_file.is_none() {
        info!("Reading document from stdin...");
    }
    let source_id = source_label(cmd.input_file.as_deref());
    let load = document_loader(cmd.input_file.clone());
    let report = pipeline.run_document(&source_id, load, cmd.base_url.as_deref())?;

    if let Some(path) = &cmd.output {
        if !quiet {
            info_msg(format!("Writing collected values to file: {}", path.display()));
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        summary::write_collections(&mut file, &report)?;
    } else if !cmd.json_stdout {
        summary::write_collections(&mut io::stdout().lock(), &report)?;
    }

    if let Some(path) = &cmd.json_file {
        export::write_json_report(path, &report)?;
    }
    if cmd.json_stdout {
        export::print_json_report(&mut io::stdout().lock(), &report)?;
    }

    if !quiet {
        let colored = io::stderr().is_terminal();
        summary::print_scan_report(&mut io::stderr(), &report, colored)?;
    }

    info!("Document scan completed.");
    Ok(0)
}

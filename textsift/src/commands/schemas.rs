// textsift/src/commands/schemas.rs
//! The `schemas` command: inspection of the merged schema set.

use anyhow::Result;
use std::io::{self, Write};

use textsift_core::schema::list_available_schema_files;

use crate::cli::SchemasCommand;
use crate::commands::load_schema_config;
use crate::ui::summary;

pub fn run(cmd: &SchemasCommand) -> Result<i32> {
    match cmd {
        SchemasCommand::List { config } => {
            let merged = load_schema_config(config.as_deref())?;

            let stdout = io::stdout();
            let mut writer = stdout.lock();
            summary::print_schema_list(&mut writer, &merged)?;

            let files = list_available_schema_files();
            if !files.is_empty() {
                writeln!(writer, "\nSchema files discovered on this machine:")?;
                for file in files {
                    writeln!(writer, "  {}", file.display())?;
                }
            }
            Ok(0)
        }
    }
}

// textsift/src/commands/mod.rs
//! Command implementations for the textsift CLI.

pub mod logs;
pub mod schemas;
pub mod scrape;
pub mod validate;

use anyhow::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use textsift_core::schema::{merge_schemas, SchemaConfig};

/// Loads the embedded default schemas and merges a user config over them
/// when one was given on the command line.
pub fn load_schema_config(config_path: Option<&Path>) -> Result<SchemaConfig> {
    let default_config = SchemaConfig::load_default_schemas()?;
    let user_config = match config_path {
        Some(path) => Some(SchemaConfig::load_from_file(path)?),
        None => None,
    };
    Ok(merge_schemas(default_config, user_config))
}

/// The identifier a run report carries for its input.
pub fn source_label(input_file: Option<&Path>) -> String {
    match input_file {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

/// Opens a unit source for the line-oriented commands.
///
/// A file that cannot be opened surfaces the error as the source's first
/// unit, so the pipeline aborts through its normal source-failure path
/// instead of short-circuiting before the run starts.
pub fn open_line_source(input_file: Option<&Path>) -> Box<dyn Iterator<Item = io::Result<String>>> {
    match input_file {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file).lines()),
            Err(e) => Box::new(std::iter::once(Err(e))),
        },
        None => Box::new(io::stdin().lines()),
    }
}

/// Builds the one-shot document loader for the scan pipeline.
pub fn document_loader(input_file: Option<PathBuf>) -> impl FnOnce() -> io::Result<String> {
    move || match input_file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut document = String::new();
            io::stdin().read_to_string(&mut document)?;
            Ok(document)
        }
    }
}

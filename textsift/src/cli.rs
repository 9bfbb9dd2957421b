// textsift/src/cli.rs
//! This file defines the command-line interface (CLI) for the textsift application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "textsift",
    author = "Relay Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sift structured data out of raw text",
    long_about = "Textsift is a command-line utility for pulling structured data out of unstructured text. It extracts records from log files line by line, scrapes URLs, email addresses and phone numbers out of HTML documents, and validates email addresses against a configurable schema set.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for 'textsift' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `textsift` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts records from a log file line by line and summarizes field frequencies.
    #[command(about = "Extracts records from a log file line by line and summarizes field frequencies.")]
    Logs(LogsCommand),

    /// Scrapes URLs, email addresses and phone numbers out of an HTML document.
    #[command(about = "Scrapes URLs, email addresses and phone numbers out of an HTML document.")]
    Scrape(ScrapeCommand),

    /// Validates email addresses, either a single one or a batch from a file.
    #[command(about = "Validates email addresses, either a single one or a batch from a file.")]
    Validate(ValidateCommand),

    /// Provides tools for inspecting the available extraction schemas.
    #[command(subcommand, about = "Provides tools for inspecting the available extraction schemas.")]
    Schemas(SchemasCommand),
}

/// Arguments for the `logs` command.
#[derive(Parser, Debug)]
pub struct LogsCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom extraction schema file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom extraction schema file (YAML).")]
    pub config: Option<PathBuf>,

    /// Name of the extraction schema to apply.
    #[arg(long = "schema", value_name = "NAME", default_value = "apache_access", help = "Select the extraction schema to apply (defaults to 'apache_access').")]
    pub schema: String,

    /// Aggregate only these fields (comma-separated). Defaults to every field the schema declares.
    #[arg(long = "field", short = 'f', value_delimiter = ',', help = "Aggregate only these fields (comma-separated).")]
    pub fields: Vec<String>,

    /// Limit the number of ranked values displayed per field.
    #[arg(long = "top", value_name = "N", default_value = "10", help = "Display up to N ranked values per field in the console output.")]
    pub top: usize,

    /// Export the extracted records to a CSV file.
    #[arg(long = "csv", value_name = "FILE", help = "Export the extracted records to a CSV file.")]
    pub csv: Option<PathBuf>,

    /// Export the run report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the run report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the run report as JSON to stdout (conflicts with --json-file).
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the run report to stdout as JSON.")]
    pub json_stdout: bool,

    /// Suppress the extraction summary.
    #[arg(long = "no-summary", help = "Suppress the extraction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scrape` command.
#[derive(Parser, Debug)]
pub struct ScrapeCommand {
    /// Path to an input document (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the document from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom extraction schema file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom extraction schema file (YAML).")]
    pub config: Option<PathBuf>,

    /// Name of the extraction schema to apply.
    #[arg(long = "schema", value_name = "NAME", default_value = "html_assets", help = "Select the extraction schema to apply (defaults to 'html_assets').")]
    pub schema: String,

    /// Resolve relative URLs against this base before collecting them.
    #[arg(long = "base-url", value_name = "URL", help = "Resolve relative URLs against this base before collecting them.")]
    pub base_url: Option<String>,

    /// Write the collected values to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the collected values to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Export the run report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the run report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the run report as JSON to stdout (conflicts with --json-file).
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Export the run report to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateCommand {
    /// A single email address to validate.
    #[arg(value_name = "ADDRESS", help = "A single email address to validate.")]
    pub address: Option<String>,

    /// Path to a file of addresses, one per line (reads from stdin if no address is given).
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "address", help = "Read addresses from a specified file, one per line.")]
    pub input_file: Option<PathBuf>,

    /// Path to a custom extraction schema file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom extraction schema file (YAML).")]
    pub config: Option<PathBuf>,

    /// Name of the extraction schema used to split addresses.
    #[arg(long = "schema", value_name = "NAME", default_value = "email_address", help = "Select the extraction schema used to split addresses (defaults to 'email_address').")]
    pub schema: String,

    /// Exit with a non-zero code if any address in a batch fails validation.
    #[arg(long = "strict", help = "Exit with a non-zero code if any address in a batch fails validation.")]
    pub strict: bool,

    /// Print the validation results as JSON to stdout.
    #[arg(long = "json-stdout", help = "Export the validation results to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Subcommands for the `schemas` command.
#[derive(Subcommand, Debug)]
pub enum SchemasCommand {
    #[command(about = "Lists all available extraction schemas.")]
    List {
        /// Path to a custom extraction schema file to merge in before listing.
        #[arg(long = "config", value_name = "FILE", help = "Path to a custom extraction schema file to merge in before listing.")]
        config: Option<PathBuf>,
    },
}

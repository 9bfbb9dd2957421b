// textsift/src/main.rs
//! TextSift entry point.
//!
//! Parses the CLI, wires up logging, and dispatches to the selected command.

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use std::env;
use std::process;

use textsift::cli::{Cli, Commands};
use textsift::commands;
use textsift::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else if env::var_os("RUST_LOG").is_some() {
        logger::init_logger(None);
    } else {
        logger::init_logger(Some(LevelFilter::Info));
    }

    info!("textsift started. Version: {}", env!("CARGO_PKG_VERSION"));

    let exit_code = match &args.command {
        Commands::Logs(cmd) => commands::logs::run(cmd, args.quiet)?,
        Commands::Scrape(cmd) => commands::scrape::run(cmd, args.quiet)?,
        Commands::Validate(cmd) => commands::validate::run(cmd, args.quiet)?,
        Commands::Schemas(cmd) => commands::schemas::run(cmd)?,
    };

    if exit_code != 0 {
        process::exit(exit_code);
    }
    Ok(())
}

// textsift/src/lib.rs
//! # TextSift CLI Application
//!
//! This crate provides the command-line interface for the TextSift extraction
//! engine. The heavy lifting (schema compilation, extraction, validation,
//! aggregation) lives in `textsift-core`; this crate concerns itself with
//! argument parsing, input plumbing, console reporting, and file exports.

pub mod cli;
pub mod commands;
pub mod export;
pub mod logger;
pub mod ui;

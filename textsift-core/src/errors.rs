//! errors.rs - Custom error types for the textsift-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `textsift-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SiftError {
    #[error("Failed to compile extraction schema '{0}': {1}")]
    SchemaCompilationError(String, regex::Error),

    #[error("Schema '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Schema '{0}' does not support {1} input")]
    ModeMismatch(String, &'static str),

    #[error("Pipeline for schema '{0}' has already finished and cannot be run again")]
    PipelineFinished(String),

    #[error("Input source failed: {0}")]
    SourceFailure(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    // Add other specific error types as the project grows
    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

// textsift-core/src/lib.rs
//! # TextSift Core Library
//!
//! `textsift-core` provides the fundamental, platform-independent logic for
//! structured text extraction. It defines the core data structures for
//! extraction schemas, provides mechanisms for compiling these schemas, and
//! implements the extraction, validation, collection, and aggregation stages
//! that a `Pipeline` sequences over an input source.
//!
//! The library is designed to be pure and stateless, focusing solely on the
//! transformation of input data based on defined schemas, without concerns
//! for I/O or application-specific state management. Input reaches the
//! library as iterators and in-memory strings; reporting what comes out is
//! the caller's business.
//!
//! ## Modules
//!
//! * `schema`: Defines `ExtractionSchema`s and `SchemaConfig` for specifying patterns and fields.
//! * `extract`: Contains schema compilation and the two extraction engines.
//! * `record`: Defines data structures for extracted records and per-unit diagnostics.
//! * `validate`: Pure-data validation rules for extracted email records.
//! * `collect`: Deduplicating collection buckets and URL reference resolution.
//! * `aggregate`: Frequency tables over extracted record fields.
//! * `pipeline`: The driver that walks one source with one schema and reports the outcome.
//! * `oneshot`: Convenience wrappers for one-call use over in-memory content.
//!
//! ## Public API
//!
//! The public API provides a cohesive set of types and functions for
//! configuring and running an extraction pipeline. Key components are
//! organized by functionality:
//!
//! **Configuration & Schemas**
//!
//! * [`SchemaConfig`]: Manages collections of `ExtractionSchema`s, including loading, merging, and filtering.
//! * [`ExtractionSchema`]: Defines a single schema for turning text into structured data.
//! * [`merge_schemas`]: Merges default and user-defined configurations.
//! * [`SchemaConfig::load_from_file`]: Loads schemas from a YAML file.
//! * [`SchemaConfig::load_default_schemas`]: Loads the built-in set of default schemas.
//!
//! **Extraction Engines**
//!
//! * [`RecordExtractor`]: Applies a line schema to one unit at a time.
//! * [`DocumentScanner`]: Sweeps a whole document and collects every rule occurrence.
//!
//! **Pipeline**
//!
//! * [`Pipeline`]: Drives one schema over one source to completion.
//! * [`PipelineReport`]: Everything a run produced, including per-unit diagnostics.
//!
//! **Validation & Aggregation**
//!
//! * [`validate_email_parts`]: Structural rules over an already-split address.
//! * [`FrequencyTable`]: Deterministically ordered value counts for one field.
//!
//! ## Usage Example
//!
//! ```rust
//! use textsift_core::{oneshot, SchemaConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the default extraction schemas.
//!     let config = SchemaConfig::load_default_schemas()?;
//!
//!     // 2. Prepare some content to extract from.
//!     let input = "10.0.0.5 - - [12/Jan/2026:08:10:00 +0000] \"GET /status HTTP/1.1\" 200 512";
//!
//!     // 3. Run the line pipeline in a single, one-shot function call.
//!     let report = oneshot::extract_lines(&config, "apache_access", input, "example.log")?;
//!
//!     assert_eq!(report.units_extracted, 1);
//!     assert_eq!(report.records[0].field("method"), Some("GET"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses `anyhow::Error` for fallible operations and defines
//! specific error types like `SiftError` and `SchemaNotFoundError` for
//! clearer error reporting.
//!
//! ## Design Principles
//!
//! * **Data-driven:** Extraction behavior lives in schemas, not in code paths.
//! * **Stateless:** The core library does not maintain application state.
//! * **Testable:** Logic is easily unit-testable in isolation.
//! * **Extensible:** The design supports adding new schemas or collection
//!   buckets with minimal changes to the core application logic.
//!
//! ---
//! License: MIT OR Apache-2.0

// All modules must be declared before they can be used.
pub mod aggregate;
pub mod collect;
pub mod errors;
pub mod extract;
pub mod oneshot;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod validate;

// Correctly re-exporting modules and types from their canonical locations.
// This ensures the public API is clean and well-defined.

/// Re-exports the public configuration types and functions for managing extraction schemas.
pub use schema::{
    list_available_schema_files,
    load_schemas_by_name,
    merge_schemas,
    schema_candidate_paths,
    validate_schemas,
    ExtractionMode,
    ExtractionSchema,
    FieldSpec,
    ScanRule,
    SchemaConfig,
    SchemaNotFoundError,
    Substitution,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SiftError;

/// Re-exports the concrete extraction engines.
pub use extract::line::RecordExtractor;
pub use extract::scan::DocumentScanner;

/// Re-exports types for extracted records and per-unit diagnostics.
pub use record::{unit_snippet, ExtractedRecord, SkippedUnit, SNIPPET_MAX_LEN};

/// Re-exports the validation rules and result types.
pub use validate::{
    validate_email_parts,
    validate_email_record,
    EmailRules,
    ValidationResult,
    MAX_DOMAIN_LENGTH,
    MAX_LOCAL_PART_LENGTH,
    MIN_TLD_LENGTH,
};

/// Re-exports the collection types used by scan schemas.
pub use collect::{DedupedSet, UrlResolver};

/// Re-exports frequency aggregation over extracted records.
pub use aggregate::{aggregate, FrequencyEntry, FrequencyTable};

/// Re-exports the pipeline driver and its report types.
pub use pipeline::{Pipeline, PipelineReport, PipelineState, ValidatedUnit};

// Re-export key types from the extract::compiler module for advanced usage.
pub use extract::compiler::{compile_schemas, get_or_compile_schemas, CompiledSchema, CompiledSchemas};

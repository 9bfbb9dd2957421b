//! Core extraction engines for TextSift.
//!
//! This module is responsible for compiling extraction schemas into efficient
//! regular expressions and applying them to input content. Line schemas turn
//! individual units into named-field records, while scan schemas sweep whole
//! documents and collect every occurrence of their rules. It also manages the
//! stripping of ANSI escape codes to ensure accurate pattern matching on raw
//! text.
//!
//! This module works closely with `schema` (for schema definitions) and
//! `record` (for result types).

pub mod compiler;
pub mod line;
pub mod scan;

// textsift-core/src/validate.rs
//! Field validation for extracted email records.
//!
//! Validation is pure data inspection: the extractor has already split an
//! address into its local part and domain, and the rules here only look at
//! those captured values. A record the extractor could not match fails with
//! a single format error and no further checks.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::ExtractedRecord;

pub const MAX_LOCAL_PART_LENGTH: usize = 64;
pub const MAX_DOMAIN_LENGTH: usize = 255;
pub const MIN_TLD_LENGTH: usize = 2;

/// Common provider misspellings checked against the domain.
static PROVIDER_TYPOS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("gmial", "gmail"),
        ("yahooo", "yahoo"),
        ("hotmial", "hotmail"),
    ]
});

/// Outcome of validating one address.
///
/// `valid` is true exactly when `errors` is empty; warnings never affect
/// validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors, warnings }
    }
}

/// Thresholds applied by the email validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRules {
    pub max_local_part: usize,
    pub max_domain: usize,
    pub min_tld: usize,
}

impl Default for EmailRules {
    fn default() -> Self {
        Self {
            max_local_part: MAX_LOCAL_PART_LENGTH,
            max_domain: MAX_DOMAIN_LENGTH,
            min_tld: MIN_TLD_LENGTH,
        }
    }
}

/// Validates an extracted email record.
///
/// An unmatched record fails immediately with the single format error.
pub fn validate_email_record(record: &ExtractedRecord, rules: &EmailRules) -> ValidationResult {
    if !record.matched {
        return ValidationResult {
            valid: false,
            errors: vec!["Invalid email format".to_string()],
            warnings: Vec::new(),
        };
    }

    let local_part = record.field("local_part").unwrap_or_default();
    let domain = record.field("domain").unwrap_or_default();
    validate_email_parts(local_part, domain, rules)
}

/// Applies every structural rule to an already-split address.
///
/// All failures accumulate; validation never stops at the first error.
pub fn validate_email_parts(local_part: &str, domain: &str, rules: &EmailRules) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if local_part.chars().count() > rules.max_local_part {
        errors.push(format!("Local part too long (max {} characters)", rules.max_local_part));
    }
    if local_part.starts_with('.') || local_part.ends_with('.') {
        errors.push("Local part cannot start or end with dot".to_string());
    }
    if local_part.contains("..") {
        errors.push("Local part cannot contain consecutive dots".to_string());
    }

    if domain.chars().count() > rules.max_domain {
        errors.push(format!("Domain too long (max {} characters)", rules.max_domain));
    }
    if !domain.contains('.') {
        errors.push("Domain must have at least one dot".to_string());
    }
    let tld = domain.rsplit('.').next().unwrap_or_default();
    if tld.chars().count() < rules.min_tld {
        errors.push(format!("TLD must be at least {} characters", rules.min_tld));
    }

    let domain_lower = domain.to_lowercase();
    for (typo, provider) in PROVIDER_TYPOS.iter() {
        if domain_lower.contains(typo) {
            warnings.push(format!("Did you mean '{}'?", provider));
        }
    }

    ValidationResult::from_parts(errors, warnings)
}

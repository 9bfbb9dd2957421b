// textsift-core/src/collect.rs
//! Deduplicating collection of scan results and URL reference resolution.
//!
//! License: MIT OR Apache-2.0

use std::collections::BTreeSet;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

/// Prefixes that mark a reference as already absolute. Protocol-relative
/// references (`//host/path`) also count as absolute.
const ABSOLUTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// An ordered set of collected values.
///
/// Inserting an already-present value is a no-op, and iteration always
/// yields values in lexicographic order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupedSet {
    values: BTreeSet<String>,
}

impl DedupedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning false if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates values in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Consumes the set, yielding its values in lexicographic order.
    pub fn into_sorted_vec(self) -> Vec<String> {
        self.values.into_iter().collect()
    }
}

impl Extend<String> for DedupedSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl FromIterator<String> for DedupedSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Resolves relative references collected from a document against its base URL.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: Url,
}

impl UrlResolver {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .with_context(|| format!("Invalid base URL '{}'", base))?;
        Ok(Self { base })
    }

    /// Returns true when a reference must be kept as-is rather than resolved.
    pub fn is_absolute(reference: &str) -> bool {
        reference.starts_with("//") || ABSOLUTE_PREFIXES.iter().any(|p| reference.starts_with(p))
    }

    /// Resolves `reference` against the base URL.
    ///
    /// Absolute references pass through untouched. References that cannot be
    /// joined (for example `mailto:` forms the base scheme rejects) are also
    /// passed through rather than dropped.
    pub fn resolve(&self, reference: &str) -> String {
        if Self::is_absolute(reference) {
            return reference.to_string();
        }
        match self.base.join(reference) {
            Ok(resolved) => resolved.into(),
            Err(e) => {
                debug!("Could not resolve '{}' against '{}': {}", reference, self.base, e);
                reference.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DedupedSet::new();
        assert!(set.insert("a@example.com"));
        assert!(!set.insert("a@example.com"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_is_lexicographic() {
        let mut set = DedupedSet::new();
        set.insert("zeta");
        set.insert("alpha");
        set.insert("mu");
        let collected: Vec<&str> = set.iter().collect();
        assert_eq!(collected, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_resolver_joins_relative_paths() {
        let resolver = UrlResolver::new("https://example.com/docs/").unwrap();
        assert_eq!(resolver.resolve("page.html"), "https://example.com/docs/page.html");
        assert_eq!(resolver.resolve("/about"), "https://example.com/about");
    }

    #[test]
    fn test_resolver_keeps_absolute_references() {
        let resolver = UrlResolver::new("https://example.com/").unwrap();
        assert_eq!(resolver.resolve("http://other.net/a"), "http://other.net/a");
        assert_eq!(resolver.resolve("https://other.net/b"), "https://other.net/b");
        assert_eq!(resolver.resolve("//cdn.example.com/x.js"), "//cdn.example.com/x.js");
    }

    #[test]
    fn test_resolver_rejects_invalid_base() {
        assert!(UrlResolver::new("not a url").is_err());
    }
}

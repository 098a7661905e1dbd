//! Canonical parameter strings.
//!
//! The signature covers the exact bytes of the query string, so pairs are
//! emitted in insertion order and values are written verbatim (no sorting,
//! no percent-encoding).

use std::fmt::Display;

/// Ordered `key=value` pairs joined with `&`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalParams {
    pairs: Vec<(&'static str, String)>,
}

impl CanonicalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn finish(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

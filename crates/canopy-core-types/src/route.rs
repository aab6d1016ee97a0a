//! Stable route keys
//!
//! A route is a path-independent key under which a live object can be
//! re-found across reconciliation passes, even after the object has moved or
//! the literal tree path to it no longer resolves.

use serde::{Deserialize, Serialize};

/// Stable key identifying a reconciled live object across passes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey(String);

impl RouteKey {
    /// Create a route key from any string-like value
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

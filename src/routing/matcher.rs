//! Path prefix matching.
//!
//! # Design Decisions
//! - Path matching is case-sensitive and byte-wise
//! - Only the path takes part; the query string never does
//! - No segment boundary: "/api" matches "/apidocs" as well as "/api/v1"
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` begins with this prefix.
    pub fn matches_path(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// True when every path this matcher accepts is also accepted by `earlier`.
    pub fn is_shadowed_by(&self, earlier: &PathPrefixMatcher) -> bool {
        self.prefix.starts_with(&earlier.prefix)
    }
}

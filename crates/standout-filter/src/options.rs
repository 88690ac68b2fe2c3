//! Builder configuration.

use serde::{Deserialize, Serialize};

/// Default limit on expression nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options shared by a builder and every nested group it creates.
///
/// Missing fields take their defaults when deserializing, so a partial
/// configuration file is enough:
///
/// ```
/// use standout_filter::FilterOptions;
///
/// let options: FilterOptions = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(options.max_depth, 8);
/// assert!(!options.case_sensitive_contains);
/// assert!(options.validate_paths);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Maximum nesting depth accepted when compiling the predicate.
    pub max_depth: usize,
    /// Whether `where_contains` matches case-sensitively.
    pub case_sensitive_contains: bool,
    /// Whether field paths are validated when clauses are added.
    pub validate_paths: bool,
    /// Whether validated paths must consist of ASCII identifiers and array
    /// indices. Off by default, so any non-empty key is accepted.
    pub strict_paths: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            case_sensitive_contains: false,
            validate_paths: true,
            strict_paths: false,
        }
    }
}

impl FilterOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        FilterOptions::default()
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets case sensitivity for substring clauses.
    pub fn case_sensitive_contains(mut self, yes: bool) -> Self {
        self.case_sensitive_contains = yes;
        self
    }

    /// Enables or disables field path validation.
    pub fn validate_paths(mut self, yes: bool) -> Self {
        self.validate_paths = yes;
        self
    }

    /// Restricts validated paths to ASCII identifiers and array indices.
    pub fn strict_paths(mut self, yes: bool) -> Self {
        self.strict_paths = yes;
        self
    }
}

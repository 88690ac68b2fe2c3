//! Dotted field paths.
//!
//! A [`FieldPath`] addresses a possibly nested attribute of a record:
//! `"title"`, `"author.name"`, `"tags.0"`, `"comments.length"`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::error::{FilterError, Result};
use crate::value::{FieldValue, Number};

static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z_$][A-Za-z0-9_$]*|[0-9]+)$").expect("valid regex"));

/// A parsed, dot-separated field path.
///
/// Segments are object keys or array indices. Any non-empty segment is
/// accepted, so keys like `prénom` or `user-id` work; use
/// [`parse_identifiers`](Self::parse_identifiers) to restrict paths to
/// ASCII identifiers. Resolution never fails: anything that cannot be
/// followed resolves to [`FieldValue::Undefined`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_filter::{FieldPath, FieldValue};
///
/// let doc = json!({ "author": { "name": "Ada" }, "tags": ["x", "y"] });
/// let name = FieldPath::parse("author.name").unwrap();
/// assert_eq!(name.resolve(&doc), FieldValue::String("Ada"));
///
/// let count = FieldPath::parse("tags.length").unwrap();
/// assert_eq!(count.resolve(&doc).to_js_string(), "2");
///
/// assert!(FieldPath::parse("author..name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a path, rejecting empty paths and empty segments.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(FilterError::InvalidFieldPath {
                path: String::new(),
                reason: "path is empty",
            });
        }
        if path.split('.').any(str::is_empty) {
            return Err(FilterError::InvalidFieldPath {
                path: path.to_string(),
                reason: "empty segment",
            });
        }
        Ok(FieldPath::new_unchecked(path))
    }

    /// Parses a path whose segments must be ASCII identifiers
    /// (`[A-Za-z_$][A-Za-z0-9_$]*`) or array indices.
    pub fn parse_identifiers(path: &str) -> Result<Self> {
        let parsed = FieldPath::parse(path)?;
        if parsed.segments.iter().any(|segment| !SEGMENT.is_match(segment)) {
            return Err(FilterError::InvalidFieldPath {
                path: path.to_string(),
                reason: "segments must be identifiers or array indices",
            });
        }
        Ok(parsed)
    }

    /// Splits a path on `.` without validating its segments.
    pub fn new_unchecked(path: &str) -> Self {
        FieldPath {
            raw: path.to_string(),
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the individual segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolves the path against a record.
    pub fn resolve<'a>(&self, record: &'a Json) -> FieldValue<'a> {
        resolve_segments(record, &self.segments)
    }
}

fn resolve_segments<'a>(record: &'a Json, segments: &[String]) -> FieldValue<'a> {
    let mut current = record;
    for (i, segment) in segments.iter().enumerate() {
        let next = match current {
            Json::Object(map) => map.get(segment),
            Json::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.get(index),
                Err(_) if segment == "length" && i == segments.len() - 1 => {
                    return FieldValue::Number(Number::from(items.len()));
                }
                Err(_) => None,
            },
            // string length counts UTF-16 code units
            Json::String(s) if segment == "length" && i == segments.len() - 1 => {
                return FieldValue::Number(Number::from(s.encode_utf16().count()));
            }
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return FieldValue::Undefined,
        }
    }
    FieldValue::from_json(current)
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::new_unchecked(&path)
    }
}

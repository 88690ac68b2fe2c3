//! Filter - fluent where/select/sort/group queries over JSON records.
//!
//! Filter provides a chained builder for querying in-memory collections of
//! `serde_json::Value` records, the way a SQL `WHERE` / `SELECT` /
//! `ORDER BY` / `GROUP BY` would. It supports:
//!
//! - Truthiness, equality and operator comparisons with loose or strict
//!   equality semantics
//! - Guarded list membership, list-element and substring clauses that are
//!   simply false on missing fields
//! - Implicit AND, explicit OR, and nested groups built with closures
//! - Dotted field paths into nested objects and arrays
//! - Projection, multi-key stable sorting and nested grouping of the result
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use standout_filter::FilterBuilder;
//!
//! let tasks = vec![
//!     json!({ "title": "Write docs", "status": "open", "priority": 3 }),
//!     json!({ "title": "Fix bug", "status": "open", "priority": 5 }),
//!     json!({ "title": "Old task", "status": "closed", "priority": 1 }),
//! ];
//!
//! let result = FilterBuilder::new()
//!     .where_in("status", ["open", "pending"])
//!     .where_group(|q| q.where_op("priority", ">=", 4).or_where_contains("title", "DOCS"))
//!     .select(["title", "priority"])
//!     .sort(["priority"])
//!     .get(&tasks)
//!     .unwrap();
//!
//! assert_eq!(
//!     result.records().unwrap(),
//!     &[
//!         json!({ "title": "Write docs", "priority": 3 }),
//!         json!({ "title": "Fix bug", "priority": 5 }),
//!     ]
//! );
//! ```
//!
//! # Query Semantics
//!
//! Clauses added with `where*` are joined with AND; `or_where*` starts a new
//! OR branch. AND binds tighter than OR:
//!
//! ```text
//! where(A).where(B).or_where(C).where(D)   ==   (A && B) || (C && D)
//! where(A).where_group(|q| q.where(B).or_where(C))   ==   A && (B || C)
//! ```
//!
//! Groups that end up with no clauses add nothing, and an empty query
//! matches every record.
//!
//! # Clause Shapes
//!
//! | Method | Test | Missing field |
//! |--------|------|---------------|
//! | `where_field` | field is truthy | false |
//! | `where_eq` | field `==` value (loose) | `undefined == null` only |
//! | `where_op` / `where_cmp` | `==` `!=` `===` `!==` `>` `>=` `<` `<=` | per operator |
//! | `where_in` | string form is one of the candidates | false |
//! | `where_includes` | list contains value | false |
//! | `where_includes_key` | some element has `key === value` | false |
//! | `where_contains` | case-insensitive substring | false |
//!
//! # Pipeline
//!
//! [`FilterBuilder::get`] filters (keeping input order), then projects onto
//! the `select` keys, sorts by the `sort` keys and nests by the `group`
//! keys, in that order. Each stage is skipped when it has no keys.

mod builder;
mod clause;
mod compile;
mod error;
mod expr;
mod op;
mod operand;
mod options;
mod path;
pub mod pipeline;
mod value;

// Re-export public API
pub use builder::{FilterBuilder, QuerySpec};
pub use clause::Clause;
pub use compile::Predicate;
pub use error::{FilterError, Result};
pub use expr::Expr;
pub use op::Op;
pub use operand::Operand;
pub use options::{FilterOptions, DEFAULT_MAX_DEPTH};
pub use path::FieldPath;
pub use pipeline::Output;
pub use value::{FieldValue, Number};

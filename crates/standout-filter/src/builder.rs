//! Fluent query builder and executor.
//!
//! [`FilterBuilder`] accumulates a predicate from chained `where*` calls,
//! plus selection, sort and group keys, and runs them against a collection
//! of JSON records with [`get`](FilterBuilder::get).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::clause::Clause;
use crate::compile::Predicate;
use crate::error::{FilterError, Result};
use crate::expr::Expr;
use crate::op::Op;
use crate::operand::Operand;
use crate::options::FilterOptions;
use crate::path::FieldPath;
use crate::pipeline::{self, Output};

/// A query for filtering, projecting, sorting and grouping records.
///
/// Clauses added with `where*` are joined with AND. The `or_where*` variants
/// start a new OR branch, and AND binds tighter than OR, so
/// `where(A).where(B).or_where(C).where(D)` reads `(A && B) || (C && D)`.
/// Use [`where_group`](Self::where_group) for explicit grouping.
///
/// Builder methods never fail. The first invalid input (an unknown operator
/// token, a malformed field path) is remembered and returned by the terminal
/// calls.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_filter::FilterBuilder;
///
/// let data = vec![
///     json!({ "a": 1, "b": "x" }),
///     json!({ "a": 2, "b": "y" }),
///     json!({ "a": 3, "b": "x" }),
/// ];
///
/// let result = FilterBuilder::new()
///     .where_op("a", ">", 1)
///     .or_where_eq("b", "y")
///     .select(["a"])
///     .get(&data)
///     .unwrap();
///
/// assert_eq!(result.records().unwrap(), &[json!({ "a": 2 }), json!({ "a": 3 })]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    branches: Vec<Vec<Expr>>,
    select_keys: Vec<FieldPath>,
    sort_keys: Vec<FieldPath>,
    group_keys: Vec<FieldPath>,
    error: Option<FilterError>,
    options: FilterOptions,
}

#[derive(Clone, Copy)]
enum Connective {
    And,
    Or,
}

impl FilterBuilder {
    /// Creates an empty query with default options.
    ///
    /// An empty query matches every record.
    pub fn new() -> Self {
        FilterBuilder::default()
    }

    /// Creates an empty query with the given options.
    pub fn with_options(options: FilterOptions) -> Self {
        FilterBuilder {
            options,
            ..FilterBuilder::default()
        }
    }

    /// Returns the builder's options.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    // ========================================================================
    // Selection, sorting, grouping
    // ========================================================================

    /// Adds fields to project each result record onto. Duplicates are ignored.
    pub fn select<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            if let Some(path) = self.field(key.as_ref()) {
                push_unique(&mut self.select_keys, path);
            }
        }
        self
    }

    /// Adds sort keys. The first key declared is the primary order, later
    /// ones break ties. Duplicates are ignored.
    pub fn sort<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            if let Some(path) = self.field(key.as_ref()) {
                push_unique(&mut self.sort_keys, path);
            }
        }
        self
    }

    /// Adds group keys. The first key declared is the outermost level.
    /// Duplicates are ignored.
    pub fn group<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            if let Some(path) = self.field(key.as_ref()) {
                push_unique(&mut self.group_keys, path);
            }
        }
        self
    }

    // ========================================================================
    // AND clauses
    // ========================================================================

    /// Requires the field to be truthy.
    pub fn where_field(mut self, path: &str) -> Self {
        let expr = self.clause(path, Clause::truthy);
        self.push(Connective::And, expr)
    }

    /// Requires the field to loosely equal the value (`==`).
    pub fn where_eq(mut self, path: &str, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::compare(field, Op::Eq, value));
        self.push(Connective::And, expr)
    }

    /// Compares the field using an operator token such as `">="` or `"!=="`.
    ///
    /// An unknown token is reported by the terminal call.
    pub fn where_op(mut self, path: &str, op: &str, value: impl Into<Operand>) -> Self {
        let expr = self.op_clause(path, op, value);
        self.push(Connective::And, expr)
    }

    /// Compares the field using an [`Op`].
    pub fn where_cmp(mut self, path: &str, op: Op, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::compare(field, op, value));
        self.push(Connective::And, expr)
    }

    /// Adds a parenthesized group built by `build` on a fresh builder.
    ///
    /// A group with no clauses adds nothing.
    pub fn where_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let expr = self.subquery(build);
        self.push(Connective::And, expr)
    }

    /// Adds the negation of a group built by `build`.
    pub fn where_not<F>(mut self, build: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let expr = self.subquery(build).map(negate);
        self.push(Connective::And, expr)
    }

    /// Requires the list field to include `value`.
    pub fn where_includes(mut self, path: &str, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::includes(field, value));
        self.push(Connective::And, expr)
    }

    /// Requires some element of the list field to have `element.key === value`.
    pub fn where_includes_key(
        mut self,
        path: &str,
        key: &str,
        value: impl Into<Operand>,
    ) -> Self {
        let expr = self.includes_key_clause(path, key, value);
        self.push(Connective::And, expr)
    }

    /// Requires the string field to contain `needle` (case-insensitive by
    /// default).
    pub fn where_contains(mut self, path: &str, needle: &str) -> Self {
        let expr = self.contains_clause(path, needle);
        self.push(Connective::And, expr)
    }

    /// Requires the field's string form to be one of `candidates`.
    pub fn where_in<I, V>(mut self, path: &str, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let expr = self.clause(path, |field| Clause::one_of(field, candidates));
        self.push(Connective::And, expr)
    }

    // ========================================================================
    // OR clauses
    // ========================================================================

    /// OR variant of [`where_field`](Self::where_field).
    pub fn or_where_field(mut self, path: &str) -> Self {
        let expr = self.clause(path, Clause::truthy);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_eq`](Self::where_eq).
    pub fn or_where_eq(mut self, path: &str, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::compare(field, Op::Eq, value));
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_op`](Self::where_op).
    pub fn or_where_op(mut self, path: &str, op: &str, value: impl Into<Operand>) -> Self {
        let expr = self.op_clause(path, op, value);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_cmp`](Self::where_cmp).
    pub fn or_where_cmp(mut self, path: &str, op: Op, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::compare(field, op, value));
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_group`](Self::where_group).
    pub fn or_where_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let expr = self.subquery(build);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_not`](Self::where_not).
    pub fn or_where_not<F>(mut self, build: F) -> Self
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let expr = self.subquery(build).map(negate);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_includes`](Self::where_includes).
    pub fn or_where_includes(mut self, path: &str, value: impl Into<Operand>) -> Self {
        let expr = self.clause(path, |field| Clause::includes(field, value));
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_includes_key`](Self::where_includes_key).
    pub fn or_where_includes_key(
        mut self,
        path: &str,
        key: &str,
        value: impl Into<Operand>,
    ) -> Self {
        let expr = self.includes_key_clause(path, key, value);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_contains`](Self::where_contains).
    pub fn or_where_contains(mut self, path: &str, needle: &str) -> Self {
        let expr = self.contains_clause(path, needle);
        self.push(Connective::Or, expr)
    }

    /// OR variant of [`where_in`](Self::where_in).
    pub fn or_where_in<I, V>(mut self, path: &str, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let expr = self.clause(path, |field| Clause::one_of(field, candidates));
        self.push(Connective::Or, expr)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the sanitized predicate.
    pub fn expression(&self) -> Expr {
        self.raw_expression().sanitize()
    }

    /// Returns the selection keys, in declaration order.
    pub fn select_keys(&self) -> &[FieldPath] {
        &self.select_keys
    }

    /// Returns the sort keys, in declaration order.
    pub fn sort_keys(&self) -> &[FieldPath] {
        &self.sort_keys
    }

    /// Returns the group keys, in declaration order.
    pub fn group_keys(&self) -> &[FieldPath] {
        &self.group_keys
    }

    /// Returns the first recorded build error, if any.
    pub fn error(&self) -> Option<&FilterError> {
        self.error.as_ref()
    }

    /// Returns `true` if no clauses have been added.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Compiles the predicate, reporting any recorded build error.
    pub fn predicate(&self) -> Result<Predicate> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Predicate::compile(&self.expression(), &self.options)
    }

    /// Tests a single record against the predicate.
    pub fn matches(&self, record: &Json) -> Result<bool> {
        Ok(self.predicate()?.test(record))
    }

    /// Returns the matching records, in input order, without projection,
    /// sorting or grouping.
    pub fn filter<'a>(&self, data: &'a [Json]) -> Result<Vec<&'a Json>> {
        Ok(self.predicate()?.filter(data))
    }

    /// Counts the matching records.
    pub fn count(&self, data: &[Json]) -> Result<usize> {
        let predicate = self.predicate()?;
        Ok(data.iter().filter(|record| predicate.test(record)).count())
    }

    /// Runs the query: filter, then select, sort and group.
    pub fn get(&self, data: &[Json]) -> Result<Output> {
        let predicate = self.predicate()?;
        let filtered = predicate.filter(data);
        debug!(
            expression = %predicate.expression(),
            input = data.len(),
            matched = filtered.len(),
            "filtered collection"
        );
        Ok(pipeline::run(
            filtered,
            &self.select_keys,
            &self.sort_keys,
            &self.group_keys,
        ))
    }

    /// Clears every clause, key and recorded error. Options are kept.
    pub fn reset_query(&mut self) {
        self.branches.clear();
        self.select_keys.clear();
        self.sort_keys.clear();
        self.group_keys.clear();
        self.error = None;
    }

    // ========================================================================
    // Query specs
    // ========================================================================

    /// Captures the query as a serializable spec.
    pub fn to_spec(&self) -> QuerySpec {
        QuerySpec {
            filter: self.expression(),
            select: self.select_keys.clone(),
            sort: self.sort_keys.clone(),
            group: self.group_keys.clone(),
        }
    }

    /// Rebuilds a query from a spec, validating its paths if the options
    /// ask for it.
    pub fn from_spec(spec: QuerySpec, options: FilterOptions) -> Self {
        let mut builder = FilterBuilder::with_options(options);
        if builder.options.validate_paths {
            let paths = spec
                .filter
                .paths()
                .into_iter()
                .chain(&spec.select)
                .chain(&spec.sort)
                .chain(&spec.group);
            for path in paths {
                if let Err(err) = parse_path(&builder.options, path.as_str()) {
                    builder.error = Some(err);
                    break;
                }
            }
        }
        let filter = spec.filter.sanitize();
        if !filter.is_trivial() {
            builder.branches.push(vec![filter]);
        }
        builder.select_keys = spec.select;
        builder.sort_keys = spec.sort;
        builder.group_keys = spec.group;
        builder
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn raw_expression(&self) -> Expr {
        Expr::Any(
            self.branches
                .iter()
                .map(|branch| Expr::All(branch.clone()))
                .collect(),
        )
    }

    fn record_error(&mut self, err: FilterError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn field(&mut self, path: &str) -> Option<FieldPath> {
        if !self.options.validate_paths {
            return Some(FieldPath::new_unchecked(path));
        }
        match parse_path(&self.options, path) {
            Ok(path) => Some(path),
            Err(err) => {
                self.record_error(err);
                None
            }
        }
    }

    fn clause(&mut self, path: &str, make: impl FnOnce(FieldPath) -> Clause) -> Option<Expr> {
        self.field(path).map(|field| Expr::Clause(make(field)))
    }

    fn op_clause(&mut self, path: &str, op: &str, value: impl Into<Operand>) -> Option<Expr> {
        let op = match op.parse::<Op>() {
            Ok(op) => op,
            Err(err) => {
                self.record_error(err);
                return None;
            }
        };
        self.clause(path, |field| Clause::compare(field, op, value))
    }

    fn includes_key_clause(
        &mut self,
        path: &str,
        key: &str,
        value: impl Into<Operand>,
    ) -> Option<Expr> {
        let field = self.field(path)?;
        let key = self.field(key)?;
        Some(Expr::Clause(Clause::includes_key(field, key, value)))
    }

    fn contains_clause(&mut self, path: &str, needle: &str) -> Option<Expr> {
        let case_sensitive = self.options.case_sensitive_contains;
        self.clause(path, |field| Clause::contains(field, needle, case_sensitive))
    }

    /// Builds a nested group. Keys and errors recorded inside the group carry
    /// over to this builder.
    fn subquery<F>(&mut self, build: F) -> Option<Expr>
    where
        F: FnOnce(FilterBuilder) -> FilterBuilder,
    {
        let child = build(FilterBuilder::with_options(self.options.clone()));
        if let Some(err) = child.error.clone() {
            self.record_error(err);
        }
        for key in &child.select_keys {
            push_unique(&mut self.select_keys, key.clone());
        }
        for key in &child.sort_keys {
            push_unique(&mut self.sort_keys, key.clone());
        }
        for key in &child.group_keys {
            push_unique(&mut self.group_keys, key.clone());
        }
        if child.is_empty() {
            return None;
        }
        Some(child.raw_expression())
    }

    fn push(mut self, connective: Connective, expr: Option<Expr>) -> Self {
        let Some(expr) = expr else {
            return self;
        };
        let new_branch = matches!(connective, Connective::Or) || self.branches.is_empty();
        if new_branch {
            self.branches.push(vec![expr]);
        } else if let Some(branch) = self.branches.last_mut() {
            branch.push(expr);
        }
        self
    }
}

fn parse_path(options: &FilterOptions, path: &str) -> Result<FieldPath> {
    if options.strict_paths {
        FieldPath::parse_identifiers(path)
    } else {
        FieldPath::parse(path)
    }
}

fn negate(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

fn push_unique(keys: &mut Vec<FieldPath>, path: FieldPath) {
    if !keys.contains(&path) {
        keys.push(path);
    }
}

impl fmt::Display for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}

/// Serializable description of a query.
///
/// ```
/// use serde_json::json;
/// use standout_filter::{FilterBuilder, FilterOptions, QuerySpec};
///
/// let spec: QuerySpec = serde_json::from_value(json!({
///     "filter": { "clause": { "kind": "truthy", "field": "done" } },
///     "sort": ["id"]
/// }))
/// .unwrap();
///
/// let query = FilterBuilder::from_spec(spec, FilterOptions::default());
/// let data = vec![json!({ "id": 2, "done": true }), json!({ "id": 1, "done": false })];
/// assert_eq!(query.count(&data).unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// The predicate.
    pub filter: Expr,
    /// Projection keys.
    pub select: Vec<FieldPath>,
    /// Sort keys.
    pub sort: Vec<FieldPath>,
    /// Group keys.
    pub group: Vec<FieldPath>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Json> {
        vec![
            json!({"a": 1, "b": "x"}),
            json!({"a": 2, "b": "y"}),
            json!({"a": 3, "b": "x"}),
        ]
    }

    #[test]
    fn empty_query_matches_all() {
        let data = sample();
        let out = FilterBuilder::new().get(&data).unwrap();
        assert_eq!(out, Output::Records(data.clone()));
        assert!(FilterBuilder::new().expression().is_trivial());
    }

    #[test]
    fn implicit_and() {
        let query = FilterBuilder::new().where_eq("a", 1).where_eq("b", "x");
        assert_eq!(query.to_string(), "(item.a == 1) && (item.b == 'x')");
        assert_eq!(query.count(&sample()).unwrap(), 1);
    }

    #[test]
    fn or_binds_looser_than_and() {
        let query = FilterBuilder::new()
            .where_eq("a", 1)
            .where_eq("b", "y")
            .or_where_eq("a", 3)
            .where_eq("b", "x");
        assert_eq!(
            query.to_string(),
            "(item.a == 1) && (item.b == 'y') || (item.a == 3) && (item.b == 'x')"
        );
        let data = sample();
        assert_eq!(query.filter(&data).unwrap(), vec![&data[2]]);
    }

    #[test]
    fn group_rendering() {
        let query = FilterBuilder::new()
            .where_eq("a", 1)
            .where_group(|q| q.where_eq("b", 2).or_where_eq("c", 3))
            .where_field("d");
        assert_eq!(
            query.to_string(),
            "(item.a == 1) && ((item.b == 2) || (item.c == 3)) && (item.d)"
        );
    }

    #[test]
    fn empty_group_adds_nothing() {
        let query = FilterBuilder::new()
            .where_eq("a", 1)
            .where_group(|q| q)
            .or_where_group(|q| q.where_group(|q| q));
        assert_eq!(query.to_string(), "(item.a == 1)");
    }

    #[test]
    fn or_on_empty_builder_starts_first_branch() {
        let query = FilterBuilder::new().or_where_eq("a", 2);
        assert_eq!(query.to_string(), "(item.a == 2)");
    }

    #[test]
    fn where_not_negates_group() {
        let query = FilterBuilder::new().where_not(|q| q.where_eq("b", "x"));
        assert_eq!(query.to_string(), "!(item.b == 'x')");
        let data = sample();
        assert_eq!(query.filter(&data).unwrap(), vec![&data[1]]);
    }

    #[test]
    fn unknown_operator_surfaces_at_get() {
        let query = FilterBuilder::new().where_op("a", "=>", 1);
        assert_eq!(
            query.get(&sample()).unwrap_err(),
            FilterError::UnknownOperator("=>".to_string())
        );
    }

    #[test]
    fn invalid_path_inside_group_surfaces() {
        let query = FilterBuilder::new().where_group(|q| q.where_eq("a..b", 1));
        assert!(matches!(
            query.get(&sample()),
            Err(FilterError::InvalidFieldPath { .. })
        ));
    }

    #[test]
    fn unchecked_paths_when_validation_disabled() {
        let options = FilterOptions::default().validate_paths(false);
        let query = FilterBuilder::with_options(options).where_eq("a..b", 1);
        assert!(query.error().is_none());
        assert_eq!(query.count(&sample()).unwrap(), 0);
    }

    #[test]
    fn any_key_is_a_valid_path() {
        let data = vec![
            json!({"prénom": "Zoé", "user-id": 1, "first name": "Z"}),
            json!({"prénom": "Léa", "user-id": 2, "first name": "L"}),
        ];
        let query = FilterBuilder::new()
            .where_eq("prénom", "Zoé")
            .select(["user-id", "first name"]);
        assert_eq!(
            query.get(&data).unwrap(),
            Output::Records(vec![json!({"user-id": 1, "first name": "Z"})])
        );

        let by_id = FilterBuilder::new().where_op("user-id", ">", 1).sort(["prénom"]);
        assert_eq!(by_id.filter(&data).unwrap(), vec![&data[1]]);
    }

    #[test]
    fn strict_paths_reject_non_identifiers() {
        let strict = FilterOptions::default().strict_paths(true);
        let query = FilterBuilder::with_options(strict.clone()).select(["user-id"]);
        assert!(matches!(
            query.get(&sample()),
            Err(FilterError::InvalidFieldPath { .. })
        ));

        let spec: QuerySpec = serde_json::from_value(json!({"sort": ["prénom"]})).unwrap();
        assert!(FilterBuilder::from_spec(spec, strict).error().is_some());
    }

    #[test]
    fn first_error_wins() {
        let query = FilterBuilder::new()
            .where_op("a", "~", 1)
            .where_eq("", 1);
        assert_eq!(
            query.error(),
            Some(&FilterError::UnknownOperator("~".to_string()))
        );
    }

    #[test]
    fn keys_deduplicate_in_order() {
        let query = FilterBuilder::new()
            .select(["b", "a", "b"])
            .sort(["a"])
            .sort(["b", "a"])
            .group(["b", "b"]);
        let names = |keys: &[FieldPath]| keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();
        assert_eq!(names(query.select_keys()), ["b", "a"]);
        assert_eq!(names(query.sort_keys()), ["a", "b"]);
        assert_eq!(names(query.group_keys()), ["b"]);
    }

    #[test]
    fn keys_inside_groups_carry_over() {
        let query = FilterBuilder::new().where_group(|q| q.where_eq("a", 1).select(["a"]));
        assert_eq!(query.select_keys().len(), 1);
    }

    #[test]
    fn reset_query_clears_state() {
        let mut query = FilterBuilder::with_options(FilterOptions::default().max_depth(5))
            .where_op("a", "??", 1)
            .select(["a"]);
        query.reset_query();
        assert!(query.is_empty());
        assert!(query.error().is_none());
        assert!(query.select_keys().is_empty());
        assert_eq!(query.options().max_depth, 5);
        assert_eq!(query.count(&sample()).unwrap(), 3);
    }

    #[test]
    fn depth_limit_applies_to_nested_groups() {
        let query = FilterBuilder::with_options(FilterOptions::default().max_depth(2))
            .where_eq("a", 1)
            .where_group(|q| q.where_eq("b", 2).or_where_eq("c", 3));
        assert_eq!(query.get(&sample()).unwrap_err(), FilterError::TooDeep { max: 2 });
    }

    #[test]
    fn spec_round_trip() {
        let query = FilterBuilder::new()
            .where_op("a", ">", 1)
            .or_where_in("b", ["y"])
            .select(["a", "b"])
            .sort(["b"])
            .group(["b"]);
        let json = serde_json::to_string(&query.to_spec()).unwrap();
        let spec: QuerySpec = serde_json::from_str(&json).unwrap();
        let rebuilt = FilterBuilder::from_spec(spec, FilterOptions::default());

        let data = sample();
        assert_eq!(rebuilt.get(&data).unwrap(), query.get(&data).unwrap());
        assert_eq!(rebuilt.to_string(), query.to_string());
    }

    #[test]
    fn spec_paths_are_validated() {
        let spec: QuerySpec = serde_json::from_value(json!({"select": ["a.", "b"]})).unwrap();
        let query = FilterBuilder::from_spec(spec, FilterOptions::default());
        assert!(matches!(
            query.error(),
            Some(FilterError::InvalidFieldPath { .. })
        ));
    }
}

//! Predicate compilation and evaluation.
//!
//! [`Predicate::compile`] turns an expression tree into a checked, callable
//! predicate; [`Predicate::test`] interprets it against one record.

use serde_json::Value as Json;
use tracing::trace;

use crate::error::{FilterError, Result};
use crate::expr::Expr;
use crate::options::FilterOptions;

/// A compiled, ready-to-run filter predicate.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_filter::{Clause, Expr, FieldPath, FilterOptions, Op, Predicate};
///
/// let expr = Expr::Clause(Clause::compare(FieldPath::parse("n").unwrap(), Op::Gte, 2));
/// let predicate = Predicate::compile(&expr, &FilterOptions::default()).unwrap();
///
/// let data = vec![json!({ "n": 1 }), json!({ "n": 2 }), json!({ "n": 3 })];
/// let kept = predicate.filter(&data);
/// assert_eq!(kept, vec![&data[1], &data[2]]);
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    expr: Expr,
}

impl Predicate {
    /// Sanitizes and checks an expression.
    ///
    /// Fails with [`FilterError::TooDeep`] if the sanitized tree nests
    /// deeper than `options.max_depth`.
    pub fn compile(expr: &Expr, options: &FilterOptions) -> Result<Self> {
        let expr = expr.clone().sanitize();
        let depth = expr.depth();
        if depth > options.max_depth {
            return Err(FilterError::TooDeep {
                max: options.max_depth,
            });
        }
        trace!(depth, expression = %expr, "compiled filter predicate");
        Ok(Predicate { expr })
    }

    /// Returns the sanitized expression being evaluated.
    pub fn expression(&self) -> &Expr {
        &self.expr
    }

    /// Tests one record.
    pub fn test(&self, record: &Json) -> bool {
        eval(&self.expr, record)
    }

    /// Keeps matching records, preserving their order.
    pub fn filter<'a>(&self, data: &'a [Json]) -> Vec<&'a Json> {
        if self.expr.is_trivial() {
            return data.iter().collect();
        }
        data.iter().filter(|record| self.test(record)).collect()
    }
}

fn eval(expr: &Expr, record: &Json) -> bool {
    match expr {
        Expr::Literal(b) => *b,
        Expr::Clause(clause) => clause.matches(record),
        Expr::Not(inner) => !eval(inner, record),
        Expr::All(children) => children.iter().all(|child| eval(child, record)),
        // an unsanitized empty disjunction is no constraint
        Expr::Any(children) => {
            children.is_empty() || children.iter().any(|child| eval(child, record))
        }
    }
}
